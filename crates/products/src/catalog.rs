//! The in-memory product collection.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use catalog_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{NewProduct, Product, ProductPatch};
use crate::query::{ProductPage, ProductQuery};
use crate::settings::CatalogSettings;

/// Ordered, id-unique collection of products.
///
/// Shared between request handlers behind an `Arc`. Each operation holds the
/// lock for its whole duration, so operations are atomic with respect to each
/// other. Insertion order is preserved; updates happen in place and deletes
/// keep the relative order of the remaining entries.
#[derive(Debug)]
pub struct ProductCatalog {
    products: RwLock<Vec<Product>>,
    settings: CatalogSettings,
}

impl ProductCatalog {
    /// An empty catalog.
    pub fn new(settings: CatalogSettings) -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            settings,
        }
    }

    /// A catalog holding the startup seed set.
    pub fn seeded(settings: CatalogSettings) -> Self {
        Self {
            products: RwLock::new(seed_products()),
            settings,
        }
    }

    /// A catalog holding `products` in the given order.
    ///
    /// Fails if two products share an id.
    pub fn with_products(
        settings: CatalogSettings,
        products: impl IntoIterator<Item = Product>,
    ) -> DomainResult<Self> {
        let products: Vec<Product> = products.into_iter().collect();
        let mut ids = HashSet::with_capacity(products.len());
        for p in &products {
            if !ids.insert(p.id()) {
                return Err(DomainError::validation(format!("duplicate product id `{}`", p.id())));
            }
        }
        Ok(Self {
            products: RwLock::new(products),
            settings,
        })
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn list(&self, query: &ProductQuery) -> ProductPage {
        ProductPage::build(self.read().iter(), query)
    }

    pub fn get(&self, id: &ProductId) -> DomainResult<Product> {
        self.read()
            .iter()
            .find(|p| p.has_id(id))
            .cloned()
            .ok_or_else(DomainError::not_found)
    }

    /// Validate `input`, assign a fresh id and append to the end.
    pub fn create(&self, input: NewProduct) -> DomainResult<Product> {
        let mut products = self.write();

        let mut id = ProductId::generate();
        while products.iter().any(|p| p.has_id(&id)) {
            id = ProductId::generate();
        }

        let product = Product::create(id, input, self.settings.required_fields)?;
        products.push(product.clone());
        Ok(product)
    }

    /// Patch the product in place according to the configured update policy.
    pub fn update(&self, id: &ProductId, patch: ProductPatch) -> DomainResult<Product> {
        let mut products = self.write();
        let product = products
            .iter_mut()
            .find(|p| p.has_id(id))
            .ok_or_else(DomainError::not_found)?;
        product.apply(patch, self.settings.update_policy)?;
        Ok(product.clone())
    }

    /// Remove the product and return it.
    pub fn delete(&self, id: &ProductId) -> DomainResult<Product> {
        let mut products = self.write();
        let idx = products
            .iter()
            .position(|p| p.has_id(id))
            .ok_or_else(DomainError::not_found)?;
        Ok(products.remove(idx))
    }

    // A panic while holding the lock cannot leave a half-applied operation
    // behind (mutations are validated before they are written), so poisoning
    // is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::seeded(CatalogSettings::default())
    }
}

/// Records present at process start.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new("1", "Laptop", 1200.0)
            .with_description("High-performance laptop with 16GB RAM")
            .with_category("electronics"),
        Product::new("2", "Smartphone", 800.0)
            .with_description("Latest model with 128GB storage")
            .with_category("electronics"),
        Product::new("3", "Coffee Maker", 50.0)
            .with_description("Programmable coffee maker with timer")
            .with_category("kitchen")
            .with_in_stock(false),
    ]
}
