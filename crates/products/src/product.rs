use serde::{Deserialize, Deserializer, Serialize, Serializer};

use catalog_core::{DomainError, DomainResult, Entity, ProductId};

use crate::settings::{RequiredFields, UpdatePolicy};

/// A catalog record.
///
/// `description` and `category` are optional so the same record serves the
/// minimal shape (name + price only); they are omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(serialize_with = "serialize_price")]
    price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    in_stock: bool,
}

impl Product {
    /// A product with only the always-present fields; in stock by default.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            category: None,
            in_stock: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Build a product from a create request, enforcing the required-field set.
    ///
    /// A field counts as missing when it is absent, an empty string, or a zero
    /// price. All missing fields are reported together.
    pub fn create(
        id: ProductId,
        input: NewProduct,
        required: RequiredFields,
    ) -> DomainResult<Self> {
        let full = required == RequiredFields::Full;
        let mut missing = Vec::new();
        if !input.name.as_deref().is_some_and(is_truthy_str) {
            missing.push("name");
        }
        if full && !input.description.as_deref().is_some_and(is_truthy_str) {
            missing.push("description");
        }
        if !input.price.is_some_and(is_truthy_price) {
            missing.push("price");
        }
        if full && !input.category.as_deref().is_some_and(is_truthy_str) {
            missing.push("category");
        }

        let (Some(name), Some(price)) = (input.name, input.price) else {
            return Err(DomainError::MissingFields(missing));
        };
        if !missing.is_empty() {
            return Err(DomainError::MissingFields(missing));
        }

        Ok(Self {
            id,
            name,
            description: input.description.filter(|s| is_truthy_str(s)),
            price,
            category: input.category.filter(|s| is_truthy_str(s)),
            in_stock: input.in_stock.unwrap_or(true),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    /// Apply a partial update in place. The id never changes.
    ///
    /// Validation happens before any field is touched, so a rejected patch
    /// leaves the product unchanged.
    pub fn apply(&mut self, patch: ProductPatch, policy: UpdatePolicy) -> DomainResult<()> {
        if policy == UpdatePolicy::Present {
            if patch.name.is_null() {
                return Err(DomainError::validation("name cannot be cleared"));
            }
            if patch.price.is_null() {
                return Err(DomainError::validation("price cannot be cleared"));
            }
        }

        match policy {
            UpdatePolicy::Truthy => {
                if let Patch::Value(name) = patch.name.filter(|s| is_truthy_str(s)) {
                    self.name = name;
                }
                if let Patch::Value(description) = patch.description.filter(|s| is_truthy_str(s)) {
                    self.description = Some(description);
                }
                if let Patch::Value(price) = patch.price.filter(|p| is_truthy_price(*p)) {
                    self.price = price;
                }
                if let Patch::Value(category) = patch.category.filter(|s| is_truthy_str(s)) {
                    self.category = Some(category);
                }
            }
            UpdatePolicy::Present => {
                if let Patch::Value(name) = patch.name {
                    self.name = name;
                }
                patch.description.apply_to(&mut self.description);
                if let Patch::Value(price) = patch.price {
                    self.price = price;
                }
                patch.category.apply_to(&mut self.category);
            }
        }

        if let Patch::Value(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn is_truthy_str(s: &str) -> bool {
    !s.is_empty()
}

fn is_truthy_price(p: f64) -> bool {
    p != 0.0 && !p.is_nan()
}

/// Largest magnitude at which every whole `f64` is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole-number prices go out as JSON integers (`1200`, not `1200.0`).
fn serialize_price<S>(price: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if price.fract() == 0.0 && price.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

/// Create request payload. Every field is optional at the type level; which
/// ones are required is decided by [`RequiredFields`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

/// One field of a partial update: not supplied, supplied as `null`, or
/// supplied with a value.
///
/// Deserializes from `Option<T>`; pair it with `#[serde(default)]` so a
/// missing key becomes `Absent`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    /// Demote a `Value` that fails the predicate to `Absent`.
    pub fn filter(self, keep: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Patch::Value(v) if !keep(&v) => Patch::Absent,
            other => other,
        }
    }

    /// Overwrite an optional slot: `Value` sets, `Null` clears, `Absent` keeps.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *slot = None,
            Patch::Value(v) => *slot = Some(v),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

/// Update request payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Patch<String>,
    pub description: Patch<String>,
    pub price: Patch<f64>,
    pub category: Patch<String>,
    pub in_stock: Patch<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product::new("1", "Laptop", 1200.0)
            .with_description("High-performance laptop with 16GB RAM")
            .with_category("electronics")
    }

    fn full_input() -> NewProduct {
        NewProduct {
            name: Some("Tablet".to_string()),
            description: Some("x".to_string()),
            price: Some(300.0),
            category: Some("electronics".to_string()),
            in_stock: None,
        }
    }

    #[test]
    fn create_defaults_in_stock_to_true() {
        let p = Product::create(ProductId::from("t"), full_input(), RequiredFields::Full).unwrap();
        assert!(p.in_stock());
        assert_eq!(p.name(), "Tablet");
        assert_eq!(p.category(), Some("electronics"));
    }

    #[test]
    fn create_keeps_explicit_out_of_stock() {
        let input = NewProduct {
            in_stock: Some(false),
            ..full_input()
        };
        let p = Product::create(ProductId::from("t"), input, RequiredFields::Full).unwrap();
        assert!(!p.in_stock());
    }

    #[test]
    fn create_full_reports_all_missing_fields() {
        let input = NewProduct {
            name: Some("Tablet".to_string()),
            ..NewProduct::default()
        };
        let err = Product::create(ProductId::from("t"), input, RequiredFields::Full).unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingFields(vec!["description", "price", "category"])
        );
    }

    #[test]
    fn create_treats_empty_name_and_zero_price_as_missing() {
        let input = NewProduct {
            name: Some(String::new()),
            price: Some(0.0),
            ..full_input()
        };
        let err = Product::create(ProductId::from("t"), input, RequiredFields::Full).unwrap_err();
        assert_eq!(err, DomainError::MissingFields(vec!["name", "price"]));
    }

    #[test]
    fn create_minimal_needs_only_name_and_price() {
        let input = NewProduct {
            name: Some("Pen".to_string()),
            price: Some(2.5),
            ..NewProduct::default()
        };
        let p = Product::create(ProductId::from("t"), input, RequiredFields::Minimal).unwrap();
        assert_eq!(p.description(), None);
        assert_eq!(p.category(), None);
    }

    #[test]
    fn minimal_product_omits_optional_fields_in_json() {
        let p = Product::new("9", "Pen", 2.5);
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("category").is_none());
        assert_eq!(json["inStock"], serde_json::json!(true));
    }

    #[test]
    fn whole_prices_serialize_as_integers() {
        let json = serde_json::to_string(&laptop()).unwrap();
        assert!(json.contains(r#""price":1200,"#), "{json}");

        let pen = serde_json::to_value(Product::new("9", "Pen", 2.5)).unwrap();
        assert_eq!(pen["price"], serde_json::json!(2.5));

        let free = serde_json::to_value(Product::new("0", "Sticker", -0.0)).unwrap();
        assert_eq!(free["price"], serde_json::json!(0));
    }

    #[test]
    fn patch_distinguishes_absent_null_and_value() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"name":"New","description":null}"#).unwrap();
        assert_eq!(patch.name, Patch::Value("New".to_string()));
        assert_eq!(patch.description, Patch::Null);
        assert!(patch.price.is_absent());
        assert!(patch.in_stock.is_absent());
    }

    #[test]
    fn truthy_policy_ignores_zero_price_and_empty_strings() {
        let mut p = laptop();
        let patch: ProductPatch =
            serde_json::from_str(r#"{"name":"","price":0,"category":null}"#).unwrap();
        p.apply(patch, UpdatePolicy::Truthy).unwrap();
        assert_eq!(p, laptop());
    }

    #[test]
    fn truthy_policy_overwrites_in_stock_with_false() {
        let mut p = laptop();
        let patch: ProductPatch = serde_json::from_str(r#"{"inStock":false}"#).unwrap();
        p.apply(patch, UpdatePolicy::Truthy).unwrap();
        assert!(!p.in_stock());
    }

    #[test]
    fn present_policy_overwrites_falsy_values_and_clears_optionals() {
        let mut p = laptop();
        let patch: ProductPatch =
            serde_json::from_str(r#"{"price":0,"description":"","category":null}"#).unwrap();
        p.apply(patch, UpdatePolicy::Present).unwrap();
        assert_eq!(p.price(), 0.0);
        assert_eq!(p.description(), Some(""));
        assert_eq!(p.category(), None);
        assert_eq!(p.name(), "Laptop");
    }

    #[test]
    fn present_policy_rejects_clearing_required_fields_without_mutating() {
        let mut p = laptop();
        let patch: ProductPatch =
            serde_json::from_str(r#"{"name":"Other","price":null}"#).unwrap();
        let err = p.apply(patch, UpdatePolicy::Present).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(p, laptop());
    }

    #[test]
    fn null_in_stock_keeps_previous_value() {
        let mut p = laptop().with_in_stock(false);
        let patch: ProductPatch = serde_json::from_str(r#"{"inStock":null}"#).unwrap();
        p.apply(patch, UpdatePolicy::Present).unwrap();
        assert!(!p.in_stock());
    }
}
