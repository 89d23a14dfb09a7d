use serde::{Deserialize, Serialize};

use catalog_core::DomainResult;
use catalog_products::{Pagination, Product, ProductFilter, ProductQuery};

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /api/products`.
///
/// `page` and `limit` stay raw strings here so malformed values surface as a
/// descriptive `invalid_query` error instead of a generic rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListProductsQuery {
    pub fn into_query(self) -> DomainResult<ProductQuery> {
        Ok(ProductQuery {
            filter: ProductFilter::new(self.name.as_deref(), self.category.as_deref()),
            pagination: Pagination::parse(self.page.as_deref(), self.limit.as_deref())?,
        })
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct DeletedProductResponse {
    pub message: &'static str,
    pub product: Product,
}

impl DeletedProductResponse {
    pub fn new(product: Product) -> Self {
        Self {
            message: "Product deleted successfully",
            product,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::DomainError;

    #[test]
    fn empty_query_uses_default_pagination() {
        let q = ListProductsQuery::default().into_query().unwrap();
        assert_eq!(q, ProductQuery::default());
    }

    #[test]
    fn malformed_limit_is_rejected() {
        let raw = ListProductsQuery {
            limit: Some("lots".to_string()),
            ..ListProductsQuery::default()
        };
        assert!(matches!(
            raw.into_query(),
            Err(DomainError::InvalidQuery { param: "limit", .. })
        ));
    }
}
