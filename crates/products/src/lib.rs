//! Products domain module.
//!
//! The product record, its create/patch inputs, list queries with pagination,
//! and the in-memory `ProductCatalog` that owns the collection. Pure logic:
//! no HTTP, no IO.

pub mod catalog;
pub mod product;
pub mod query;
pub mod settings;

pub use catalog::{ProductCatalog, seed_products};
pub use product::{NewProduct, Patch, Product, ProductPatch};
pub use query::{DEFAULT_LIMIT, DEFAULT_PAGE, Pagination, ProductFilter, ProductPage, ProductQuery};
pub use settings::{CatalogSettings, RequiredFields, UpdatePolicy};
