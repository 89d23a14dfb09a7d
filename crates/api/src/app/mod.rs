//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use catalog_products::ProductCatalog;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
///
/// The catalog is passed in rather than created here so callers decide what
/// it starts with.
pub fn build_app(config: &ApiConfig, catalog: Arc<ProductCatalog>) -> Router {
    let cors = middleware::CorsState::new(config.cors_origin.clone());

    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                cors,
                middleware::cors_middleware,
            ))
            .layer(Extension(catalog)),
    )
}
