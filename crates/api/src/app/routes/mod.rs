use axum::{routing::get, Router};

pub mod products;
pub mod system;

/// Router for every endpoint, without layers.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::welcome))
        .route("/health", get(system::health))
        .merge(products::router())
}
