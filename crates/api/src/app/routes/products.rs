use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use catalog_core::{Entity, ProductId};
use catalog_products::{NewProduct, ProductCatalog, ProductPatch};

use crate::app::{dto, errors};

/// Product routes, mounted at their full paths.
///
/// The collection also answers with a trailing slash (`/api/products/`).
pub fn router() -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/", get(list_products).post(create_product))
        .route(
            "/api/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn list_products(
    Extension(catalog): Extension<Arc<ProductCatalog>>,
    query: Result<Query<dto::ListProductsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(raw) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection_to_response(e),
    };
    let query = match raw.into_query() {
        Ok(q) => q,
        Err(e) => {
            tracing::warn!(error = %e, "rejected product listing");
            return errors::domain_error_to_response(e);
        }
    };

    let page = catalog.list(&query);
    tracing::debug!(
        total = page.total_products,
        page = page.current_page,
        returned = page.products.len(),
        "listed products"
    );
    (StatusCode::OK, Json(page)).into_response()
}

pub async fn get_product(
    Extension(catalog): Extension<Arc<ProductCatalog>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match catalog.get(&ProductId::from(id)) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(catalog): Extension<Arc<ProductCatalog>>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection_to_response(e),
    };

    match catalog.create(body) {
        Ok(product) => {
            tracing::info!(id = %product.id(), name = product.name(), "product created");
            (StatusCode::CREATED, Json(product)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "rejected product creation");
            errors::domain_error_to_response(e)
        }
    }
}

pub async fn update_product(
    Extension(catalog): Extension<Arc<ProductCatalog>>,
    Path(id): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> axum::response::Response {
    let Json(patch) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection_to_response(e),
    };
    let id = ProductId::from(id);

    match catalog.update(&id, patch) {
        Ok(product) => {
            tracing::info!(%id, "product updated");
            (StatusCode::OK, Json(product)).into_response()
        }
        Err(e) => {
            tracing::warn!(%id, error = %e, "rejected product update");
            errors::domain_error_to_response(e)
        }
    }
}

pub async fn delete_product(
    Extension(catalog): Extension<Arc<ProductCatalog>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = ProductId::from(id);

    match catalog.delete(&id) {
        Ok(product) => {
            tracing::info!(%id, remaining = catalog.len(), "product deleted");
            (StatusCode::OK, Json(dto::DeletedProductResponse::new(product))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
