use axum::http::StatusCode;

pub const WELCOME_TEXT: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

pub async fn welcome() -> &'static str {
    WELCOME_TEXT
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
