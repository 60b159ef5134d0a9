use axum::{Router, routing::get};

pub mod products;
pub mod system;

/// Router for all endpoints behind the auth middleware.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/api/products", products::router())
}
