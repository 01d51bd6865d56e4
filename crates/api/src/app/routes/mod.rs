use axum::{Router, routing::get};

pub mod categories;
pub mod products;
pub mod system;

/// Router for all catalog endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .route("/cooperatives/:id/products", get(products::by_cooperative))
        .route("/artisans/:id/products", get(products::by_artisan))
}
