use axum::{Json, Router, extract::Path, http::StatusCode, response::IntoResponse, routing::get};

use souk_catalog::Category;

use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories))
        .route("/:slug", get(get_category))
}

pub async fn list_categories() -> Json<&'static [Category]> {
    Json(Category::all())
}

pub async fn get_category(Path(slug): Path<String>) -> axum::response::Response {
    match Category::by_slug(&slug) {
        Some(category) => Json(category).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", format!("category {slug}")),
    }
}
