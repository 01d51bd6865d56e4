use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use souk_infra::{CatalogService, ListProductsQuery};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/featured", get(featured_products))
        .route("/search", get(search_products))
        .route("/count", get(count_products))
        .route("/:id", get(get_product))
}

fn bad_query(rejection: QueryRejection) -> axum::response::Response {
    errors::json_error(StatusCode::BAD_REQUEST, "invalid_parameter", rejection.body_text())
}

pub async fn list_products(
    Extension(services): Extension<Arc<CatalogService>>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return bad_query(rejection),
    };

    match services.list_products(query.clone()).await {
        Ok(page) => {
            let default_page_size = services.config().default_page_size;
            Json(dto::ProductPageResponse::new(page, &query, default_page_size)).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn featured_products(Extension(services): Extension<Arc<CatalogService>>) -> axum::response::Response {
    match services.featured_products().await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn search_products(
    Extension(services): Extension<Arc<CatalogService>>,
    params: Result<Query<dto::SearchParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(rejection) => return bad_query(rejection),
    };

    match services.search_products(&params.q).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn count_products(
    Extension(services): Extension<Arc<CatalogService>>,
    params: Result<Query<dto::CountParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(rejection) => return bad_query(rejection),
    };

    match services.count_products(params.category.as_deref()).await {
        Ok(count) => Json(dto::CountResponse { count }).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<CatalogService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.get_product(&id).await {
        Ok(detail) => Json(detail).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn by_cooperative(
    Extension(services): Extension<Arc<CatalogService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.products_by_cooperative(&id).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn by_artisan(
    Extension(services): Extension<Arc<CatalogService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.products_by_artisan(&id).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}
