use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use souk_infra::CatalogError;

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::DataUnavailable(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "data_unavailable", msg)
        }
        CatalogError::InvalidParameter(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_parameter", msg)
        }
        CatalogError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
