use axum::Json;
use axum::http::StatusCode;
use database::error::StoreError;
use serde_json::{Map, Value, json};

/// Status and JSON body of a failed request
pub type ApiError = (StatusCode, Json<Value>);

/// Maps store failures onto the HTTP error surface.
///
/// Field-level failures become a 400 whose body keys the message list by
/// field name. Missing rows become a 404, and anything from the database
/// itself is logged and hidden behind a plain 500.
pub fn api_error(err: StoreError) -> ApiError {
    match err {
        StoreError::Validation { field, message }
        | StoreError::Uniqueness { field, message }
        | StoreError::Reference { field, message } => {
            let mut body = Map::new();
            body.insert(field.to_owned(), json!([message]));
            (StatusCode::BAD_REQUEST, Json(Value::Object(body)))
        }
        StoreError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Not found." })),
        ),
        StoreError::Database(err) => {
            log::error!("database error: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "internal server error" })),
            )
        }
    }
}
