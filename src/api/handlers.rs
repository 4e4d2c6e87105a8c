use crate::api::errors::{api_error, ApiError};
use crate::db::{User, UserFields};
use crate::store::UserStore;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{Method, StatusCode};
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Store handle shared by all handlers
pub type SharedStore = Arc<dyn UserStore>;

/// Turns a decoded body into validated fields, or a 400
fn decode_fields(payload: Result<Json<UserFields>, JsonRejection>) -> Result<UserFields, ApiError> {
    let Json(fields) = payload.map_err(|rejection| {
        debug!("Rejected user payload: {}", rejection.body_text());
        api_error(StatusCode::BAD_REQUEST, &format!("Invalid user data: {}", rejection.body_text()))
    })?;
    Ok(fields.validate()?)
}

fn decode_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = id.map_err(|_| api_error(StatusCode::BAD_REQUEST, "Invalid user ID"))?;
    Ok(id)
}

/// Lists every stored user
#[axum::debug_handler]
pub async fn list_users(
    Extension(store): Extension<SharedStore>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(store.list().await?))
}

/// Creates a user from the JSON body and answers `201 Created` with the stored record
///
/// # Arguments
/// * `store` - Shared user store
/// * `payload` - JSON body with `name` and `email`; any `id` is ignored
#[axum::debug_handler]
pub async fn create_user(
    Extension(store): Extension<SharedStore>,
    payload: Result<Json<UserFields>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let fields = decode_fields(payload)?;
    let user = store.create(fields).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Retrieves a user by its ID
#[axum::debug_handler]
pub async fn get_user(
    Extension(store): Extension<SharedStore>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let id = decode_id(id)?;
    Ok(Json(store.get(id).await?))
}

/// Replaces the fields of a user; the id in the path always wins over one in the body
#[axum::debug_handler]
pub async fn update_user(
    Extension(store): Extension<SharedStore>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserFields>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = decode_id(id)?;
    let fields = decode_fields(payload)?;
    Ok(Json(store.update(id, fields).await?))
}

/// Deletes a user and answers `204 No Content`
#[axum::debug_handler]
pub async fn delete_user(
    Extension(store): Extension<SharedStore>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = decode_id(id)?;
    store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn status() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    api_error(
        StatusCode::METHOD_NOT_ALLOWED,
        &format!("Method {} not allowed", method),
    )
}

pub async fn route_not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "Route not found")
}
