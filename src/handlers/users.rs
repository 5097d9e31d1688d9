//! User handlers
//!
//! Read with password redaction and self-service update.

use axum::{
    extract::{Extension, Path},
    Json,
};
use axum_extra::extract::WithRejection;

use super::log_handler_error;
use crate::{
    database::ConnectedStore,
    error::{Error, Result},
    models::{responses::ApiResponse, users::PublicUser},
    services::users,
};

/// GET /api/users/{id}
///
/// # HTTP Status Codes
/// - `200 OK`: User without its password
/// - `404 NOT_FOUND`: Unknown id
pub async fn get_user(
    Extension(store): Extension<ConnectedStore>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PublicUser>>> {
    let user = users::get_user(&*store, &id)
        .await
        .inspect_err(|e| log_handler_error("get_user", e))?;

    Ok(Json(ApiResponse::data(user)))
}

/// PUT /api/users/{id}
///
/// # Request Body
/// - `userId`: must equal `{id}`
/// - `username`, `email`, `password`: optional fields to overwrite
///
/// # HTTP Status Codes
/// - `200 OK`: Account updated
/// - `403 FORBIDDEN`: `userId` differs from `{id}`
/// - `404 NOT_FOUND`: Unknown id
pub async fn update_user(
    Extension(store): Extension<ConnectedStore>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<serde_json::Value>, Error>,
) -> Result<Json<ApiResponse<()>>> {
    users::update_user(&*store, &id, payload)
        .await
        .inspect_err(|e| log_handler_error("update_user", e))?;

    Ok(Json(ApiResponse::message("Account has been updated")))
}
