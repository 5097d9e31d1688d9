//! Contact message handlers
//!
//! Public submission plus the admin-facing list, update and delete
//! operations. Handlers validate nothing themselves: they extract, delegate
//! to `services::contacts`, and wrap the result in the envelope.

use axum::{
    extract::{Extension, Path},
    Json,
};
use axum_extra::extract::WithRejection;

use super::log_handler_error;
use crate::{
    database::ConnectedStore,
    error::{Error, Result},
    models::{
        contacts::{ContactMessage, SubmitContactRequest, UpdateContactRequest},
        responses::ApiResponse,
    },
    services::contacts,
};

// ============================================================================
// SUBMIT CONTACT MESSAGE
// ============================================================================

/// POST /api/contact
///
/// # Request Body
/// - `name`, `email`, `message`: required, non-empty
///
/// # HTTP Status Codes
/// - `200 OK`: Message stored with status `unread`
/// - `400 BAD_REQUEST`: Missing field
/// - `500 INTERNAL_SERVER_ERROR`: Database error
/// - `503 SERVICE_UNAVAILABLE`: Database unreachable
pub async fn submit_contact(
    Extension(store): Extension<ConnectedStore>,
    WithRejection(Json(request), _): WithRejection<Json<SubmitContactRequest>, Error>,
) -> Result<Json<ApiResponse<ContactMessage>>> {
    let contact = contacts::submit_contact(&*store, request)
        .await
        .inspect_err(|e| log_handler_error("submit_contact", e))?;

    Ok(Json(ApiResponse::data(contact).with_message("Message sent successfully")))
}

// ============================================================================
// LIST CONTACT MESSAGES
// ============================================================================

/// GET /api/contact
///
/// Returns every message, most recent first.
pub async fn list_contacts(
    Extension(store): Extension<ConnectedStore>,
) -> Result<Json<ApiResponse<Vec<ContactMessage>>>> {
    let messages = contacts::list_contacts(&*store)
        .await
        .inspect_err(|e| log_handler_error("list_contacts", e))?;

    Ok(Json(ApiResponse::data(messages)))
}

// ============================================================================
// UPDATE CONTACT MESSAGE
// ============================================================================

/// PUT /api/contact/{id}
///
/// Marks a message read (`{"status": "read"}`) or edits its fields.
///
/// # HTTP Status Codes
/// - `200 OK`: Updated record returned
/// - `400 BAD_REQUEST`: Blank field or `read -> unread`
/// - `404 NOT_FOUND`: Unknown id
pub async fn update_contact(
    Extension(store): Extension<ConnectedStore>,
    Path(id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateContactRequest>, Error>,
) -> Result<Json<ApiResponse<ContactMessage>>> {
    tracing::debug!(operation = "update_contact", contact_id = %id, "Updating contact message");

    let contact = contacts::update_contact(&*store, &id, request)
        .await
        .inspect_err(|e| log_handler_error("update_contact", e))?;

    Ok(Json(ApiResponse::data(contact).with_message("Message updated successfully")))
}

// ============================================================================
// DELETE CONTACT MESSAGE
// ============================================================================

/// DELETE /api/contact/{id}
///
/// # HTTP Status Codes
/// - `200 OK`: Deleted
/// - `404 NOT_FOUND`: Unknown id
pub async fn delete_contact(
    Extension(store): Extension<ConnectedStore>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    contacts::delete_contact(&*store, &id)
        .await
        .inspect_err(|e| log_handler_error("delete_contact", e))?;

    Ok(Json(ApiResponse::message("Message deleted successfully")))
}
