use serde_json::Value;

use crate::{
    database::DocumentStore,
    error::{Error, Result, ValidationErrors},
    models::users::{PublicUser, UpdateUserRequest},
    queries::users,
    validation::{parse_object_id, reject_blank},
};

const NOT_FOUND: &str = "User not found";

/// Body field carrying the caller's own user id.
pub const CALLER_ID_FIELD: &str = "userId";

/// Fetches a user with the password removed.
pub async fn get_user(store: &dyn DocumentStore, id: &str) -> Result<PublicUser> {
    let user_id = parse_object_id(id, NOT_FOUND)?;

    let document = users::get_user_document(store, &user_id)
        .await?
        .ok_or_else(|| Error::NotFound(NOT_FOUND.to_string()))?;

    Ok(PublicUser::from(document))
}

/// Self-service update of a user record.
///
/// The body must carry `userId` equal to the path id; otherwise the call is
/// forbidden before anything else in the body is looked at. This is an
/// identity match, not authentication.
pub async fn update_user(store: &dyn DocumentStore, id: &str, payload: Value) -> Result<()> {
    let caller_id = payload.get(CALLER_ID_FIELD).and_then(Value::as_str);
    if caller_id != Some(id) {
        tracing::warn!(user_id = %id, caller_id = ?caller_id, "Rejected update of another user's account");
        return Err(Error::Forbidden("You can update only your account!".to_string()));
    }

    let user_id = parse_object_id(id, NOT_FOUND)?;

    let request: UpdateUserRequest = serde_json::from_value(payload)
        .map_err(|e| Error::Validation(ValidationErrors::Message(e.to_string())))?;

    reject_blank("username", &request.username)?;
    reject_blank("email", &request.email)?;
    reject_blank("password", &request.password)?;

    if !users::update_user(store, &user_id, &request).await? {
        return Err(Error::NotFound(NOT_FOUND.to_string()));
    }

    tracing::info!(user_id = %user_id, "User account updated");
    Ok(())
}
