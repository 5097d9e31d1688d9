use crate::{
    database::DocumentStore,
    error::{Error, Result},
    models::contacts::{ContactMessage, ContactStatus, NewContact, SubmitContactRequest, UpdateContactRequest},
    queries::contacts,
    validation::{parse_object_id, reject_blank, require_fields},
};

const NOT_FOUND: &str = "Message not found";

/// Stores a contact form submission as an unread message.
///
/// `name`, `email` and `message` must all be present and non-blank; nothing
/// is written otherwise.
pub async fn submit_contact(store: &dyn DocumentStore, request: SubmitContactRequest) -> Result<ContactMessage> {
    require_fields(&[
        ("name", &request.name),
        ("email", &request.email),
        ("message", &request.message),
    ])?;

    let new_contact = NewContact {
        name: trimmed(request.name),
        email: trimmed(request.email),
        message: trimmed(request.message),
        status: ContactStatus::Unread,
    };

    let contact = contacts::create_contact(store, new_contact).await?;

    tracing::info!(contact_id = %contact.id, "Contact message submitted");
    Ok(contact)
}

/// Lists all contact messages, most recent first.
pub async fn list_contacts(store: &dyn DocumentStore) -> Result<Vec<ContactMessage>> {
    contacts::list_contacts(store).await
}

/// Overwrites the allow-listed fields of a message.
///
/// Also used to mark a message as read. A read message cannot go back to
/// unread; repeating `read` is a no-op on the status.
pub async fn update_contact(
    store: &dyn DocumentStore,
    id: &str,
    request: UpdateContactRequest,
) -> Result<ContactMessage> {
    let contact_id = parse_object_id(id, NOT_FOUND)?;

    reject_blank("name", &request.name)?;
    reject_blank("email", &request.email)?;
    reject_blank("message", &request.message)?;

    let existing = contacts::get_contact_by_id(store, &contact_id)
        .await?
        .ok_or_else(|| Error::NotFound(NOT_FOUND.to_string()))?;

    if let Some(next) = request.status {
        if !existing.status.can_transition_to(next) {
            return Err(transition_error(existing.status, next));
        }
    }

    if request.is_empty() {
        return Ok(existing);
    }

    let Some(updated) = contacts::update_contact(store, &contact_id, &request).await? else {
        // Deleted, or marked read, after it was loaded above
        return match contacts::get_contact_by_id(store, &contact_id).await? {
            Some(current) => Err(transition_error(current.status, ContactStatus::Unread)),
            None => Err(Error::NotFound(NOT_FOUND.to_string())),
        };
    };

    tracing::info!(contact_id = %updated.id, status = %updated.status, "Contact message updated");
    Ok(updated)
}

/// Deletes a message. Unknown ids are `NotFound`.
pub async fn delete_contact(store: &dyn DocumentStore, id: &str) -> Result<()> {
    let contact_id = parse_object_id(id, NOT_FOUND)?;

    if !contacts::delete_contact(store, &contact_id).await? {
        return Err(Error::NotFound(NOT_FOUND.to_string()));
    }

    tracing::info!(contact_id = %contact_id, "Contact message deleted");
    Ok(())
}

fn transition_error(current: ContactStatus, next: ContactStatus) -> Error {
    Error::field(
        "status",
        format!("cannot change status from {} to {}", current, next),
    )
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
