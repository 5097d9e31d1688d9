use mongodb::bson::{self, oid::ObjectId, Bson};

use crate::{
    database::{DocumentStore, SortOrder, UpdateGuard, CONTACTS},
    error::Result,
    models::contacts::{ContactMessage, ContactStatus, NewContact, UpdateContactRequest},
};

/// Creates a new contact message in the store.
pub async fn create_contact(store: &dyn DocumentStore, new_contact: NewContact) -> Result<ContactMessage> {
    let document = store.insert(CONTACTS, bson::to_document(&new_contact)?).await?;
    Ok(bson::from_document(document)?)
}

/// Lists all contact messages, most recent first.
pub async fn list_contacts(store: &dyn DocumentStore) -> Result<Vec<ContactMessage>> {
    let documents = store.find_all(CONTACTS, SortOrder::NewestFirst).await?;
    let records = documents
        .into_iter()
        .map(bson::from_document)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Gets a single contact message by its ID. The message may not exist.
pub async fn get_contact_by_id(store: &dyn DocumentStore, id: &ObjectId) -> Result<Option<ContactMessage>> {
    let document = store.find_by_id(CONTACTS, id).await?;
    Ok(document.map(bson::from_document).transpose()?)
}

/// Overwrites the provided fields.
///
/// An update that sets `unread` only applies while the stored message is
/// not `read`. Returns `None` when the message does not exist or was
/// already read.
pub async fn update_contact(
    store: &dyn DocumentStore,
    id: &ObjectId,
    update: &UpdateContactRequest,
) -> Result<Option<ContactMessage>> {
    let guard = match update.status {
        Some(ContactStatus::Unread) => UpdateGuard::FieldNotEqual {
            field: "status",
            value: Bson::String(ContactStatus::Read.to_string()),
        },
        _ => UpdateGuard::Always,
    };

    let document = store
        .update_where(CONTACTS, id, guard, bson::to_document(update)?)
        .await?;
    Ok(document.map(bson::from_document).transpose()?)
}

/// Deletes a contact message by its ID. Returns whether it existed.
pub async fn delete_contact(store: &dyn DocumentStore, id: &ObjectId) -> Result<bool> {
    store.delete_by_id(CONTACTS, id).await
}
