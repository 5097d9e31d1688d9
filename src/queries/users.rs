use mongodb::bson::{self, oid::ObjectId, Document};

use crate::{
    database::{DocumentStore, USERS},
    error::Result,
    models::users::{NewUser, UpdateUserRequest, User},
};

/// Creates a new user in the store.
///
/// The password is stored as given; credential hashing happens upstream.
pub async fn create_user(store: &dyn DocumentStore, new_user: NewUser) -> Result<User> {
    let document = store.insert(USERS, bson::to_document(&new_user)?).await?;
    Ok(bson::from_document(document)?)
}

/// Gets a user's raw document by their ID. The user may not exist.
///
/// Returned untyped: user documents are written by other services too and
/// need not match [`User`].
pub async fn get_user_document(store: &dyn DocumentStore, id: &ObjectId) -> Result<Option<Document>> {
    store.find_by_id(USERS, id).await
}

/// Overwrites the provided fields. Returns whether the user exists.
pub async fn update_user(
    store: &dyn DocumentStore,
    id: &ObjectId,
    update: &UpdateUserRequest,
) -> Result<bool> {
    let document = store.update_by_id(USERS, id, bson::to_document(update)?).await?;
    Ok(document.is_some())
}
