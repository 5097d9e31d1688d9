//! Document store access
//!
//! The API talks to persistence through the [`DocumentStore`] trait, which
//! works on untyped BSON documents keyed by collection name. Typed
//! conversion lives in `queries`. Two adapters exist: [`MongoStore`] for a
//! real MongoDB deployment and [`MemoryStore`] for tests and local runs.

pub mod memory;
pub mod mongo;
pub mod retry;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::error::Result;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use retry::{connect_with_retry, RetryPolicy};

/// Collection holding contact form submissions.
pub const CONTACTS: &str = "contacts";
/// Collection holding portfolio projects.
pub const PROJECTS: &str = "projects";
/// Collection holding user accounts.
pub const USERS: &str = "users";

/// Field names the store owns. Callers can never write them.
pub const ID_FIELD: &str = "_id";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Ordering applied by [`DocumentStore::find_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Whatever order the backend returns.
    Natural,
    /// Most recently created first, ties broken by id.
    NewestFirst,
}

/// Condition an update is applied under.
///
/// Stores check it in the same atomic operation as the write, so a guarded
/// update never lands on a document that changed after it was read.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateGuard {
    /// Update whenever the document exists.
    Always,
    /// Update only while `field` does not hold `value`.
    FieldNotEqual { field: &'static str, value: Bson },
}

impl UpdateGuard {
    /// Whether a document currently satisfies the guard.
    pub fn allows(&self, document: &Document) -> bool {
        match self {
            UpdateGuard::Always => true,
            UpdateGuard::FieldNotEqual { field, value } => document.get(*field) != Some(value),
        }
    }
}

/// Asynchronous document store operating on one document at a time.
///
/// Implementations assign `_id`, `createdAt` and `updatedAt`; they strip any
/// caller-supplied values for those fields.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Round trip to the backend to prove it is reachable.
    async fn ping(&self) -> Result<()>;

    /// Inserts a document and returns it as stored.
    async fn insert(&self, collection: &str, document: Document) -> Result<Document>;

    /// Returns every document of the collection.
    async fn find_all(&self, collection: &str, order: SortOrder) -> Result<Vec<Document>>;

    async fn find_by_id(&self, collection: &str, id: &ObjectId) -> Result<Option<Document>>;

    /// Overwrites the given fields (`$set` semantics) when the document
    /// satisfies `guard`. Returns the updated document, or `None` when no
    /// document has this id or the guard rejected it.
    async fn update_where(
        &self,
        collection: &str,
        id: &ObjectId,
        guard: UpdateGuard,
        fields: Document,
    ) -> Result<Option<Document>>;

    /// Unconditional [`DocumentStore::update_where`].
    async fn update_by_id(
        &self,
        collection: &str,
        id: &ObjectId,
        fields: Document,
    ) -> Result<Option<Document>> {
        self.update_where(collection, id, UpdateGuard::Always, fields).await
    }

    /// Removes a document. Returns whether anything was deleted.
    async fn delete_by_id(&self, collection: &str, id: &ObjectId) -> Result<bool>;
}

/// Connection state reported by [`check_health`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreStatus {
    Connected,
    Unavailable,
}

/// Pings the store, if any, and reports whether it can serve requests.
pub async fn check_health(store: Option<&dyn DocumentStore>) -> StoreStatus {
    let Some(store) = store else {
        return StoreStatus::Unavailable;
    };

    match store.ping().await {
        Ok(()) => StoreStatus::Connected,
        Err(e) => {
            tracing::warn!(error = %e, "Document store health check failed");
            StoreStatus::Unavailable
        }
    }
}

/// A store that passed its health check for the current request.
///
/// Inserted into request extensions by `middleware::store::require_store`.
#[derive(Clone)]
pub struct ConnectedStore(pub Arc<dyn DocumentStore>);

impl Deref for ConnectedStore {
    type Target = dyn DocumentStore;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Drops the store-owned fields from a caller document.
pub(crate) fn strip_reserved_fields(document: &mut Document) {
    document.remove(ID_FIELD);
    document.remove(CREATED_AT_FIELD);
    document.remove(UPDATED_AT_FIELD);
}
