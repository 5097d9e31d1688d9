//! In-process document store.
//!
//! Keeps documents in insertion order per collection. Used by the test suite
//! and selected at runtime with `database.uri = "memory://"`.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime, Document};
use tokio::sync::RwLock;

use super::{
    strip_reserved_fields, DocumentStore, SortOrder, UpdateGuard, CREATED_AT_FIELD, ID_FIELD,
    UPDATED_AT_FIELD,
};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn matches_id(document: &Document, id: &ObjectId) -> bool {
    document.get_object_id(ID_FIELD).is_ok_and(|stored| &stored == id)
}

/// Sort key for newest-first ordering: creation time, then id.
fn creation_key(document: &Document) -> (Option<DateTime>, Option<ObjectId>) {
    (
        document.get_datetime(CREATED_AT_FIELD).ok().copied(),
        document.get_object_id(ID_FIELD).ok(),
    )
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, collection: &str, mut document: Document) -> Result<Document> {
        strip_reserved_fields(&mut document);

        let now = DateTime::now();
        let mut stored = Document::new();
        stored.insert(ID_FIELD, ObjectId::new());
        for (key, value) in document {
            stored.insert(key, value);
        }
        stored.insert(CREATED_AT_FIELD, now);
        stored.insert(UPDATED_AT_FIELD, now);

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(stored.clone());

        Ok(stored)
    }

    async fn find_all(&self, collection: &str, order: SortOrder) -> Result<Vec<Document>> {
        let mut documents = self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default();

        if order == SortOrder::NewestFirst {
            documents.sort_by(|a, b| creation_key(b).cmp(&creation_key(a)));
        }

        Ok(documents)
    }

    async fn find_by_id(&self, collection: &str, id: &ObjectId) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        let found = collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|document| matches_id(document, id)))
            .cloned();
        Ok(found)
    }

    async fn update_where(
        &self,
        collection: &str,
        id: &ObjectId,
        guard: UpdateGuard,
        mut fields: Document,
    ) -> Result<Option<Document>> {
        strip_reserved_fields(&mut fields);

        // Lookup, guard check and write all happen under one write lock
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|document| matches_id(document, id)))
            .filter(|document| guard.allows(document))
        else {
            return Ok(None);
        };

        for (key, value) in fields {
            document.insert(key, value);
        }

        // Never let updatedAt fall behind createdAt, even if the clock steps back
        let mut updated_at = DateTime::now();
        if let Ok(created_at) = document.get_datetime(CREATED_AT_FIELD) {
            if *created_at > updated_at {
                updated_at = *created_at;
            }
        }
        document.insert(UPDATED_AT_FIELD, updated_at);

        Ok(Some(document.clone()))
    }

    async fn delete_by_id(&self, collection: &str, id: &ObjectId) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(false);
        };

        let before = documents.len();
        documents.retain(|document| !matches_id(document, id));
        Ok(documents.len() < before)
    }
}
