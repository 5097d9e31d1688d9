//! MongoDB adapter.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{ClientOptions, ReturnDocument},
    Client, Collection, Database,
};
use secrecy::{ExposeSecret, SecretString};

use super::{
    strip_reserved_fields, DocumentStore, SortOrder, UpdateGuard, CREATED_AT_FIELD, ID_FIELD,
    UPDATED_AT_FIELD,
};
use crate::{config::DatabaseConfig, error::Result};

/// Document store backed by a MongoDB database.
///
/// The driver connects lazily; constructing the store does not touch the
/// network. Use [`DocumentStore::ping`] (or `connect_with_retry`) to verify
/// reachability.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Parses the connection string and prepares a client.
    ///
    /// The database named in the connection string wins over
    /// `config.name`.
    pub async fn new(uri: &SecretString, config: &DatabaseConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(uri.expose_secret()).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.connect_timeout());

        let client = Client::with_options(options)?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.name));

        tracing::debug!(database = %database.name(), "MongoDB client prepared");

        Ok(Self { database })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn insert(&self, collection: &str, mut document: Document) -> Result<Document> {
        strip_reserved_fields(&mut document);

        let now = DateTime::now();
        let mut stored = doc! { ID_FIELD: ObjectId::new() };
        for (key, value) in document {
            stored.insert(key, value);
        }
        stored.insert(CREATED_AT_FIELD, now);
        stored.insert(UPDATED_AT_FIELD, now);

        self.collection(collection).insert_one(&stored).await?;
        Ok(stored)
    }

    async fn find_all(&self, collection: &str, order: SortOrder) -> Result<Vec<Document>> {
        let records = self.collection(collection);
        let find = records.find(doc! {});
        let cursor = match order {
            SortOrder::Natural => find.await?,
            SortOrder::NewestFirst => {
                find.sort(doc! { CREATED_AT_FIELD: -1, ID_FIELD: -1 }).await?
            }
        };

        let documents = cursor.try_collect::<Vec<_>>().await?;
        Ok(documents)
    }

    async fn find_by_id(&self, collection: &str, id: &ObjectId) -> Result<Option<Document>> {
        let document = self
            .collection(collection)
            .find_one(doc! { ID_FIELD: *id })
            .await?;
        Ok(document)
    }

    async fn update_where(
        &self,
        collection: &str,
        id: &ObjectId,
        guard: UpdateGuard,
        mut fields: Document,
    ) -> Result<Option<Document>> {
        strip_reserved_fields(&mut fields);
        fields.insert(UPDATED_AT_FIELD, DateTime::now());

        let mut filter = doc! { ID_FIELD: *id };
        if let UpdateGuard::FieldNotEqual { field, value } = guard {
            filter.insert(field, doc! { "$ne": value });
        }

        let document = self
            .collection(collection)
            .find_one_and_update(filter, doc! { "$set": fields })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(document)
    }

    async fn delete_by_id(&self, collection: &str, id: &ObjectId) -> Result<bool> {
        let result = self
            .collection(collection)
            .delete_one(doc! { ID_FIELD: *id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
