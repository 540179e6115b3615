//! MongoDB-backed document store.

use super::{stamp_timestamps, Collection, DocumentStore, StoreError, StoreResult};
use crate::config::DatabaseConfig;
use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Build a client for `uri` and select the configured database.
    ///
    /// The driver connects lazily; the first operation surfaces an
    /// unreachable server.
    pub async fn connect(uri: &str, config: &DatabaseConfig) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await.map_err(backend)?;
        let uri_default = client.default_database().map(|db| db.name().to_string());
        let db = client.database(&config.resolve_name(uri_default.as_deref()));

        tracing::info!(database = %db.name(), "MongoDB client initialized");
        Ok(Self { db })
    }

    /// Create the unique index on post slugs.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("slug_unique".to_string())
                    .build(),
            )
            .build();

        self.collection(Collection::BlogPost)
            .create_index(index, None)
            .await
            .map_err(backend)?;

        tracing::info!(collection = %Collection::BlogPost, "Ensured unique slug index");
        Ok(())
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection::<Document>(collection.name())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn create_document(
        &self,
        collection: Collection,
        mut fields: Document,
    ) -> StoreResult<String> {
        stamp_timestamps(&mut fields);

        let result = self
            .collection(collection)
            .insert_one(fields, None)
            .await
            .map_err(|e| classify(collection, e))?;

        Ok(match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        })
    }

    async fn get_documents(
        &self,
        collection: Collection,
        filter: Document,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Document>> {
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self
            .collection(collection)
            .find(filter, options)
            .await
            .map_err(backend)?;

        cursor.try_collect().await.map_err(backend)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        self.collection(collection)
            .find_one(filter, None)
            .await
            .map_err(backend)
    }

    fn database_name(&self) -> String {
        self.db.name().to_string()
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        self.db.list_collection_names(None).await.map_err(backend)
    }
}

fn backend(err: mongodb::error::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn classify(collection: Collection, err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            StoreError::DuplicateKey {
                collection: collection.name().to_string(),
                field: "slug".to_string(),
            }
        }
        _ => backend(err),
    }
}
