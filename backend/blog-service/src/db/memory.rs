//! In-process document store.
//!
//! Keeps every collection in memory behind a single lock. Unique fields are
//! checked and the document inserted under the same write guard, so two
//! concurrent inserts of the same value cannot both succeed.

use super::{filter, stamp_timestamps, Collection, DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug)]
pub struct InMemoryStore {
    name: String,
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    unique_fields: HashMap<Collection, Vec<&'static str>>,
}

impl InMemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(HashMap::new()),
            unique_fields: HashMap::new(),
        }
    }

    /// Reject inserts whose `field` value already exists in `collection`.
    pub fn with_unique_field(mut self, collection: Collection, field: &'static str) -> Self {
        self.unique_fields.entry(collection).or_default().push(field);
        self
    }

    /// Store configured like the MongoDB deployment (unique post slugs).
    pub fn for_blog(name: impl Into<String>) -> Self {
        Self::new(name).with_unique_field(Collection::BlogPost, "slug")
    }

    fn check_unique(
        &self,
        collection: Collection,
        existing: &[Document],
        fields: &Document,
    ) -> StoreResult<()> {
        let Some(unique) = self.unique_fields.get(&collection) else {
            return Ok(());
        };
        for field in unique {
            let Some(value) = fields.get(*field) else {
                continue;
            };
            if existing.iter().any(|doc| doc.get(*field) == Some(value)) {
                return Err(StoreError::DuplicateKey {
                    collection: collection.name().to_string(),
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create_document(
        &self,
        collection: Collection,
        mut fields: Document,
    ) -> StoreResult<String> {
        let id = ObjectId::new();
        fields.insert("_id", Bson::ObjectId(id));
        stamp_timestamps(&mut fields);

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        self.check_unique(collection, docs, &fields)?;
        docs.push(fields);

        Ok(id.to_hex())
    }

    async fn get_documents(
        &self,
        collection: Collection,
        filter: Document,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Document>> {
        let limit = match limit {
            Some(n) => usize::try_from(n).unwrap_or(0),
            None => usize::MAX,
        };
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut found = Vec::new();
        for doc in docs {
            if found.len() >= limit {
                break;
            }
            if filter::matches(doc, &filter)? {
                found.push(doc.clone());
            }
        }
        Ok(found)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        Ok(self
            .get_documents(collection, filter, Some(1))
            .await?
            .into_iter()
            .next())
    }

    fn database_name(&self) -> String {
        self.name.clone()
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let collections = self.collections.read().await;
        let mut names: Vec<String> = collections
            .keys()
            .map(|collection| collection.name().to_string())
            .collect();
        names.sort();
        Ok(names)
    }
}
