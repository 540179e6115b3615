/// Database access layer
///
/// This module provides:
/// - The `DocumentStore` abstraction over a document database
/// - `MongoStore`, backed by a MongoDB database handle
/// - `InMemoryStore`, an in-process store for tests and local runs
/// - The explicit mapping of entity types to collection names
use async_trait::async_trait;
use bson::Document;
use thiserror::Error;

pub mod filter;
pub mod memory;
pub mod mongo;

pub use memory::InMemoryStore;
pub use mongo::MongoStore;

/// Default number of documents returned by `get_documents`.
pub const DEFAULT_LIMIT: i64 = 20;

/// Storage collections, one per entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Category,
    BlogPost,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Category => "category",
            Collection::BlogPost => "blogpost",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field already holds the inserted value
    #[error("duplicate value for unique field '{field}' in '{collection}'")]
    DuplicateKey { collection: String, field: String },

    /// The filter uses an operator this store cannot evaluate
    #[error("unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Connectivity or query failure
    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Generic document store operations.
///
/// Every inserted document receives a store-generated `_id` (an `ObjectId`).
/// Callers never supply `_id` themselves.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `fields` as a new document and return its identifier as a string.
    async fn create_document(&self, collection: Collection, fields: Document)
        -> StoreResult<String>;

    /// Documents matching `filter` in storage order, at most `limit` of them
    /// when a limit is given.
    async fn get_documents(
        &self,
        collection: Collection,
        filter: Document,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Document>>;

    /// First document matching `filter`.
    async fn find_one(&self, collection: Collection, filter: Document)
        -> StoreResult<Option<Document>>;

    /// Name of the underlying database.
    fn database_name(&self) -> String;

    /// Names of the collections currently present.
    async fn list_collection_names(&self) -> StoreResult<Vec<String>>;
}

/// Set `created_at` and `updated_at` to the current UTC time.
pub(crate) fn stamp_timestamps(fields: &mut Document) {
    let now = bson::DateTime::now();
    fields.insert("created_at", now);
    fields.insert("updated_at", now);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_are_explicit() {
        assert_eq!(Collection::Category.name(), "category");
        assert_eq!(Collection::BlogPost.name(), "blogpost");
        assert_eq!(Collection::BlogPost.to_string(), "blogpost");
    }
}
