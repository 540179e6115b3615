/// Data models for blog-service
///
/// This module defines:
/// - Request records accepted by the API
/// - Stored-document records read back from the document store
/// - Response records exposed by the API, carrying a public string `id`
///
/// The store's `_id` never crosses the API boundary: every outbound
/// document goes through [`into_public`].
use crate::error::{AppError, Result};
use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod admin;
pub mod category;
pub mod post;

pub use admin::{LoginRequest, LoginResponse};
pub use category::{CategoryDocument, CategoryResponse, CreateCategoryRequest};
pub use post::{BlogPostDocument, BlogPostResponse, CreatePostRequest, ListPostsQuery};

/// Response for create endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: String,
}

/// A stored document split into its public id and remaining fields.
#[derive(Debug)]
pub struct Identified<D> {
    pub id: String,
    pub fields: D,
}

/// Remove `_id` from `doc`, render it as a string and decode the rest.
pub fn identify<D: DeserializeOwned>(mut doc: Document) -> Result<Identified<D>> {
    let id = match doc.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s,
        Some(other) => other.to_string(),
        None => return Err(AppError::Internal("stored document has no _id".to_string())),
    };
    let fields = bson::from_document(doc)?;
    Ok(Identified { id, fields })
}

/// Map a stored document to its public response record.
pub fn into_public<D, R>(doc: Document) -> Result<R>
where
    D: DeserializeOwned,
    R: From<Identified<D>>,
{
    identify::<D>(doc).map(R::from)
}

pub(crate) fn to_utc(value: Option<bson::DateTime>) -> Option<DateTime<Utc>> {
    value.map(bson::DateTime::to_chrono)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn object_id_becomes_hex_string() {
        let oid = ObjectId::new();
        let identified: Identified<Named> =
            identify(doc! { "_id": oid, "name": "Rust" }).unwrap();

        assert_eq!(identified.id, oid.to_hex());
        assert_eq!(identified.id.len(), 24);
        assert_eq!(identified.fields.name, "Rust");
    }

    #[test]
    fn string_ids_pass_through() {
        let identified: Identified<Named> =
            identify(doc! { "_id": "custom", "name": "x" }).unwrap();
        assert_eq!(identified.id, "custom");
    }

    #[test]
    fn missing_id_is_an_internal_error() {
        let result = identify::<Named>(doc! { "name": "x" });
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
