use super::{to_utc, Identified};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    /// URL-friendly identifier (uniqueness is not enforced)
    pub slug: String,
    pub description: Option<String>,
}

/// Category as stored in the `category` collection
#[derive(Debug, Deserialize)]
pub struct CategoryDocument {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: Option<bson::DateTime>,
    pub updated_at: Option<bson::DateTime>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Identified<CategoryDocument>> for CategoryResponse {
    fn from(doc: Identified<CategoryDocument>) -> Self {
        let Identified { id, fields } = doc;
        Self {
            id,
            name: fields.name,
            slug: fields.slug,
            description: fields.description,
            created_at: to_utc(fields.created_at),
            updated_at: to_utc(fields.updated_at),
        }
    }
}
