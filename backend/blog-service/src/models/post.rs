use super::{to_utc, Identified};
use crate::db::DEFAULT_LIMIT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

fn default_author() -> Option<String> {
    Some("Admin".to_string())
}

fn default_published() -> bool {
    true
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Request body for creating a blog post.
///
/// `published_at` is not accepted; it is stamped server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    /// Must be unique among posts
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    /// Category slug
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_author")]
    pub author: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

/// Blog post as stored in the `blogpost` collection
#[derive(Debug, Deserialize)]
pub struct BlogPostDocument {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
    pub published_at: Option<bson::DateTime>,
    pub created_at: Option<bson::DateTime>,
    pub updated_at: Option<bson::DateTime>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BlogPostResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Identified<BlogPostDocument>> for BlogPostResponse {
    fn from(doc: Identified<BlogPostDocument>) -> Self {
        let Identified { id, fields } = doc;
        Self {
            id,
            title: fields.title,
            slug: fields.slug,
            excerpt: fields.excerpt,
            content: fields.content,
            cover_image: fields.cover_image,
            category: fields.category,
            tags: fields.tags,
            author: fields.author,
            published: fields.published,
            published_at: to_utc(fields.published_at),
            created_at: to_utc(fields.created_at),
            updated_at: to_utc(fields.updated_at),
        }
    }
}

/// Query parameters for listing posts
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPostsQuery {
    /// Exact category slug
    pub category: Option<String>,
    /// Posts whose tags contain this value
    pub tag: Option<String>,
    /// Case-insensitive substring of title, excerpt or content
    pub q: Option<String>,
    /// Maximum number of posts returned
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    #[param(default = 20, minimum = 1)]
    pub limit: i64,
}

impl Default for ListPostsQuery {
    fn default() -> Self {
        Self {
            category: None,
            tag: None,
            q: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults() {
        let req: CreatePostRequest = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "slug": "hello",
            "content": "body",
        }))
        .unwrap();

        assert!(req.tags.is_empty());
        assert_eq!(req.author.as_deref(), Some("Admin"));
        assert!(req.published);
        assert!(req.excerpt.is_none());
    }

    #[test]
    fn explicit_null_author_is_kept() {
        let req: CreatePostRequest = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "slug": "hello",
            "content": "body",
            "author": null,
            "published": false,
        }))
        .unwrap();

        assert!(req.author.is_none());
        assert!(!req.published);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result: Result<CreatePostRequest, _> =
            serde_json::from_value(serde_json::json!({ "title": "Hello", "content": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn limit_must_be_positive() {
        let query = ListPostsQuery {
            limit: 0,
            ..Default::default()
        };
        assert!(query.validate().is_err());
        assert!(ListPostsQuery::default().validate().is_ok());
    }
}
