/// Post service - handles post creation, listing and lookup by slug
use crate::db::{Collection, DocumentStore};
use crate::error::{AppError, Result};
use crate::models::{into_public, BlogPostDocument, BlogPostResponse, CreatePostRequest, ListPostsQuery};
use bson::{doc, Bson, Document};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct PostService {
    store: Arc<dyn DocumentStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a new post and return its public id.
    ///
    /// The slug is checked before the insert; the store's unique slug
    /// constraint catches a concurrent insert that slips past the check.
    pub async fn create_post(&self, req: CreatePostRequest) -> Result<String> {
        let existing = self
            .store
            .find_one(Collection::BlogPost, doc! { "slug": req.slug.as_str() })
            .await?;
        if existing.is_some() {
            tracing::warn!(slug = %req.slug, "Rejected post with duplicate slug");
            return Err(AppError::Conflict("Slug already exists".to_string()));
        }

        let slug = req.slug.clone();
        let fields = new_post_document(req, Utc::now())?;
        let id = self
            .store
            .create_document(Collection::BlogPost, fields)
            .await?;

        tracing::info!(post_id = %id, slug = %slug, "Post created");
        Ok(id)
    }

    /// List posts matching the query filters.
    pub async fn list_posts(&self, query: &ListPostsQuery) -> Result<Vec<BlogPostResponse>> {
        let filter = build_post_filter(query);
        tracing::debug!(?filter, limit = query.limit, "Listing posts");

        self.store
            .get_documents(Collection::BlogPost, filter, Some(query.limit))
            .await?
            .into_iter()
            .map(into_public::<BlogPostDocument, BlogPostResponse>)
            .collect()
    }

    /// Get a single post by exact slug.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<BlogPostResponse> {
        match self
            .store
            .find_one(Collection::BlogPost, doc! { "slug": slug })
            .await?
        {
            Some(doc) => into_public::<BlogPostDocument, BlogPostResponse>(doc),
            None => Err(AppError::NotFound("Post not found".to_string())),
        }
    }
}

/// Build the stored document for a new post.
///
/// Published posts are stamped with `now` as their publication time.
pub fn new_post_document(req: CreatePostRequest, now: DateTime<Utc>) -> Result<Document> {
    let published = req.published;
    let mut fields = bson::to_document(&req)?;
    if published {
        fields.insert("published_at", bson::DateTime::from_chrono(now));
    }
    Ok(fields)
}

/// Translate list query parameters into a filter document.
///
/// `category` is an exact match, `tag` a membership test on `tags`, and `q`
/// a case-insensitive literal substring over title, excerpt and content.
/// Empty parameters are ignored.
pub fn build_post_filter(query: &ListPostsQuery) -> Document {
    let mut filter = Document::new();

    if let Some(category) = non_empty(&query.category) {
        filter.insert("category", category);
    }
    if let Some(tag) = non_empty(&query.tag) {
        filter.insert("tags", doc! { "$in": [tag] });
    }
    if let Some(q) = non_empty(&query.q) {
        let pattern = regex::escape(q);
        let clauses: Vec<Bson> = ["title", "excerpt", "content"]
            .iter()
            .map(|field| {
                let mut clause = Document::new();
                clause.insert(*field, doc! { "$regex": pattern.as_str(), "$options": "i" });
                Bson::Document(clause)
            })
            .collect();
        filter.insert("$or", clauses);
    }

    filter
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;

    fn request(slug: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: "Hello".into(),
            slug: slug.into(),
            excerpt: None,
            content: "body".into(),
            cover_image: None,
            category: Some("rust".into()),
            tags: vec!["async".into()],
            author: Some("Admin".into()),
            published: true,
        }
    }

    #[test]
    fn empty_query_builds_empty_filter() {
        assert!(build_post_filter(&ListPostsQuery::default()).is_empty());

        let query = ListPostsQuery {
            category: Some(String::new()),
            q: Some(String::new()),
            ..Default::default()
        };
        assert!(build_post_filter(&query).is_empty());
    }

    #[test]
    fn filter_combines_all_parameters() {
        let query = ListPostsQuery {
            category: Some("rust".into()),
            tag: Some("web".into()),
            q: Some("foo".into()),
            limit: 5,
        };

        let expected = doc! {
            "category": "rust",
            "tags": { "$in": ["web"] },
            "$or": [
                { "title": { "$regex": "foo", "$options": "i" } },
                { "excerpt": { "$regex": "foo", "$options": "i" } },
                { "content": { "$regex": "foo", "$options": "i" } },
            ],
        };
        assert_eq!(build_post_filter(&query), expected);
    }

    #[test]
    fn search_text_is_escaped() {
        let query = ListPostsQuery {
            q: Some("c++ (beta)".into()),
            ..Default::default()
        };
        let filter = build_post_filter(&query);
        let clauses = filter.get_array("$or").unwrap();
        let title = clauses[0].as_document().unwrap().get_document("title").unwrap();
        assert_eq!(title.get_str("$regex").unwrap(), r"c\+\+ \(beta\)");
    }

    #[test]
    fn published_posts_are_stamped() {
        let now = Utc::now();
        let fields = new_post_document(request("a"), now).unwrap();
        assert_eq!(
            fields.get_datetime("published_at").unwrap().timestamp_millis(),
            now.timestamp_millis()
        );
        assert_eq!(fields.get_array("tags").unwrap().len(), 1);

        let draft = CreatePostRequest {
            published: false,
            ..request("b")
        };
        let fields = new_post_document(draft, now).unwrap();
        assert!(!fields.contains_key("published_at"));
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let service = PostService::new(Arc::new(InMemoryStore::for_blog("test")));
        service.create_post(request("same")).await.unwrap();

        let err = service.create_post(request("same")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref msg) if msg == "Slug already exists"));
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let service = PostService::new(Arc::new(InMemoryStore::for_blog("test")));
        let err = service.get_post_by_slug("nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
