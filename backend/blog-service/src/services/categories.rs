/// Category service - category creation and listing
use crate::db::{Collection, DocumentStore};
use crate::error::Result;
use crate::models::{into_public, CategoryDocument, CategoryResponse, CreateCategoryRequest};
use bson::Document;
use std::sync::Arc;

pub struct CategoryService {
    store: Arc<dyn DocumentStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Insert a category. Slugs are not checked for duplicates.
    pub async fn create_category(&self, req: CreateCategoryRequest) -> Result<String> {
        let fields = bson::to_document(&req)?;
        let id = self
            .store
            .create_document(Collection::Category, fields)
            .await?;

        tracing::info!(category_id = %id, slug = %req.slug, "Category created");
        Ok(id)
    }

    /// Every stored category.
    pub async fn list_categories(&self) -> Result<Vec<CategoryResponse>> {
        self.store
            .get_documents(Collection::Category, Document::new(), None)
            .await?
            .into_iter()
            .map(into_public::<CategoryDocument, CategoryResponse>)
            .collect()
    }
}
