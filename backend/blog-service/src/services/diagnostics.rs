/// Database diagnostics for the `/test` endpoint.
///
/// Each probe is guarded: a failing probe changes the reported status
/// string and never fails the request.
use crate::db::DocumentStore;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticReport {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

/// Probe the configured store.
pub async fn diagnose(store: Option<&dyn DocumentStore>, database_url_set: bool) -> DiagnosticReport {
    let mut report = DiagnosticReport::default();

    let Some(store) = store else {
        report.database = "⚠️  Available but not initialized".to_string();
        return report;
    };

    report.database = "✅ Available".to_string();
    report.database_url = Some(if database_url_set { "✅ Set" } else { "❌ Not Set" }.to_string());
    report.database_name = Some(store.database_name());
    report.connection_status = "Connected".to_string();

    match store.list_collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_COLLECTIONS);
            report.collections = names;
            report.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Collection listing failed during diagnostics");
            report.database = format!("⚠️  Connected but Error: {}", truncate(&e.to_string()));
        }
    }

    report
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Collection, InMemoryStore, StoreError, StoreResult};
    use async_trait::async_trait;
    use bson::{doc, Document};

    struct Unreachable;

    #[async_trait]
    impl DocumentStore for Unreachable {
        async fn create_document(&self, _: Collection, _: Document) -> StoreResult<String> {
            Err(StoreError::Backend("unreachable".into()))
        }

        async fn get_documents(
            &self,
            _: Collection,
            _: Document,
            _: Option<i64>,
        ) -> StoreResult<Vec<Document>> {
            Err(StoreError::Backend("unreachable".into()))
        }

        async fn find_one(&self, _: Collection, _: Document) -> StoreResult<Option<Document>> {
            Err(StoreError::Backend("unreachable".into()))
        }

        fn database_name(&self) -> String {
            "blog_cms".into()
        }

        async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
            Err(StoreError::Backend(
                "server selection timeout: no available servers within 30s".into(),
            ))
        }
    }

    #[tokio::test]
    async fn without_store() {
        let report = diagnose(None, false).await;
        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.database_url.is_none());
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn working_store_lists_collections() {
        let store = InMemoryStore::new("blog_cms");
        store
            .create_document(Collection::Category, doc! { "slug": "rust" })
            .await
            .unwrap();

        let report = diagnose(Some(&store as &dyn DocumentStore), true).await;
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.database_url.as_deref(), Some("✅ Set"));
        assert_eq!(report.database_name.as_deref(), Some("blog_cms"));
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections, vec!["category".to_string()]);
    }

    #[tokio::test]
    async fn failing_probe_degrades_status() {
        let report = diagnose(Some(&Unreachable as &dyn DocumentStore), false).await;
        assert!(report.database.starts_with("⚠️  Connected but Error: "));
        assert!(report.database.chars().count() <= "⚠️  Connected but Error: ".chars().count() + 50);
        assert_eq!(report.database_url.as_deref(), Some("❌ Not Set"));
        assert_eq!(report.connection_status, "Connected");
        assert!(report.collections.is_empty());
    }
}
