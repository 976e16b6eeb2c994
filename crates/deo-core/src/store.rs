//! Persistence collaborator
//!
//! The pipeline reads design weeks and appends versioned documents and
//! operability entries through [`DesignWeekStore`]. [`InMemoryStore`] backs
//! tests and the CLI.

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use deo_model::{DesignWeek, DesignWeekId, DocumentType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Lifecycle state of a stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Draft,
    Approved,
}

/// One stored version of a generated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: Uuid,
    pub design_week_id: DesignWeekId,
    pub document_type: DocumentType,
    /// 1-based, strictly increasing per design week and document type
    pub version: u32,
    pub status: DocumentStatus,
    pub content: Value,
    pub created_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// New draft record
    #[must_use]
    pub fn draft(
        design_week_id: DesignWeekId,
        document_type: DocumentType,
        version: u32,
        content: Value,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            design_week_id,
            document_type,
            version,
            status: DocumentStatus::Draft,
            content,
            created_at,
        }
    }
}

/// Cost and latency record for one generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperabilityLogEntry {
    pub pipeline: String,
    pub model: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub latency_ms: u64,
    /// False when the document came from the fallback path
    pub success: bool,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

/// Persistence operations the pipeline depends on
#[async_trait]
pub trait DesignWeekStore: Send + Sync + std::fmt::Debug {
    /// Load a design week with its sessions, items and relational rows
    async fn load_design_week(&self, id: DesignWeekId) -> Result<Option<DesignWeek>, StoreError>;

    /// Highest stored version, or `None` if nothing was stored yet
    async fn latest_document_version(
        &self,
        id: DesignWeekId,
        document_type: DocumentType,
    ) -> Result<Option<u32>, StoreError>;

    /// Append a document record
    ///
    /// Fails with [`StoreError::VersionConflict`] when `record.version` is not
    /// above the highest stored version.
    async fn append_document(&self, record: DocumentRecord) -> Result<(), StoreError>;

    /// Append an operability entry
    async fn log_operation(&self, entry: OperabilityLogEntry) -> Result<(), StoreError>;
}

/// Concurrent in-memory store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    weeks: DashMap<DesignWeekId, DesignWeek>,
    documents: DashMap<(DesignWeekId, DocumentType), Vec<DocumentRecord>>,
    operations: Mutex<Vec<OperabilityLogEntry>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a design week
    pub fn insert_design_week(&self, week: DesignWeek) {
        self.weeks.insert(week.id, week);
    }

    /// Stored versions, oldest first
    #[must_use]
    pub fn documents(&self, id: DesignWeekId, document_type: DocumentType) -> Vec<DocumentRecord> {
        self.documents
            .get(&(id, document_type))
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Operability entries, in append order
    pub async fn operations(&self) -> Vec<OperabilityLogEntry> {
        self.operations.lock().await.clone()
    }
}

#[async_trait]
impl DesignWeekStore for InMemoryStore {
    async fn load_design_week(&self, id: DesignWeekId) -> Result<Option<DesignWeek>, StoreError> {
        Ok(self.weeks.get(&id).map(|week| week.clone()))
    }

    async fn latest_document_version(
        &self,
        id: DesignWeekId,
        document_type: DocumentType,
    ) -> Result<Option<u32>, StoreError> {
        Ok(self
            .documents
            .get(&(id, document_type))
            .and_then(|records| records.iter().map(|r| r.version).max()))
    }

    async fn append_document(&self, record: DocumentRecord) -> Result<(), StoreError> {
        let mut records = self
            .documents
            .entry((record.design_week_id, record.document_type))
            .or_default();

        let latest = records.iter().map(|r| r.version).max().unwrap_or(0);
        if record.version <= latest {
            return Err(StoreError::VersionConflict {
                design_week_id: record.design_week_id,
                document_type: record.document_type,
                version: record.version,
            });
        }

        records.push(record);
        Ok(())
    }

    async fn log_operation(&self, entry: OperabilityLogEntry) -> Result<(), StoreError> {
        self.operations.lock().await.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: DesignWeekId, version: u32) -> DocumentRecord {
        DocumentRecord::draft(id, DocumentType::DesignDocument, version, json!({}), Utc::now())
    }

    #[tokio::test]
    async fn load_unknown_week_is_none() {
        let store = InMemoryStore::new();
        assert!(store.load_design_week(DesignWeekId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn versions_increase_per_document_type() {
        let store = InMemoryStore::new();
        let id = DesignWeekId::new();

        assert_eq!(store.latest_document_version(id, DocumentType::DesignDocument).await.unwrap(), None);
        store.append_document(record(id, 1)).await.unwrap();
        store.append_document(record(id, 2)).await.unwrap();

        assert_eq!(store.latest_document_version(id, DocumentType::DesignDocument).await.unwrap(), Some(2));
        assert_eq!(store.latest_document_version(id, DocumentType::ExecutiveBrief).await.unwrap(), None);
        assert_eq!(store.documents(id, DocumentType::DesignDocument).len(), 2);
    }

    #[tokio::test]
    async fn duplicate_version_conflicts() {
        let store = InMemoryStore::new();
        let id = DesignWeekId::new();
        store.append_document(record(id, 1)).await.unwrap();

        let err = store.append_document(record(id, 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { version: 1, .. }));
        assert_eq!(store.documents(id, DocumentType::DesignDocument).len(), 1);
    }

    #[tokio::test]
    async fn operations_are_appended_in_order() {
        let store = InMemoryStore::new();
        for model in ["a", "b"] {
            store
                .log_operation(OperabilityLogEntry {
                    pipeline: "document-generation".into(),
                    model: model.into(),
                    input_tokens: None,
                    output_tokens: None,
                    latency_ms: 0,
                    success: true,
                    metadata: json!({}),
                    created_at: Utc::now(),
                })
                .await
                .unwrap();
        }
        let models: Vec<_> = store.operations().await.into_iter().map(|e| e.model).collect();
        assert_eq!(models, ["a", "b"]);
    }

    #[test]
    fn record_serializes_camel_case() {
        let value = serde_json::to_value(record(DesignWeekId::new(), 3)).unwrap();
        assert_eq!(value["status"], "DRAFT");
        assert_eq!(value["documentType"], "DESIGN_DOCUMENT");
        assert_eq!(value["version"], 3);
        assert!(value.get("designWeekId").is_some());
    }
}
