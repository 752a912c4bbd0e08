//! Asynchronously resolved payloads.
//!
//! Both batches are fixed and always succeed. They still pass through an
//! await point so callers observe them exactly as they would a slow lookup:
//! the task yields to the runtime once, then resumes with the whole batch.

use serde::{Deserialize, Serialize};

/// Text tokens served by `/api/emojis`, in order.
pub const EMOJIS: [&str; 3] = ["😆", "∑", "π"];

/// A structured record served by `/api/data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    pub id: i64,
    pub name: String,
    pub lastname: String,
}

impl DataRecord {
    pub fn new(id: i64, name: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lastname: lastname.into(),
        }
    }

    /// The two demonstration records, in serving order.
    pub fn canonical() -> Vec<DataRecord> {
        vec![
            DataRecord::new(1323, "John", "Doe"),
            DataRecord::new(2323, "Mia", "Turner"),
        ]
    }
}

/// Resolves the fixed batches behind the `/api` routes.
#[derive(Debug, Clone, Default)]
pub struct PayloadProvider;

impl PayloadProvider {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the emoji tokens as one completed batch.
    pub async fn resolve_emojis(&self) -> Vec<&'static str> {
        resolve(EMOJIS.to_vec()).await
    }

    /// Resolve the canonical data records as one completed batch.
    pub async fn resolve_records(&self) -> Vec<DataRecord> {
        resolve(DataRecord::canonical()).await
    }
}

async fn resolve<T>(batch: Vec<T>) -> Vec<T> {
    tokio::task::yield_now().await;
    batch
}
