pub mod docs;
pub mod file;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::CoreResult;

/// Document store: every tool keeps its state as an independent JSON
/// document addressed by a key path. There is no cross-document schema.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn write(&self, keys: &[&str], data: &Value) -> CoreResult<()>;
    async fn read(&self, keys: &[&str]) -> CoreResult<Option<Value>>;
    async fn list(&self, keys: &[&str]) -> CoreResult<Vec<String>>;
    async fn delete(&self, keys: &[&str]) -> CoreResult<bool>;
}

pub type SharedStorage = Arc<dyn Storage>;
