use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::storage::Storage;

/// In-memory storage used by tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    data: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn join(keys: &[&str]) -> CoreResult<String> {
        if keys.is_empty() {
            return Err(CoreError::InvalidInput("storage keys empty".to_string()));
        }
        for key in keys {
            if key.is_empty() || key.contains('/') {
                return Err(CoreError::InvalidInput(format!("invalid storage key {key}")));
            }
        }
        Ok(keys.join("/"))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn write(&self, keys: &[&str], data: &Value) -> CoreResult<()> {
        let key = Self::join(keys)?;
        self.data.lock().expect("storage lock").insert(key, data.clone());
        Ok(())
    }

    async fn read(&self, keys: &[&str]) -> CoreResult<Option<Value>> {
        let key = Self::join(keys)?;
        Ok(self.data.lock().expect("storage lock").get(&key).cloned())
    }

    async fn list(&self, keys: &[&str]) -> CoreResult<Vec<String>> {
        let prefix = if keys.is_empty() {
            String::new()
        } else {
            format!("{}/", keys.join("/"))
        };
        let data = self.data.lock().expect("storage lock");
        let names = data
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(|rest| rest.to_string())
            .collect();
        Ok(names)
    }

    async fn delete(&self, keys: &[&str]) -> CoreResult<bool> {
        let key = Self::join(keys)?;
        Ok(self.data.lock().expect("storage lock").remove(&key).is_some())
    }
}
