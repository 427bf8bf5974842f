//! In-process store used for local runs and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{KeyValueStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    table: String,
    items: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            items: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn table(&self) -> &str {
        &self.table
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.items.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStore::new("users-table-dev");
        assert!(store.is_empty());
        assert_eq!(store.get("missing").await.unwrap(), None);

        store.put("9q5c", json!({ "last_update": 1700000000 })).await.unwrap();
        store.put("9q5c", json!({ "last_update": 1700000900 })).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("9q5c").await.unwrap(),
            Some(json!({ "last_update": 1700000900 }))
        );

        store.delete("9q5c").await.unwrap();
        store.delete("9q5c").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_writers() {
        let store = Arc::new(MemoryStore::new("t"));
        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.put(&format!("k{i}"), json!(i)).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(store.len(), 16);
        assert_eq!(store.get("k7").await.unwrap(), Some(json!(7)));
    }
}
