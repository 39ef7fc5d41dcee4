use std::collections::HashMap;

use albayan_core::models::Item;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::table::{BoxFuture, RecordTable};

/// In-process table with the same precondition semantics as DynamoDB.
pub struct MemoryTable {
    name: String,
    key_field: String,
    items: Mutex<HashMap<String, Item>>,
}

impl MemoryTable {
    pub fn new(name: impl Into<String>, key_field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_field: key_field.into(),
            items: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    fn not_found(&self, key: &str) -> StorageError {
        StorageError::NotFound {
            table: self.name.clone(),
            key: key.to_string(),
        }
    }
}

impl RecordTable for MemoryTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn put_if_absent(&self, item: Item) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            let key = item
                .get(&self.key_field)
                .and_then(|v| v.as_str())
                .ok_or_else(|| StorageError::MissingKey {
                    table: self.name.clone(),
                    field: self.key_field.clone(),
                })?
                .to_string();

            let mut items = self.items.lock().await;
            if items.contains_key(&key) {
                return Err(StorageError::Conflict {
                    table: self.name.clone(),
                    key,
                });
            }
            items.insert(key, item);
            Ok(())
        })
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Item>, StorageError>> {
        Box::pin(async move { Ok(self.items.lock().await.get(key).cloned()) })
    }

    fn update_if_exists<'a>(
        &'a self,
        key: &'a str,
        fields: Item,
    ) -> BoxFuture<'a, Result<Item, StorageError>> {
        Box::pin(async move {
            let mut items = self.items.lock().await;
            let item = items.get_mut(key).ok_or_else(|| self.not_found(key))?;
            item.extend(fields);
            Ok(item.clone())
        })
    }

    fn delete_if_exists<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.items
                .lock()
                .await
                .remove(key)
                .map(|_| ())
                .ok_or_else(|| self.not_found(key))
        })
    }

    fn scan(&self) -> BoxFuture<'_, Result<Vec<Item>, StorageError>> {
        Box::pin(async move { Ok(self.items.lock().await.values().cloned().collect()) })
    }
}
