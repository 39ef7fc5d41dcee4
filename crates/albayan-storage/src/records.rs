use std::sync::Arc;

use albayan_core::models::Item;
use albayan_core::tables::TableLayout;
use serde_json::Value;
use uuid::Uuid;

use crate::error::StorageError;
use crate::table::RecordTable;

/// CRUD over one record kind.
///
/// The store is the only place identifiers and timestamps are assigned:
/// callers can neither choose a record's key nor rewrite it later.
#[derive(Clone)]
pub struct RecordStore {
    table: Arc<dyn RecordTable>,
    layout: TableLayout,
}

impl RecordStore {
    pub fn new(table: Arc<dyn RecordTable>, layout: TableLayout) -> Self {
        Self { table, layout }
    }

    /// Attribute holding each record's key.
    pub fn key_field(&self) -> &'static str {
        self.layout.key_field
    }

    /// Assign a fresh key and both timestamps, then write the record.
    ///
    /// Any caller-supplied values for those fields are overwritten.
    pub async fn create(&self, mut item: Item) -> Result<Item, StorageError> {
        let id = Uuid::new_v4().to_string();
        let now = now();

        item.insert(self.layout.key_field.to_string(), Value::String(id.clone()));
        item.insert(self.layout.created_field.to_string(), now.clone());
        item.insert(self.layout.updated_field.to_string(), now);

        self.table.put_if_absent(item.clone()).await?;
        tracing::info!(table = %self.table.name(), id = %id, "record created");
        Ok(item)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Item>, StorageError> {
        self.table.get(id).await
    }

    /// Merge `fields` into an existing record and refresh its updated timestamp.
    ///
    /// The key and the created timestamp are dropped from `fields`.
    pub async fn update(&self, id: &str, mut fields: Item) -> Result<Item, StorageError> {
        fields.remove(self.layout.key_field);
        fields.remove(self.layout.created_field);
        fields.insert(self.layout.updated_field.to_string(), now());

        let item = self.table.update_if_exists(id, fields).await?;
        tracing::info!(table = %self.table.name(), id = %id, "record updated");
        Ok(item)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.table.delete_if_exists(id).await?;
        tracing::info!(table = %self.table.name(), id = %id, "record deleted");
        Ok(())
    }

    /// Every record in the table, unpaginated.
    pub async fn list_all(&self) -> Result<Vec<Item>, StorageError> {
        self.table.scan().await
    }
}

fn now() -> Value {
    Value::String(jiff::Timestamp::now().to_string())
}
