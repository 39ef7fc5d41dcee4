use std::future::Future;
use std::pin::Pin;

use albayan_core::models::Item;

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One key-value table whose records are keyed by a single string attribute.
///
/// Existence preconditions are evaluated by the table itself, so they hold
/// under concurrent writers.
pub trait RecordTable: Send + Sync {
    /// Table name, for errors and logs.
    fn name(&self) -> &str;

    /// Write `item`. Fails with `Conflict` if its key is already present.
    fn put_if_absent(&self, item: Item) -> BoxFuture<'_, Result<(), StorageError>>;

    /// Read one record. `None` = doesn't exist.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Item>, StorageError>>;

    /// Overwrite the given attributes of an existing record and return the
    /// whole record afterwards. Fails with `NotFound` rather than inserting.
    fn update_if_exists<'a>(
        &'a self,
        key: &'a str,
        fields: Item,
    ) -> BoxFuture<'a, Result<Item, StorageError>>;

    /// Remove an existing record. Fails with `NotFound` if absent.
    fn delete_if_exists<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Every record, in no particular order.
    fn scan(&self) -> BoxFuture<'_, Result<Vec<Item>, StorageError>>;
}
