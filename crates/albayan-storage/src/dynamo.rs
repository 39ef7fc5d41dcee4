//! DynamoDB-backed `RecordTable`.
//!
//! Existence preconditions are condition expressions on the key attribute, so
//! a failed check surfaces as `ConditionalCheckFailedException` and maps to
//! `Conflict` (put) or `NotFound` (update, delete).

use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};

use albayan_core::models::Item;

use crate::attributes::{self, AttributeMap};
use crate::error::{StorageError, format_err_chain};
use crate::table::{BoxFuture, RecordTable};

const KEY_PLACEHOLDER: &str = "#pk";

/// A `SET` update expression with its placeholder maps.
#[derive(Debug)]
pub struct SetExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Build `SET #f0 = :v0, #f1 = :v1, ...` for `fields`.
///
/// Caller-chosen field names may be reserved words: every name is a placeholder.
pub fn set_expression(fields: &Item) -> SetExpression {
    let mut assignments = Vec::with_capacity(fields.len());
    let mut names = HashMap::with_capacity(fields.len());
    let mut values = HashMap::with_capacity(fields.len());

    for (i, (name, value)) in fields.iter().enumerate() {
        let name_ref = format!("#f{i}");
        let value_ref = format!(":v{i}");
        assignments.push(format!("{name_ref} = {value_ref}"));
        names.insert(name_ref, name.clone());
        values.insert(value_ref, attributes::to_attribute(value));
    }

    SetExpression {
        expression: format!("SET {}", assignments.join(", ")),
        names,
        values,
    }
}

/// A failed `attribute_not_exists` check on put means the key is taken.
pub fn put_error(table: &str, key: &str, err: PutItemError) -> StorageError {
    if err.is_conditional_check_failed_exception() {
        StorageError::Conflict {
            table: table.to_string(),
            key: key.to_string(),
        }
    } else {
        StorageError::PutItem(format_err_chain(&err))
    }
}

/// A failed `attribute_exists` check on update means there is no such record.
pub fn update_error(table: &str, key: &str, err: UpdateItemError) -> StorageError {
    if err.is_conditional_check_failed_exception() {
        StorageError::NotFound {
            table: table.to_string(),
            key: key.to_string(),
        }
    } else {
        StorageError::UpdateItem(format_err_chain(&err))
    }
}

/// A failed `attribute_exists` check on delete means there is no such record.
pub fn delete_error(table: &str, key: &str, err: DeleteItemError) -> StorageError {
    if err.is_conditional_check_failed_exception() {
        StorageError::NotFound {
            table: table.to_string(),
            key: key.to_string(),
        }
    } else {
        StorageError::DeleteItem(format_err_chain(&err))
    }
}

#[derive(Clone)]
pub struct DynamoTable {
    client: Client,
    table_name: String,
    key_field: String,
}

impl DynamoTable {
    pub fn new(client: Client, table_name: impl Into<String>, key_field: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            key_field: key_field.into(),
        }
    }

    fn key(&self, key: &str) -> AttributeValue {
        AttributeValue::S(key.to_string())
    }

    fn not_found(&self, key: &str) -> StorageError {
        StorageError::NotFound {
            table: self.table_name.clone(),
            key: key.to_string(),
        }
    }

    async fn put(&self, item: Item) -> Result<(), StorageError> {
        let key = item
            .get(&self.key_field)
            .and_then(|v| v.as_str())
            .ok_or_else(|| StorageError::MissingKey {
                table: self.table_name.clone(),
                field: self.key_field.clone(),
            })?
            .to_string();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes::to_attribute_map(&item)))
            .condition_expression(format!("attribute_not_exists({KEY_PLACEHOLDER})"))
            .expression_attribute_names(KEY_PLACEHOLDER, &self.key_field)
            .send()
            .await
            .map_err(|e| put_error(&self.table_name, &key, e.into_service_error()))?;

        tracing::debug!(table = %self.table_name, key = %key, "put_item");
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<Item>, StorageError> {
        let resp = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(&self.key_field, self.key(key))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| StorageError::GetItem(format_err_chain(&e.into_service_error())))?;

        resp.item().map(attributes::from_attribute_map).transpose()
    }

    async fn update(&self, key: &str, fields: Item) -> Result<Item, StorageError> {
        if fields.is_empty() {
            return self.fetch(key).await?.ok_or_else(|| self.not_found(key));
        }

        let set = set_expression(&fields);
        let resp = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(&self.key_field, self.key(key))
            .update_expression(set.expression)
            .set_expression_attribute_names(Some(set.names))
            .set_expression_attribute_values(Some(set.values))
            .condition_expression(format!("attribute_exists({KEY_PLACEHOLDER})"))
            .expression_attribute_names(KEY_PLACEHOLDER, &self.key_field)
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| update_error(&self.table_name, key, e.into_service_error()))?;

        tracing::debug!(table = %self.table_name, key = %key, fields = fields.len(), "update_item");

        let attributes = resp.attributes().ok_or_else(|| {
            StorageError::UpdateItem("UpdateItem returned no attributes".to_string())
        })?;
        attributes::from_attribute_map(attributes)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(&self.key_field, self.key(key))
            .condition_expression(format!("attribute_exists({KEY_PLACEHOLDER})"))
            .expression_attribute_names(KEY_PLACEHOLDER, &self.key_field)
            .send()
            .await
            .map_err(|e| delete_error(&self.table_name, key, e.into_service_error()))?;

        tracing::debug!(table = %self.table_name, key = %key, "delete_item");
        Ok(())
    }

    /// Full table scan. Follows `LastEvaluatedKey` until the table is exhausted.
    async fn scan_all(&self) -> Result<Vec<Item>, StorageError> {
        let mut items = Vec::new();
        let mut start_key: Option<AttributeMap> = None;

        loop {
            let resp = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| StorageError::Scan(format_err_chain(&e.into_service_error())))?;

            for item in resp.items() {
                items.push(attributes::from_attribute_map(item)?);
            }

            match resp.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        tracing::debug!(table = %self.table_name, count = items.len(), "scan");
        Ok(items)
    }
}

impl RecordTable for DynamoTable {
    fn name(&self) -> &str {
        &self.table_name
    }

    fn put_if_absent(&self, item: Item) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(self.put(item))
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Item>, StorageError>> {
        Box::pin(self.fetch(key))
    }

    fn update_if_exists<'a>(
        &'a self,
        key: &'a str,
        fields: Item,
    ) -> BoxFuture<'a, Result<Item, StorageError>> {
        Box::pin(self.update(key, fields))
    }

    fn delete_if_exists<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(self.remove(key))
    }

    fn scan(&self) -> BoxFuture<'_, Result<Vec<Item>, StorageError>> {
        Box::pin(self.scan_all())
    }
}
