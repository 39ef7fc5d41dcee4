use albayan_core::models::Item;
use albayan_storage::dynamo::{delete_error, put_error, set_expression, update_error};
use albayan_storage::error::StorageError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::types::error::{ConditionalCheckFailedException, InternalServerError};
use serde_json::json;

fn condition_failed() -> ConditionalCheckFailedException {
    ConditionalCheckFailedException::builder()
        .message("The conditional request failed")
        .build()
}

fn internal() -> InternalServerError {
    InternalServerError::builder().message("boom").build()
}

#[test]
fn set_expression_uses_placeholders_for_every_field() {
    let mut fields = Item::new();
    fields.insert("status".to_string(), json!("pending"));
    fields.insert("update_date".to_string(), json!("2026-01-02T03:04:05Z"));

    let set = set_expression(&fields);
    let assignments = set
        .expression
        .strip_prefix("SET ")
        .expect("SET expression");

    let mut seen = Vec::new();
    for assignment in assignments.split(", ") {
        let (name_ref, value_ref) = assignment.split_once(" = ").unwrap();
        assert!(name_ref.starts_with("#f"), "{assignment}");
        assert!(value_ref.starts_with(":v"), "{assignment}");

        let name = &set.names[name_ref];
        let expected = match fields[name].as_str() {
            Some(s) => AttributeValue::S(s.to_string()),
            None => panic!("string field expected"),
        };
        assert_eq!(set.values[value_ref], expected);
        seen.push(name.clone());
    }

    seen.sort();
    assert_eq!(seen, vec!["status".to_string(), "update_date".to_string()]);
    assert_eq!(set.names.len(), 2);
    assert_eq!(set.values.len(), 2);
    assert!(!set.expression.contains("status"));
}

#[test]
fn failed_put_condition_is_a_conflict() {
    let err = put_error(
        "reports_processing",
        "abc",
        PutItemError::ConditionalCheckFailedException(condition_failed()),
    );
    match err {
        StorageError::Conflict { table, key } => {
            assert_eq!(table, "reports_processing");
            assert_eq!(key, "abc");
        }
        other => panic!("expected Conflict, got {other:?}"),
    }

    let err = put_error(
        "reports_processing",
        "abc",
        PutItemError::InternalServerError(internal()),
    );
    assert!(matches!(err, StorageError::PutItem(_)), "{err:?}");
}

#[test]
fn failed_update_condition_is_not_found() {
    let err = update_error(
        "reports_definition",
        "abc",
        UpdateItemError::ConditionalCheckFailedException(condition_failed()),
    );
    assert!(matches!(err, StorageError::NotFound { .. }), "{err:?}");

    let err = update_error(
        "reports_definition",
        "abc",
        UpdateItemError::InternalServerError(internal()),
    );
    assert!(matches!(err, StorageError::UpdateItem(_)), "{err:?}");
}

#[test]
fn failed_delete_condition_is_not_found() {
    let err = delete_error(
        "reports_definition",
        "abc",
        DeleteItemError::ConditionalCheckFailedException(condition_failed()),
    );
    assert!(matches!(err, StorageError::NotFound { .. }), "{err:?}");

    let err = delete_error(
        "reports_definition",
        "abc",
        DeleteItemError::InternalServerError(internal()),
    );
    match err {
        StorageError::DeleteItem(detail) => assert!(detail.contains("boom"), "{detail}"),
        other => panic!("expected DeleteItem, got {other:?}"),
    }
}
