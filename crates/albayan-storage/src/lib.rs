//! albayan-storage
//!
//! Record persistence. `RecordStore` owns identifier and timestamp assignment
//! and sits on a `RecordTable`: DynamoDB in production, an in-memory map for
//! tests and local runs.

pub mod attributes;
pub mod client;
pub mod dynamo;
pub mod error;
pub mod memory;
pub mod records;
pub mod table;
