//! albayan-core
//!
//! Pure domain types, table layouts, request schemas, and the schema validator.
//! No AWS or HTTP dependency: this is the shared vocabulary of the report front API.

pub mod error;
pub mod models;
pub mod schema;
pub mod tables;
pub mod validation;
