//! albayan-worker
//!
//! Client for the external rendering worker. One call: hand a report request
//! id to the worker and return whatever it answers.

pub mod client;
pub mod error;
