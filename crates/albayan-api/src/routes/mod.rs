pub mod definitions;
pub mod health;
pub mod requests;

/// Path parameter naming a report definition.
pub const DEFINITION_ID: &str = "id";

/// Path parameter naming a report request.
pub const REQUEST_ID: &str = "request_id";
