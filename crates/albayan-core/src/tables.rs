//! Key-value table layouts.
//!
//! Table names are configuration; the field layout of each record kind is fixed
//! here so the storage layer and the services agree on it.

/// Field layout of one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Primary-key attribute, always a server-generated UUID string.
    pub key_field: &'static str,
    /// Set once at creation.
    pub created_field: &'static str,
    /// Set at creation and refreshed on every update.
    pub updated_field: &'static str,
}

pub const DEFINITIONS: TableLayout = TableLayout {
    key_field: "report_template_id",
    created_field: "creation_date",
    updated_field: "updated_date",
};

pub const REQUESTS: TableLayout = TableLayout {
    key_field: "report_request_id",
    created_field: "request_date",
    updated_field: "update_date",
};

pub const DEFAULT_DEFINITION_TABLE: &str = "reports_definition";

pub const DEFAULT_PROCESSING_TABLE: &str = "reports_processing";
