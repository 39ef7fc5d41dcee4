//! JSON Schemas for request bodies and path parameters.

use serde_json::{Value, json};

/// Attribute names shared by the schemas, the services, and the routes.
pub mod field {
    pub const REPORT_TEMPLATE_ID: &str = "report_template_id";
    pub const TEMPLATE_FILE_TYPE: &str = "template_file_type";
    pub const TEMPLATE_FILE: &str = "template_file";
    pub const REPORT_OUTPUT_FORMAT: &str = "report_output_format";
    pub const REPORT_DATA: &str = "report_data";
    pub const PROCESSING_STATUS: &str = "processing_status";
}

/// Open-ended dictionary: any key, string values only.
fn string_map(description: &str) -> Value {
    json!({
        "type": "object",
        "patternProperties": {
            "^.*$": { "type": "string" }
        },
        "description": description
    })
}

/// A single UUID-shaped identifier, used for path parameters.
pub fn uuid() -> Value {
    json!({
        "type": "string",
        "format": "uuid"
    })
}

/// Text fields accompanying a template upload.
pub fn report_definition() -> Value {
    json!({
        "type": "object",
        "required": [field::TEMPLATE_FILE_TYPE],
        "properties": {
            "template_file_type": {
                "type": "string",
                "enum": ["odf"],
                "description": "The file format of the template (currently restricted to ODF)."
            }
        }
    })
}

/// Body of a report creation request.
pub fn report_data() -> Value {
    json!({
        "type": "object",
        "required": [field::REPORT_OUTPUT_FORMAT, field::REPORT_DATA],
        "properties": {
            "report_output_format": {
                "type": "string",
                "enum": ["PDF", "OPENOFFICE", "PDF+OPENOFFICE"],
                "description": "The desired output format for the generated report."
            },
            "report_data": {
                "type": "object",
                "description": "The data merged into the template.",
                "additionalProperties": true
            }
        }
    })
}

/// Shape the rendering worker expects inside `report_data`.
pub fn writer_data() -> Value {
    json!({
        "type": "object",
        "required": [
            "writer_placeholders",
            "writer_variables",
            "writer_images",
            "writer_tables"
        ],
        "properties": {
            "writer_placeholders": {
                "type": "array",
                "items": string_map("Placeholder names to values.")
            },
            "writer_variables": {
                "type": "array",
                "items": string_map("Variable names to values.")
            },
            "writer_images": string_map("Image names to base64-encoded images."),
            "writer_tables": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["table_name", "content"],
                    "properties": {
                        "table_name": { "type": "string" },
                        "content": {
                            "type": "array",
                            "items": string_map("One table row.")
                        },
                        "footer": string_map("Table footer cells.")
                    }
                }
            }
        }
    })
}
