//! Schema gate for request bodies and path parameters.

use jsonschema::{Draft, Validator};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::schema;

/// One schema violation, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub message: String,
}

/// A compiled schema.
pub struct SchemaValidator {
    validator: Validator,
    /// The schema describes a bare value rather than an object.
    scalar: bool,
}

impl SchemaValidator {
    /// Compile `schema` with format assertions enabled, so `"format": "uuid"`
    /// rejects non-UUID strings.
    pub fn compile(name: &'static str, schema: &Value) -> Result<Self, CoreError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| CoreError::InvalidSchema {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let scalar = schema.get("type").and_then(Value::as_str) != Some("object");

        Ok(Self { validator, scalar })
    }

    /// Check a value, collecting every violation.
    pub fn check(&self, value: &Value) -> Result<(), Vec<Violation>> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(value)
            .map(|e| Violation {
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Check extracted path parameters.
    ///
    /// An object schema sees the parameters as one object. A scalar schema sees
    /// each parameter's bare value, so a single-parameter route is unwrapped and
    /// a multi-parameter route has every parameter checked on its own.
    pub fn check_params(&self, params: &Map<String, Value>) -> Result<(), Vec<Violation>> {
        if !self.scalar {
            return self.check(&Value::Object(params.clone()));
        }

        let mut violations = Vec::new();
        for (param, value) in params {
            if let Err(found) = self.check(value) {
                violations.extend(found.into_iter().map(|v| Violation {
                    message: format!("{param}: {}", v.message),
                }));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Every schema the API gates requests with, compiled once at start-up.
pub struct Schemas {
    pub uuid: SchemaValidator,
    pub report_definition: SchemaValidator,
    pub report_data: SchemaValidator,
    pub writer_data: SchemaValidator,
}

impl Schemas {
    pub fn compile() -> Result<Self, CoreError> {
        Ok(Self {
            uuid: SchemaValidator::compile("uuid", &schema::uuid())?,
            report_definition: SchemaValidator::compile(
                "report_definition",
                &schema::report_definition(),
            )?,
            report_data: SchemaValidator::compile("report_data", &schema::report_data())?,
            writer_data: SchemaValidator::compile("writer_data", &schema::writer_data())?,
        })
    }
}
