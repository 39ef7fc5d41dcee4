use albayan_core::schema;
use albayan_core::validation::{SchemaValidator, Schemas};
use serde_json::{Map, Value, json};

fn schemas() -> Schemas {
    Schemas::compile().expect("built-in schemas should compile")
}

fn params(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

#[test]
fn report_data_accepts_well_formed_body() {
    let body = json!({
        "report_output_format": "PDF",
        "report_data": { "name": "Quarterly" }
    });
    assert!(schemas().report_data.check(&body).is_ok());
}

#[test]
fn report_data_rejects_missing_output_format() {
    let body = json!({ "report_data": {} });
    let violations = schemas().report_data.check(&body).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("report_output_format"));
}

#[test]
fn report_data_rejects_missing_report_data() {
    let body = json!({ "report_output_format": "OPENOFFICE" });
    let violations = schemas().report_data.check(&body).unwrap_err();
    assert!(violations[0].message.contains("report_data"));
}

#[test]
fn report_data_rejects_unknown_output_format() {
    let body = json!({ "report_output_format": "XML", "report_data": {} });
    let violations = schemas().report_data.check(&body).unwrap_err();
    assert!(violations[0].message.contains("XML"));
}

#[test]
fn report_data_collects_every_violation() {
    let body = json!({ "report_output_format": "XML" });
    let violations = schemas().report_data.check(&body).unwrap_err();
    assert_eq!(violations.len(), 2);
}

#[test]
fn report_definition_requires_odf() {
    let schemas = schemas();
    assert!(schemas
        .report_definition
        .check(&json!({ "template_file_type": "odf" }))
        .is_ok());
    assert!(schemas
        .report_definition
        .check(&json!({ "template_file_type": "docx" }))
        .is_err());
    assert!(schemas.report_definition.check(&json!({})).is_err());
}

#[test]
fn report_definition_allows_extra_fields() {
    let body = json!({ "template_file_type": "odf", "title": "Invoice" });
    assert!(schemas().report_definition.check(&body).is_ok());
}

#[test]
fn single_path_param_is_unwrapped() {
    let schemas = schemas();
    let ok = params(&[("reportDefinitionId", "3f0b8c52-4c4e-4b8e-9d57-2f3c2a4f8f10")]);
    assert!(schemas.uuid.check_params(&ok).is_ok());

    let bad = params(&[("reportDefinitionId", "not-a-uuid")]);
    let violations = schemas.uuid.check_params(&bad).unwrap_err();
    assert!(violations[0].message.starts_with("reportDefinitionId:"));
}

#[test]
fn every_path_param_is_checked() {
    let bad = params(&[
        ("reportDefinitionId", "3f0b8c52-4c4e-4b8e-9d57-2f3c2a4f8f10"),
        ("requestId", "42"),
    ]);
    let violations = schemas().uuid.check_params(&bad).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.starts_with("requestId:"));
}

#[test]
fn object_schema_sees_params_as_object() {
    let validator = SchemaValidator::compile(
        "definition_params",
        &json!({
            "type": "object",
            "required": ["id"],
            "properties": { "id": schema::uuid() }
        }),
    )
    .unwrap();

    assert!(validator
        .check_params(&params(&[("id", "3f0b8c52-4c4e-4b8e-9d57-2f3c2a4f8f10")]))
        .is_ok());
    assert!(validator.check_params(&params(&[("other", "x")])).is_err());
}

#[test]
fn writer_data_accepts_string_maps() {
    let data = json!({
        "writer_placeholders": [{ "customer": "ACME" }],
        "writer_variables": [{ "total": "120.00" }],
        "writer_images": { "logo": "iVBORw0KGgo=" },
        "writer_tables": [{
            "table_name": "items",
            "content": [{ "sku": "A-1", "qty": "2" }],
            "footer": { "qty": "2" }
        }]
    });
    assert!(schemas().writer_data.check(&data).is_ok());
}

#[test]
fn writer_data_rejects_non_string_values() {
    let data = json!({
        "writer_placeholders": [{ "customer": 7 }],
        "writer_variables": [],
        "writer_images": {},
        "writer_tables": [{ "table_name": "items" }]
    });
    let violations = schemas().writer_data.check(&data).unwrap_err();
    assert_eq!(violations.len(), 2);
}

#[test]
fn invalid_schema_fails_to_compile() {
    let result = SchemaValidator::compile("broken", &json!({ "type": 12 }));
    assert!(result.is_err());
}
