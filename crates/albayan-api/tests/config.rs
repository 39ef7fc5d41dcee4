use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use albayan_api::config::{ApiConfig, ConfigError, TableBackend};

fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiConfig::from_vars(vars)
}

#[test]
fn defaults_apply_when_unset() {
    let config = load(&[]).unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.table_backend, TableBackend::DynamoDb);
    assert_eq!(config.definition_table, "reports_definition");
    assert_eq!(config.processing_table, "reports_processing");
    assert_eq!(config.worker_url, "http://localhost:8000");
    assert_eq!(config.worker_timeout(), Duration::from_secs(30));
    assert_eq!(config.upload_dir, PathBuf::from("/tmp/templates"));
    assert_eq!(config.output_dir, PathBuf::from("/tmp/output"));
    assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    assert!(!config.strict_report_data);
    assert_eq!(config.socket_addr().unwrap().port(), 3000);
}

#[test]
fn variables_override_defaults() {
    let config = load(&[
        ("PORT", "8080"),
        ("BIND_ADDR", "127.0.0.1"),
        ("TABLE_BACKEND", "memory"),
        ("DEFINITION_TABLE", "defs"),
        ("WORKER_URL", "http://worker:9000"),
        ("WORKER_TIMEOUT_SECS", "5"),
        ("UPLOAD_FOLDER", "/srv/templates"),
        ("REPORT_OUTPUT_FOLDER", "/srv/output"),
        ("DYNAMODB_ENDPOINT", "http://localhost:8001"),
        ("STRICT_REPORT_DATA", "true"),
    ])
    .unwrap();

    assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    assert_eq!(config.table_backend, TableBackend::Memory);
    assert_eq!(config.definition_table, "defs");
    assert_eq!(config.worker_url, "http://worker:9000");
    assert_eq!(config.worker_timeout(), Duration::from_secs(5));
    assert_eq!(config.upload_dir, PathBuf::from("/srv/templates"));
    assert_eq!(config.output_dir, PathBuf::from("/srv/output"));
    assert_eq!(
        config.dynamodb_endpoint.as_deref(),
        Some("http://localhost:8001")
    );
    assert!(config.strict_report_data);
}

#[test]
fn empty_values_count_as_unset() {
    let config = load(&[("PORT", ""), ("DYNAMODB_ENDPOINT", "  ")]).unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.dynamodb_endpoint, None);
}

#[test]
fn invalid_values_fail_to_load() {
    assert!(matches!(
        load(&[("PORT", "eighty")]),
        Err(ConfigError::Load(_))
    ));
    assert!(matches!(
        load(&[("TABLE_BACKEND", "postgres")]),
        Err(ConfigError::Load(_))
    ));
}

#[test]
fn bad_bind_address_names_the_variable() {
    let config = load(&[("BIND_ADDR", "not an address")]).unwrap();
    match config.socket_addr() {
        Err(ConfigError::Invalid { key, value, .. }) => {
            assert_eq!(key, "BIND_ADDR");
            assert_eq!(value, "not an address");
        }
        other => panic!("expected invalid BIND_ADDR, got {other:?}"),
    }
}
