use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use albayan_core::tables;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Environment variables read at start-up. Each maps to the lowercased field
/// (or serde rename) of `ApiConfig`.
pub const VARIABLES: &[&str] = &[
    "BIND_ADDR",
    "PORT",
    "ENVIRONMENT",
    "AWS_REGION",
    "DYNAMODB_ENDPOINT",
    "TABLE_BACKEND",
    "DEFINITION_TABLE",
    "PROCESSING_TABLE",
    "WORKER_URL",
    "WORKER_TIMEOUT_SECS",
    "UPLOAD_FOLDER",
    "REPORT_OUTPUT_FOLDER",
    "MAX_UPLOAD_BYTES",
    "STRICT_REPORT_DATA",
];

/// Where records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableBackend {
    DynamoDb,
    /// Process-local tables, lost on restart. For local runs and tests.
    Memory,
}

/// Process configuration, read once at start-up and shared through `AppState`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Free-form environment tag, e.g. `development` or `production`.
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_aws_region")]
    pub aws_region: String,

    /// Endpoint override for DynamoDB Local.
    #[serde(default)]
    pub dynamodb_endpoint: Option<String>,

    #[serde(default = "default_table_backend")]
    pub table_backend: TableBackend,

    #[serde(default = "default_definition_table")]
    pub definition_table: String,

    #[serde(default = "default_processing_table")]
    pub processing_table: String,

    #[serde(default = "default_worker_url")]
    pub worker_url: String,

    #[serde(default = "default_worker_timeout_secs")]
    pub worker_timeout_secs: u64,

    /// Uploaded templates are written here.
    #[serde(rename = "upload_folder", default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// The worker writes rendered documents here; served under `/output`.
    #[serde(rename = "report_output_folder", default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Also check `report_data` against the writer schema on request creation.
    #[serde(default)]
    pub strict_report_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            environment: default_environment(),
            aws_region: default_aws_region(),
            dynamodb_endpoint: None,
            table_backend: default_table_backend(),
            definition_table: default_definition_table(),
            processing_table: default_processing_table(),
            worker_url: default_worker_url(),
            worker_timeout_secs: default_worker_timeout_secs(),
            upload_dir: default_upload_dir(),
            output_dir: default_output_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            strict_report_data: false,
        }
    }
}

impl ApiConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars = VARIABLES
            .iter()
            .filter_map(|key| env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect();
        Self::from_vars(vars)
    }

    /// Load from an explicit variable set. Unset and empty variables fall back
    /// to the defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let vars: ::config::Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value.trim().to_string()))
            .filter(|(_, value)| !value.is_empty())
            .collect();

        let config: ApiConfig = ::config::Config::builder()
            .add_source(::config::Environment::default().source(Some(vars)))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.bind_addr, self.port);
        addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: self.bind_addr.clone(),
            reason: e.to_string(),
        })
    }

    pub fn worker_timeout(&self) -> Duration {
        Duration::from_secs(self.worker_timeout_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_aws_region() -> String {
    "us-east-1".to_string()
}

fn default_table_backend() -> TableBackend {
    TableBackend::DynamoDb
}

fn default_definition_table() -> String {
    tables::DEFAULT_DEFINITION_TABLE.to_string()
}

fn default_processing_table() -> String {
    tables::DEFAULT_PROCESSING_TABLE.to_string()
}

fn default_worker_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_worker_timeout_secs() -> u64 {
    30
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("/tmp/templates")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("/tmp/output")
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}
