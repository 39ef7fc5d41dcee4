use std::sync::Arc;

use thiserror::Error;

use albayan_core::error::CoreError;
use albayan_core::tables;
use albayan_core::validation::Schemas;
use albayan_storage::dynamo::DynamoTable;
use albayan_storage::memory::MemoryTable;
use albayan_storage::records::RecordStore;
use albayan_storage::table::RecordTable;
use albayan_worker::client::WorkerClient;
use albayan_worker::error::WorkerError;

use crate::config::{ApiConfig, TableBackend};
use crate::services::{DefinitionService, RequestService};
use crate::upload::TemplateUploads;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("schema setup failed: {0}")]
    Schema(#[from] CoreError),

    #[error("worker client setup failed: {0}")]
    Worker(#[from] WorkerError),
}

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub schemas: Arc<Schemas>,
    pub definitions: DefinitionService,
    pub requests: RequestService,
    pub worker: WorkerClient,
}

impl AppState {
    /// Wire services over the given definitions and processing tables.
    pub fn new(
        config: ApiConfig,
        definitions_table: Arc<dyn RecordTable>,
        processing_table: Arc<dyn RecordTable>,
    ) -> Result<Self, StateError> {
        let schemas = Schemas::compile()?;
        let worker = WorkerClient::new(config.worker_url.clone(), config.worker_timeout())?;

        let definitions = DefinitionService::new(
            RecordStore::new(definitions_table, tables::DEFINITIONS),
            TemplateUploads::new(config.upload_dir.clone()),
        );
        let requests = RequestService::new(RecordStore::new(processing_table, tables::REQUESTS));

        Ok(Self {
            config: Arc::new(config),
            schemas: Arc::new(schemas),
            definitions,
            requests,
            worker,
        })
    }
}

/// Open the definitions and processing tables for the configured backend.
pub async fn open_tables(config: &ApiConfig) -> (Arc<dyn RecordTable>, Arc<dyn RecordTable>) {
    let definitions: Arc<dyn RecordTable>;
    let processing: Arc<dyn RecordTable>;

    match config.table_backend {
        TableBackend::DynamoDb => {
            let client = albayan_storage::client::build_client(
                &config.aws_region,
                config.dynamodb_endpoint.as_deref(),
            )
            .await;
            definitions = Arc::new(DynamoTable::new(
                client.clone(),
                &config.definition_table,
                tables::DEFINITIONS.key_field,
            ));
            processing = Arc::new(DynamoTable::new(
                client,
                &config.processing_table,
                tables::REQUESTS.key_field,
            ));
        }
        TableBackend::Memory => {
            tracing::warn!("using in-memory tables; records are lost on restart");
            definitions = Arc::new(MemoryTable::new(
                &config.definition_table,
                tables::DEFINITIONS.key_field,
            ));
            processing = Arc::new(MemoryTable::new(
                &config.processing_table,
                tables::REQUESTS.key_field,
            ));
        }
    }

    (definitions, processing)
}
