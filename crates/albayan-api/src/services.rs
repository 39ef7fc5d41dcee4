//! Operations over the two record kinds.
//!
//! Records are returned exactly as stored. The worker writes its own attributes
//! into the processing table, so reads never project onto a fixed shape.

use serde_json::Value;
use uuid::Uuid;

use albayan_core::error::CoreError;
use albayan_core::models::request::{IssueReport, ProcessingStatus};
use albayan_core::models::{Item, to_item};
use albayan_core::schema::field;
use albayan_storage::records::RecordStore;

use crate::error::ApiError;
use crate::upload::{TemplateUpload, TemplateUploads};

const MISSING_TEMPLATE: &str = "Please upload a template file";

/// Report definitions: template metadata plus the uploaded template file.
#[derive(Clone)]
pub struct DefinitionService {
    store: RecordStore,
    uploads: TemplateUploads,
}

impl DefinitionService {
    pub fn new(store: RecordStore, uploads: TemplateUploads) -> Self {
        Self { store, uploads }
    }

    /// Store a new definition. A template file is required; without one
    /// nothing is written.
    pub async fn create(
        &self,
        mut fields: Item,
        file: Option<TemplateUpload>,
    ) -> Result<Item, ApiError> {
        let file = file.ok_or_else(|| ApiError::validation(MISSING_TEMPLATE))?;
        let template_file = self.uploads.save(&file).await?;
        fields.insert(
            field::TEMPLATE_FILE.to_string(),
            Value::String(template_file.clone()),
        );

        match self.store.create(fields).await {
            Ok(item) => Ok(item),
            Err(e) => {
                self.uploads.discard(&template_file).await;
                Err(e.into())
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Item>, ApiError> {
        Ok(self.store.get_by_id(&id.to_string()).await?)
    }

    pub async fn list(&self) -> Result<Vec<Item>, ApiError> {
        Ok(self.store.list_all().await?)
    }

    /// Merge `fields` and a replacement template into an existing definition.
    ///
    /// A missing definition is reported before a missing file.
    pub async fn update(
        &self,
        id: Uuid,
        mut fields: Item,
        file: Option<TemplateUpload>,
    ) -> Result<Item, ApiError> {
        let id = id.to_string();
        if self.store.get_by_id(&id).await?.is_none() {
            return Err(ApiError::NotFound);
        }

        let file = file.ok_or_else(|| ApiError::validation(MISSING_TEMPLATE))?;
        let template_file = self.uploads.save(&file).await?;
        fields.insert(
            field::TEMPLATE_FILE.to_string(),
            Value::String(template_file.clone()),
        );

        match self.store.update(&id, fields).await {
            Ok(item) => Ok(item),
            Err(e) => {
                self.uploads.discard(&template_file).await;
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.store.delete(&id.to_string()).await?;
        Ok(())
    }
}

/// Report requests: data to be merged into a definition's template.
#[derive(Clone)]
pub struct RequestService {
    store: RecordStore,
}

impl RequestService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Persist a pending request and return its generated id with the stored
    /// record. `template_id` is taken as given; it is not looked up in the
    /// definitions table.
    pub async fn create(
        &self,
        template_id: Uuid,
        issue: IssueReport,
    ) -> Result<(Uuid, Item), ApiError> {
        let mut item = to_item(&issue)?;
        item.insert(
            field::REPORT_TEMPLATE_ID.to_string(),
            Value::String(template_id.to_string()),
        );
        item.insert(
            field::PROCESSING_STATUS.to_string(),
            serde_json::to_value(ProcessingStatus::Pending).map_err(CoreError::from)?,
        );

        let item = self.store.create(item).await?;
        let id = record_id(&item, self.store.key_field())?;
        Ok((id, item))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Item>, ApiError> {
        Ok(self.store.get_by_id(&id.to_string()).await?)
    }

    pub async fn list(&self) -> Result<Vec<Item>, ApiError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.store.delete(&id.to_string()).await?;
        Ok(())
    }
}

fn record_id(item: &Item, key_field: &str) -> Result<Uuid, ApiError> {
    item.get(key_field)
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| ApiError::Internal(format!("stored record has no {key_field}")))
}
