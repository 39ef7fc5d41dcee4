//! Template upload gate.
//!
//! Definition create/update requests are multipart forms: one `file` part
//! holding the template plus plain text fields. Only `.odt` templates are
//! accepted; they are kept in memory until the request has passed validation
//! and are then written under a generated name.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use serde_json::Value;
use uuid::Uuid;

use albayan_core::models::Item;
use albayan_core::models::definition::TEMPLATE_EXTENSION;

use crate::error::ApiError;

/// Multipart part carrying the template.
pub const FILE_FIELD: &str = "file";

/// A template received in a request, not yet written to disk.
#[derive(Debug, Clone)]
pub struct TemplateUpload {
    pub original_name: String,
    pub bytes: Bytes,
}

/// A parsed definition form.
#[derive(Debug)]
pub struct DefinitionForm {
    /// Text parts, by part name.
    pub fields: Item,
    pub file: Option<TemplateUpload>,
}

impl<S: Send + Sync> FromRequest<S> for DefinitionForm {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;

        let mut fields = Item::new();
        let mut file = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == FILE_FIELD {
                let original_name = field.file_name().unwrap_or_default().to_string();
                check_extension(&original_name)?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
                file = Some(TemplateUpload {
                    original_name,
                    bytes,
                });
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
                fields.insert(name, Value::String(text));
            }
        }

        Ok(Self { fields, file })
    }
}

/// Reject any filename whose extension is not `.odt` (case-insensitive).
pub fn check_extension(filename: &str) -> Result<(), ApiError> {
    let ok = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION));

    if ok {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "File extension should be .{TEMPLATE_EXTENSION}"
        )))
    }
}

/// The directory uploaded templates are written to.
#[derive(Debug, Clone)]
pub struct TemplateUploads {
    dir: PathBuf,
}

impl TemplateUploads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write a template under a fresh `<uuid>.odt` name and return that name.
    pub async fn save(&self, upload: &TemplateUpload) -> Result<String, ApiError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let filename = format!("{}.{TEMPLATE_EXTENSION}", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&filename), &upload.bytes).await?;

        tracing::info!(
            original = %upload.original_name,
            stored = %filename,
            bytes = upload.bytes.len(),
            "template saved"
        );
        Ok(filename)
    }

    /// Remove a template written by `save` whose record never made it to
    /// storage. Failure is logged, not returned.
    pub async fn discard(&self, filename: &str) {
        if let Err(e) = tokio::fs::remove_file(self.dir.join(filename)).await {
            tracing::warn!(file = %filename, error = %e, "failed to remove orphaned template");
        }
    }
}
