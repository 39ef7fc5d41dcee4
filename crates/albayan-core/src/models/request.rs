use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "OPENOFFICE")]
    OpenOffice,
    #[serde(rename = "PDF+OPENOFFICE")]
    PdfAndOpenOffice,
}

/// Rendering lifecycle. Only the worker advances a request past `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Pending,
    Successful,
    Failed,
}

/// Body of `POST /reports/{definitionId}/issue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueReport {
    pub report_output_format: OutputFormat,
    pub report_data: Map<String, Value>,
}
