use std::path::PathBuf;

use serde::Serialize;
use slate_model::TransformReport;

use crate::batch::Rejection;

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub files: Vec<FileSummary>,
    pub rejected: Vec<RejectedFile>,
    pub dry_run: bool,
    pub has_errors: bool,
}

impl BatchResult {
    pub fn new(files: Vec<FileSummary>, rejected: Vec<RejectedFile>, dry_run: bool) -> Self {
        let has_errors =
            !rejected.is_empty() || files.iter().any(|file| file.status == FileStatus::Failed);
        Self {
            files,
            rejected,
            dry_run,
            has_errors,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Written,
    DryRun,
    Failed,
}

impl FileStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::DryRun => "dry run",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<TransformReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable kind of `error`, e.g. `INVALID_XML`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedFile {
    pub path: PathBuf,
    #[serde(flatten)]
    pub reason: Rejection,
}
