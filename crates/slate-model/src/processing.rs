use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized naming tokens derived from one clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedClipData {
    pub scene_formatted: String,
    pub shot_formatted: String,
    pub take_formatted: String,
    pub camera_id: String,
    /// Empty when the clip carries no rating.
    pub rating: String,
}

/// Why a clip was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("missing <{element}> element")]
    MissingElement { element: String },
    #[error("invalid scene value {value:?}")]
    InvalidScene { value: String },
    #[error("invalid shot-take value {value:?}")]
    InvalidShotTake { value: String },
    #[error("shot-take {value:?} is not a shot-take pair")]
    MalformedShotTake { value: String },
    #[error("camera roll is empty")]
    MissingCameraRoll,
    #[error("clip has no id attribute")]
    MissingId,
}

impl SkipReason {
    pub fn missing(element: &str) -> Self {
        Self::MissingElement {
            element: element.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedClip {
    pub clip_id: String,
    pub name: String,
    /// Linked sequence that received the name, if one was found.
    pub sequence_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedClip {
    pub clip_id: Option<String>,
    pub reason: SkipReason,
}

/// How many elements the document-wide passes rewrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationCounts {
    pub widths: usize,
    pub heights: usize,
    pub lognotes: usize,
    pub pathurls: usize,
    pub label_spellings: usize,
}

/// Outcome of one transform, for diagnostics and summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformReport {
    pub clips_seen: usize,
    pub renamed: Vec<RenamedClip>,
    pub skipped: Vec<SkippedClip>,
    pub normalized: NormalizationCounts,
}

impl TransformReport {
    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}
