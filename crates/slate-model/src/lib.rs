pub mod error;
pub mod options;
pub mod processing;

pub use error::{ProcessError, Result};
pub use options::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION, ProcessConfig, SchemaProfile};
pub use processing::{
    NormalizationCounts, ProcessedClipData, RenamedClip, SkipReason, SkippedClip,
    TransformReport,
};
