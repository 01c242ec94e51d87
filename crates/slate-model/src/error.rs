use thiserror::Error;

/// Errors that abort processing of a whole file.
///
/// Anything that goes wrong inside a single clip is not an error at this level;
/// see [`crate::SkipReason`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProcessError {
    /// The input is not well-formed XML.
    #[error("invalid XML file: {message}")]
    InvalidXml { message: String },

    /// A configuration value is out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The rewritten document could not be written out.
    #[error("failed to serialize document: {message}")]
    Serialize { message: String },
}

impl ProcessError {
    /// Stable machine-readable kind, e.g. `INVALID_XML`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidXml { .. } => "INVALID_XML",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
            Self::Serialize { .. } => "SERIALIZE",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessError>;
