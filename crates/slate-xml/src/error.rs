use thiserror::Error;

/// Errors raised while reading or writing an XML document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XmlError {
    /// The tokenizer rejected the input.
    #[error("syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// The input tokenized but does not form a single well-formed element tree.
    #[error("malformed document at byte {position}: {message}")]
    Malformed { position: u64, message: String },

    /// An entity reference that is neither predefined nor a character reference.
    #[error("unresolved entity reference &{name};")]
    UnresolvedEntity { name: String },

    /// The writer failed to emit an event.
    #[error("failed to write XML: {message}")]
    Write { message: String },
}

pub type Result<T> = std::result::Result<T, XmlError>;
