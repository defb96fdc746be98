//! Error types for lexslab.

/// Errors that can occur while loading, chunking or indexing provisions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A provision violates the chunker's input contract.
    #[error("invalid provision {id:?}: {reason}")]
    InvalidProvision {
        /// The offending provision id (may be empty).
        id: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Invalid token budget (must be > 0).
    #[error("invalid token budget: {0} (must be > 0)")]
    InvalidBudget(usize),

    /// Invalid index batch size (must be > 0).
    #[error("invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    /// The tokenizer could not be loaded.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Two chunks share an id, so an upsert would silently drop one.
    #[error("duplicate chunk id: {0}")]
    DuplicateChunkId(String),

    /// Error reported by a chunk index implementation.
    #[error("index error: {0}")]
    Index(String),

    /// Configuration could not be extracted.
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Reading or writing a provisions file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A provisions file is not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(id: &str, reason: &'static str) -> Self {
        Self::InvalidProvision {
            id: id.to_string(),
            reason,
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Result type for lexslab operations.
pub type Result<T> = std::result::Result<T, Error>;
