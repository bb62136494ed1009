use thiserror::Error;

/// Errors surfaced at the library boundary
#[derive(Debug, Error)]
pub enum MeltError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("input ended inside {open} unclosed element(s)")]
    Truncated { open: usize },

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to decode configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MeltError>;
