use thiserror::Error;

/// Failure talking to the backing store of the result log.
///
/// The in-memory log is already updated by the time one of these is returned,
/// so callers treat it as a warning.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite storage failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not serialize result log: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage is unavailable")]
    Unavailable,
    #[error("stored results could not be read, leaving them untouched")]
    Unread,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config is not valid json: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus table `{0}` is not embedded")]
    Missing(String),
    #[error("corpus table `{name}` is not valid: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("corpus table `{0}` has no entries")]
    Empty(String),
}
