use thiserror::Error;

/// Failures raised by the collaborators around the transformation core
/// (network, parsing, storage, export). The pure transformation functions
/// never produce one of these.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Fetching {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not find a table on the {source_name} page")]
    TableNotFound { source_name: String },

    #[error("Could not find table headers on the {source_name} page")]
    HeadersNotFound { source_name: String },
}

pub type Result<T> = std::result::Result<T, StatsError>;
