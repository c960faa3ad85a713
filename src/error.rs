use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcfError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote query failed: {0}")]
    RemoteQuery(String),

    #[error("Lookup table {table} has no entry named {entry}")]
    LookupEntryNotFound { table: String, entry: String },

    #[error("Lookup table {table} has {count} entries named {entry}, expected exactly one")]
    LookupEntryAmbiguous {
        table: String,
        entry: String,
        count: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for EcfError {
    fn from(err: reqwest::Error) -> Self {
        EcfError::RemoteQuery(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EcfError>;
