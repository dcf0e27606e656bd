use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarehouseError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load extract '{source_name}': {message}")]
    Extract { source_name: String, message: String },

    #[error("Storage error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, WarehouseError>;
