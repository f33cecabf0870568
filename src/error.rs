use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkycastError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Weather provider unavailable: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, SkycastError>;
