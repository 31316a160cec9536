use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Language resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    #[error("Text normalization failed: {0}")]
    Normalization(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),
}

pub type Result<T> = std::result::Result<T, SpamError>;
