use thiserror::Error;

#[derive(Error, Debug)]
pub enum SabaiError {
    // Argument errors
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("validation error: {0}")]
    Validation(String),

    // Station errors
    #[error("station not found: {id}")]
    NotFound { id: String },

    // Storage errors
    #[error("storage error: {0}")]
    Storage(#[from] object_store::Error),

    // Serialization errors
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Ingestion errors
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ingest rejected ({status}): {message}")]
    Ingest { status: u16, message: String },

    // Config errors
    #[error("config error: {0}")]
    Config(String),

    // IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // Internal
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, SabaiError>;

impl SabaiError {
    pub fn status_code(&self) -> u16 {
        match self {
            SabaiError::InvalidArgument(_) | SabaiError::Validation(_) => 400,

            SabaiError::NotFound { .. } => 404,

            SabaiError::Ingest { .. } | SabaiError::Http(_) => 502,

            _ => 500,
        }
    }
}
