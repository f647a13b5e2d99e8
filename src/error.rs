use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Request to {url} failed (HTTP {status}): {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Could not reach {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ImportError {
    /// HTTP status of a failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ImportError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
