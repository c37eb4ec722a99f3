use thiserror::Error;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("directory API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("token rejected by the directory: {0}")]
    InvalidToken(String),

    #[error("malformed directory response: {0}")]
    Decode(String),
}

impl DirectoryError {
    /// Whether a caller-side retry could plausibly succeed. The directory
    /// client itself never retries; callers layer that policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::InvalidToken(_) | Self::Decode(_) => false,
        }
    }
}
