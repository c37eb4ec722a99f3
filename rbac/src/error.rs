use directory::DirectoryError;
use thiserror::Error;

pub type AccessResult<T> = Result<T, AccessError>;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("no authenticated principal: {0}")]
    NoAuthenticatedPrincipal(String),

    #[error("directory lookup failed: {0}")]
    Directory(#[from] DirectoryError),
}

impl AccessError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Directory(e) => e.is_retryable(),
            Self::NoAuthenticatedPrincipal(_) => false,
        }
    }
}
