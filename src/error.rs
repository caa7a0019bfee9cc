use store::StoreError;
use thiserror::Error;

/// Errors raised by the storefront services.
///
/// Missing documents are not errors here: lookups return `Option` and the
/// HTTP layer decides which not-found message to send.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Credentials were rejected. Carries the client-facing message.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// A unique field collided with an existing document.
    #[error("{0}")]
    Conflict(&'static str),

    #[error("invalid file: {0}")]
    InvalidFile(String),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("token failure: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
