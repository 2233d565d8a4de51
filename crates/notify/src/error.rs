//! Notification error types

/// Notification result type
pub type Result<T> = std::result::Result<T, Error>;

/// Transport errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid recipient: {0:?}")]
    InvalidRecipient(String),
}

impl From<Error> for dawa_core::Error {
    fn from(err: Error) -> Self {
        dawa_core::Error::Notification(err.to_string())
    }
}
