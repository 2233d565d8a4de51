//! Error types for Dawa Core

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("This time slot is already taken. Please choose another time.")]
    SlotTaken { date: NaiveDate, time: NaiveTime },

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the user can fix the input and submit again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::SlotTaken { .. } | Error::Notification(_)
        )
    }

    /// Text shown to the person at the form or dashboard
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(reason) => reason.clone(),
            Error::SlotTaken { .. } => self.to_string(),
            Error::Notification(_) => "Failed to book appointment. Please try again.".to_string(),
            Error::Authentication(reason) => reason.clone(),
            Error::NotFound(what) => format!("{} no longer exists.", what),
            other => format!("Something went wrong: {}", other),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
