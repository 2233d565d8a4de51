//! Admin access gate
//!
//! A single shared passphrase in front of the dashboard. This is a
//! placeholder: no accounts, no lockout, no session expiry. A real
//! deployment needs proper credential issuance and session management.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Holds only the argon2 hash of the configured passphrase
pub struct AdminGate {
    password_hash: String,
}

impl AdminGate {
    /// Hash the configured passphrase
    pub fn new(passphrase: &str) -> Result<Self> {
        if passphrase.is_empty() {
            return Err(Error::Config("admin passphrase must not be empty".into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(passphrase.as_bytes(), &salt)
            .map_err(|e| Error::Config(format!("failed to hash admin passphrase: {}", e)))?
            .to_string();

        Ok(Self { password_hash })
    }

    /// Compare an attempt against the passphrase
    pub fn login(&self, attempt: &str) -> Result<AdminSession> {
        let parsed_hash = PasswordHash::new(&self.password_hash)
            .map_err(|_| Error::Authentication("Invalid stored password".into()))?;

        if Argon2::default()
            .verify_password(attempt.as_bytes(), &parsed_hash)
            .is_err()
        {
            warn!("Admin login rejected");
            return Err(Error::Authentication("Invalid password!".into()));
        }

        let session = AdminSession::new();
        info!(session = %session.id, "Admin logged in");
        Ok(session)
    }
}

/// Proof of a successful login, held in memory for the running session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
}

impl AdminSession {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}
