//! Simulated WhatsApp transport
//!
//! Waits for a fixed latency, builds the log entry, and records it in the
//! tracing output. Nothing leaves the process.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dawa_core::{Appointment, NotificationKind, NotificationLog, Notifier};
use rand::Rng;

use crate::error::{Error, Result};
use crate::templates::Templates;

const LOG_ID_LEN: usize = 9;
const LOG_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Stand-in for the WhatsApp Business API
#[derive(Debug, Clone)]
pub struct SimulatedWhatsApp {
    templates: Templates,
    latency: Duration,
}

impl SimulatedWhatsApp {
    pub fn new(templates: Templates, latency: Duration) -> Self {
        Self { templates, latency }
    }

    fn build_log(
        &self,
        appointment: &Appointment,
        kind: NotificationKind,
    ) -> Result<NotificationLog> {
        let (recipient, message) = self.templates.compose(appointment, kind);
        if recipient.trim().is_empty() {
            return Err(Error::InvalidRecipient(recipient));
        }

        Ok(NotificationLog {
            id: log_id(),
            recipient,
            message,
            timestamp: Utc::now(),
            kind,
        })
    }
}

#[async_trait]
impl Notifier for SimulatedWhatsApp {
    async fn send(
        &self,
        appointment: &Appointment,
        kind: NotificationKind,
    ) -> dawa_core::Result<NotificationLog> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let log = self.build_log(appointment, kind)?;
        tracing::info!(
            kind = %kind,
            recipient = %log.recipient,
            "[WhatsApp API Simulated] {}",
            log.message
        );
        Ok(log)
    }
}

/// Short lowercase base-36 token
fn log_id() -> String {
    let mut rng = rand::thread_rng();
    (0..LOG_ID_LEN)
        .map(|_| LOG_ID_ALPHABET[rng.gen_range(0..LOG_ID_ALPHABET.len())] as char)
        .collect()
}
