//! Outbound notification port
//!
//! Booking intake only knows this trait. The WhatsApp simulation in
//! `dawa-notify` implements it; a real provider would too.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Appointment, NotificationKind, NotificationLog};

/// Sends one message about a booking and reports what was sent
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, appointment: &Appointment, kind: NotificationKind)
        -> Result<NotificationLog>;
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    async fn send(
        &self,
        appointment: &Appointment,
        kind: NotificationKind,
    ) -> Result<NotificationLog> {
        (**self).send(appointment, kind).await
    }
}
