//! Booking intake
//!
//! Validates a booking request, rejects double-booked slots, sends both
//! notifications, and only then commits the appointment to the store.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::dispatch::Notifier;
use crate::error::{Error, Result};
use crate::invariants;
use crate::models::{hhmm, Appointment, NotificationKind, NotificationLog, ServiceType};
use crate::storage::{AppointmentStore, KeyValueSlot};

/// Booking details as entered by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub client_name: String,
    pub phone_number: String,
    pub service_type: ServiceType,
    /// `YYYY-MM-DD`
    pub appointment_date: String,
    /// `HH:MM`, 24-hour
    pub appointment_time: String,
}

impl BookingRequest {
    /// Check required fields and formats, producing a fresh Pending record
    pub fn to_appointment(&self) -> Result<Appointment> {
        let client_name = self.client_name.trim();
        if client_name.is_empty() {
            return Err(Error::Validation("Full name is required.".into()));
        }

        let phone_number = self.phone_number.trim();
        if phone_number.is_empty() {
            return Err(Error::Validation("Phone number is required.".into()));
        }

        let date = parse_date(&self.appointment_date)?;
        let time = parse_time(&self.appointment_time)?;

        Ok(Appointment::new(
            client_name.to_string(),
            phone_number.to_string(),
            self.service_type,
            date,
            time,
        ))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| Error::Validation("Preferred date must be YYYY-MM-DD.".into()))
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), hhmm::FORMAT)
        .map_err(|_| Error::Validation("Preferred time must be HH:MM (24-hour).".into()))
}

/// Outcome of a committed booking
#[derive(Debug, Clone)]
pub struct BookingReceipt {
    pub appointment: Appointment,
    pub client_log: NotificationLog,
    pub admin_log: NotificationLog,
}

/// Client-facing creation flow
pub struct BookingIntake<N: Notifier> {
    notifier: N,
}

impl<N: Notifier> BookingIntake<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Submit a booking. Nothing is stored unless both notifications succeed.
    #[instrument(
        skip(self, store, request),
        fields(date = %request.appointment_date, time = %request.appointment_time)
    )]
    pub async fn submit<S: KeyValueSlot>(
        &self,
        store: &mut AppointmentStore<S>,
        request: &BookingRequest,
    ) -> Result<BookingReceipt> {
        let appointment = request.to_appointment()?;
        invariants::assert_appointment_invariants(&appointment);
        let (date, time) = appointment.slot();

        if store.is_slot_taken(date, time) {
            info!("Slot already taken");
            return Err(Error::SlotTaken { date, time });
        }

        // Both calls settle before we decide
        let (client, admin) = tokio::join!(
            self.notifier
                .send(&appointment, NotificationKind::ClientConfirmation),
            self.notifier.send(&appointment, NotificationKind::AdminAlert),
        );

        let (client_log, admin_log) = match (client, admin) {
            (Ok(client_log), Ok(admin_log)) => (client_log, admin_log),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Notification failed, booking discarded");
                return Err(match e {
                    Error::Notification(reason) => Error::Notification(reason),
                    other => Error::Notification(other.to_string()),
                });
            }
        };

        store.insert(appointment.clone())?;
        invariants::assert_slot_unique(store.appointments(), &appointment);
        info!(id = %appointment.id, "Booking committed");

        Ok(BookingReceipt {
            appointment,
            client_log,
            admin_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use crate::storage::{MemorySlot, DEFAULT_KEY};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Notifier that answers immediately, optionally failing one kind
    struct StubNotifier {
        fail_on: Option<NotificationKind>,
        calls: AtomicUsize,
    }

    impl StubNotifier {
        fn ok() -> Self {
            Self {
                fail_on: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(kind: NotificationKind) -> Self {
            Self {
                fail_on: Some(kind),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Notifier for StubNotifier {
        async fn send(
            &self,
            appointment: &Appointment,
            kind: NotificationKind,
        ) -> Result<NotificationLog> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(kind) {
                return Err(Error::Notification("provider unavailable".into()));
            }
            Ok(NotificationLog {
                id: "abc123xyz".into(),
                recipient: appointment.phone_number.clone(),
                message: format!("{} for {}", kind, appointment.client_name),
                timestamp: Utc::now(),
                kind,
            })
        }
    }

    fn ana() -> BookingRequest {
        BookingRequest {
            client_name: "Ana Gomez".into(),
            phone_number: "+15551234".into(),
            service_type: ServiceType::Physiotherapy,
            appointment_date: "2025-06-01".into(),
            appointment_time: "09:00".into(),
        }
    }

    #[tokio::test]
    async fn test_booking_prepends_pending_record() {
        let mut store = AppointmentStore::load(MemorySlot::new(), DEFAULT_KEY);
        let intake = BookingIntake::new(StubNotifier::ok());

        let receipt = intake.submit(&mut store, &ana()).await.unwrap();

        assert_eq!(store.len(), 3);
        let first = &store.appointments()[0];
        assert_eq!(first, &receipt.appointment);
        assert_eq!(first.client_name, "Ana Gomez");
        assert_eq!(first.status, AppointmentStatus::Pending);
        assert_eq!(receipt.client_log.kind, NotificationKind::ClientConfirmation);
        assert_eq!(receipt.admin_log.kind, NotificationKind::AdminAlert);
        assert_eq!(intake.notifier().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_identical_booking_conflicts() {
        let mut store = AppointmentStore::load(MemorySlot::new(), DEFAULT_KEY);
        let intake = BookingIntake::new(StubNotifier::ok());

        intake.submit(&mut store, &ana()).await.unwrap();
        let size = store.len();

        let mut other_client = ana();
        other_client.client_name = "Someone Else".into();
        let err = intake.submit(&mut store, &other_client).await.unwrap_err();

        assert!(matches!(err, Error::SlotTaken { .. }));
        assert_eq!(store.len(), size);
        // No notifications for the rejected attempt
        assert_eq!(intake.notifier().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_notification_failure_commits_nothing() {
        for kind in [NotificationKind::ClientConfirmation, NotificationKind::AdminAlert] {
            let slot = MemorySlot::new();
            let mut store = AppointmentStore::load(slot.clone(), DEFAULT_KEY);
            let intake = BookingIntake::new(StubNotifier::failing(kind));

            let err = intake.submit(&mut store, &ana()).await.unwrap_err();

            assert!(matches!(err, Error::Notification(_)));
            assert!(err.is_retryable());
            assert_eq!(store.len(), 2);
            // Both calls still ran to completion
            assert_eq!(intake.notifier().calls.load(Ordering::SeqCst), 2);
            let saved: Vec<Appointment> =
                serde_json::from_str(&slot.read(DEFAULT_KEY).unwrap().unwrap()).unwrap();
            assert_eq!(saved.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_validation_rejects_blank_and_malformed() {
        let mut store = AppointmentStore::load(MemorySlot::new(), DEFAULT_KEY);
        let intake = BookingIntake::new(StubNotifier::ok());

        let mut blank_name = ana();
        blank_name.client_name = "   ".into();
        let mut bad_time = ana();
        bad_time.appointment_time = "9am".into();
        let mut bad_date = ana();
        bad_date.appointment_date = "01/06/2025".into();

        for request in [blank_name, bad_time, bad_date] {
            let err = intake.submit(&mut store, &request).await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }
        assert_eq!(store.len(), 2);
        assert_eq!(intake.notifier().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_request_trims_fields() {
        let mut request = ana();
        request.client_name = "  Ana Gomez ".into();
        let app = request.to_appointment().unwrap();
        assert_eq!(app.client_name, "Ana Gomez");
        assert_eq!(app.time_label(), "09:00");
    }
}
