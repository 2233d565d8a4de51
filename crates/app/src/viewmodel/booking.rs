//! Booking form view model

use dawa_core::{BookingReceipt, BookingRequest, Result};

use crate::state::AppState;

/// What the client has typed so far, plus the inline error
#[derive(Debug, Default)]
pub struct BookingForm {
    pub request: BookingRequest,
    pub error: Option<String>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit the form. On success the form is blanked; on failure the
    /// entered values stay so the client can adjust and resubmit.
    pub async fn submit(&mut self, state: &AppState) -> Result<BookingReceipt> {
        self.error = None;

        let result = {
            let mut store = state.store.lock().await;
            state.intake.submit(&mut *store, &self.request).await
        };

        match &result {
            Ok(receipt) => {
                tracing::debug!(
                    client_log = %receipt.client_log.id,
                    admin_log = %receipt.admin_log.id,
                    "Notifications sent"
                );
                self.reset();
            }
            Err(e) => self.error = Some(e.user_message()),
        }

        result
    }

    pub fn reset(&mut self) {
        self.request = BookingRequest::default();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::memory_state;
    use dawa_core::{MemorySlot, ServiceType};
    use std::sync::atomic::Ordering;

    fn fill(form: &mut BookingForm) {
        form.request = BookingRequest {
            client_name: "Ana Gomez".into(),
            phone_number: "+15551234".into(),
            service_type: ServiceType::Physiotherapy,
            appointment_date: "2025-06-01".into(),
            appointment_time: "09:00".into(),
        };
    }

    #[tokio::test]
    async fn test_success_blanks_the_form() {
        let (state, _) = memory_state(MemorySlot::new());
        let mut form = BookingForm::new();
        fill(&mut form);

        let receipt = form.submit(&state).await.unwrap();

        assert_eq!(receipt.appointment.client_name, "Ana Gomez");
        assert_eq!(form.request, BookingRequest::default());
        assert_eq!(form.request.service_type, ServiceType::MassageTherapy);
        assert!(form.error.is_none());
        assert_eq!(state.store.lock().await.len(), 3);
    }

    #[tokio::test]
    async fn test_conflict_keeps_input_and_shows_error() {
        let (state, _) = memory_state(MemorySlot::new());
        let mut form = BookingForm::new();
        fill(&mut form);
        form.submit(&state).await.unwrap();

        fill(&mut form);
        assert!(form.submit(&state).await.is_err());
        assert_eq!(form.request.client_name, "Ana Gomez");
        assert_eq!(
            form.error.as_deref(),
            Some("This time slot is already taken. Please choose another time.")
        );
        assert_eq!(state.store.lock().await.len(), 3);
    }

    #[tokio::test]
    async fn test_notification_failure_shows_retry_message() {
        let (state, notifier) = memory_state(MemorySlot::new());
        notifier.failing.store(true, Ordering::SeqCst);

        let mut form = BookingForm::new();
        fill(&mut form);
        assert!(form.submit(&state).await.is_err());
        assert_eq!(
            form.error.as_deref(),
            Some("Failed to book appointment. Please try again.")
        );
        assert_eq!(state.store.lock().await.len(), 2);

        // Retry once the provider is back
        notifier.failing.store(false, Ordering::SeqCst);
        assert!(form.submit(&state).await.is_ok());
        assert_eq!(state.store.lock().await.len(), 3);
    }
}
