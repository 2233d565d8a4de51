//! Message templates for booking notifications

use dawa_core::{Appointment, ClinicConfig, NotificationKind};

/// Fixed texts, parameterised by the clinic's name and admin number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub clinic_name: String,
    pub admin_phone: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self::from_config(&ClinicConfig::default())
    }
}

impl Templates {
    pub fn from_config(config: &ClinicConfig) -> Self {
        Self {
            clinic_name: config.clinic.name.clone(),
            admin_phone: config.clinic.admin_phone.clone(),
        }
    }

    /// Recipient and body for one notification
    pub fn compose(&self, appointment: &Appointment, kind: NotificationKind) -> (String, String) {
        match kind {
            NotificationKind::ClientConfirmation => (
                appointment.phone_number.clone(),
                format!(
                    "Hello {}, your appointment for {} at {} is booked for {} at {}. We look forward to seeing you!",
                    appointment.client_name,
                    appointment.service_type,
                    self.clinic_name,
                    appointment.appointment_date,
                    appointment.time_label(),
                ),
            ),
            NotificationKind::AdminAlert => (
                self.admin_phone.clone(),
                format!(
                    "ADMIN ALERT: New booking received from {} for {} on {} at {}.",
                    appointment.client_name,
                    appointment.service_type,
                    appointment.appointment_date,
                    appointment.time_label(),
                ),
            ),
        }
    }
}
