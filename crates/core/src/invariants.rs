//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::models::{Appointment, AppointmentId};

/// The freshly booked appointment must be the only one in its slot
pub fn assert_slot_unique(appointments: &[Appointment], booked: &Appointment) {
    let holders = appointments
        .iter()
        .filter(|a| a.slot() == booked.slot())
        .count();
    debug_assert!(
        holders == 1,
        "Appointment {} shares {} {} with {} other record(s)",
        booked.id,
        booked.appointment_date,
        booked.time_label(),
        holders.saturating_sub(1)
    );
}

/// A new record must not reuse an id already in the collection
pub fn assert_id_unused(appointments: &[Appointment], id: &AppointmentId) {
    debug_assert!(
        !appointments.iter().any(|a| &a.id == id),
        "Duplicate appointment id {}",
        id
    );
}

/// Name and phone must not be blank
pub fn assert_appointment_invariants(appointment: &Appointment) {
    debug_assert!(
        !appointment.client_name.trim().is_empty(),
        "Appointment {} has empty client name",
        appointment.id
    );

    debug_assert!(
        !appointment.phone_number.trim().is_empty(),
        "Appointment {} has empty phone number",
        appointment.id
    );
}
