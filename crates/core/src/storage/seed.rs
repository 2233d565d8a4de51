//! Demo records used when nothing (readable) has been saved yet

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::models::{Appointment, AppointmentId, AppointmentStatus, ServiceType};

/// Two demo bookings: tomorrow and the day after, relative to `now`
pub fn demo_appointments(now: DateTime<Utc>) -> Vec<Appointment> {
    let today = now.date_naive();
    vec![
        Appointment {
            id: AppointmentId::from("1"),
            client_name: "Sarah Johnson".to_string(),
            phone_number: "+1234567890".to_string(),
            service_type: ServiceType::MassageTherapy,
            appointment_date: today + Duration::days(1),
            appointment_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            status: AppointmentStatus::Confirmed,
            created_at: now,
        },
        Appointment {
            id: AppointmentId::from("2"),
            client_name: "Michael Chen".to_string(),
            phone_number: "+1987654321".to_string(),
            service_type: ServiceType::Physiotherapy,
            appointment_date: today + Duration::days(2),
            appointment_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap_or_default(),
            status: AppointmentStatus::Pending,
            created_at: now,
        },
    ]
}
