//! Appointment model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque appointment identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(pub String);

impl AppointmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AppointmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for AppointmentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Services offered by the practice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ServiceType {
    #[default]
    #[serde(rename = "Massage Therapy")]
    MassageTherapy,
    #[serde(rename = "Physiotherapy")]
    Physiotherapy,
    #[serde(rename = "Wellness Consultation")]
    WellnessConsultation,
    #[serde(rename = "Training Session")]
    TrainingSession,
    #[serde(rename = "Chiropractic Care")]
    Chiropractic,
}

impl ServiceType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceType::MassageTherapy => "Massage Therapy",
            ServiceType::Physiotherapy => "Physiotherapy",
            ServiceType::WellnessConsultation => "Wellness Consultation",
            ServiceType::TrainingSession => "Training Session",
            ServiceType::Chiropractic => "Chiropractic Care",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ServiceType::MassageTherapy => "💆",
            ServiceType::Physiotherapy => "💪",
            ServiceType::WellnessConsultation => "🌿",
            ServiceType::TrainingSession => "🏋️",
            ServiceType::Chiropractic => "🦴",
        }
    }

    /// All services in menu order
    pub fn all() -> &'static [ServiceType] {
        &[
            ServiceType::MassageTherapy,
            ServiceType::Physiotherapy,
            ServiceType::WellnessConsultation,
            ServiceType::TrainingSession,
            ServiceType::Chiropractic,
        ]
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    /// Accepts the display name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ServiceType::all()
            .iter()
            .copied()
            .find(|svc| svc.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown service: {}", wanted))
    }
}

/// Booking status. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    pub fn all() -> &'static [AppointmentStatus] {
        &[
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ]
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AppointmentStatus::all()
            .iter()
            .copied()
            .find(|st| st.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown status: {}", wanted))
    }
}

/// A single scheduled client booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_name: String,
    pub phone_number: String,
    pub service_type: ServiceType,
    pub appointment_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// New Pending appointment with a fresh id
    pub fn new(
        client_name: String,
        phone_number: String,
        service_type: ServiceType,
        appointment_date: NaiveDate,
        appointment_time: NaiveTime,
    ) -> Self {
        Self {
            id: AppointmentId::new(),
            client_name,
            phone_number,
            service_type,
            appointment_date,
            appointment_time,
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// The (date, time) pair that must be unique at intake
    pub fn slot(&self) -> (NaiveDate, NaiveTime) {
        (self.appointment_date, self.appointment_time)
    }

    /// Time formatted as `HH:MM`
    pub fn time_label(&self) -> String {
        self.appointment_time.format(hhmm::FORMAT).to_string()
    }

    pub fn apply(&mut self, patch: &AppointmentPatch) {
        if let Some(name) = &patch.client_name {
            self.client_name = name.clone();
        }
        if let Some(phone) = &patch.phone_number {
            self.phone_number = phone.clone();
        }
        if let Some(service) = patch.service_type {
            self.service_type = service;
        }
        if let Some(date) = patch.appointment_date {
            self.appointment_date = date;
        }
        if let Some(time) = patch.appointment_time {
            self.appointment_time = time;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Partial update. `id` and `created_at` cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hhmm::option")]
    pub appointment_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

impl AppointmentPatch {
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// `HH:MM` wire format for times. Reading also accepts `HH:MM:SS`, truncated
/// to the minute so memory always matches what gets written back.
pub mod hhmm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn parse(s: &str) -> Result<NaiveTime, chrono::ParseError> {
        let time = NaiveTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))?;
        Ok(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => super::serialize(t, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|s| super::parse(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
