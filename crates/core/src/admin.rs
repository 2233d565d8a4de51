//! Admin query and mutation surface
//!
//! Filtering, recency sorting, dashboard counters and the week overview are
//! plain passes over the current collection, recomputed on every call.
//! Mutations go through the store.

use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Appointment, AppointmentId, AppointmentPatch, AppointmentStatus};
use crate::storage::{AppointmentStore, KeyValueSlot};

/// Status filter for the dashboard list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "All"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Search term plus status filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl AppointmentQuery {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    /// Name matches case-insensitively, phone matches as typed
    pub fn matches(&self, appointment: &Appointment) -> bool {
        let matches_search = self.search.is_empty()
            || appointment
                .client_name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
            || appointment.phone_number.contains(&self.search);

        matches_search && self.status.matches(appointment.status)
    }

    /// Matching records, most recently created first
    pub fn apply<'a>(&self, appointments: &'a [Appointment]) -> Vec<&'a Appointment> {
        let mut rows: Vec<&Appointment> =
            appointments.iter().filter(|a| self.matches(a)).collect();
        // Stable, so equal timestamps keep collection order
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(
            search = %self.search,
            status = %self.status,
            shown = rows.len(),
            total = appointments.len(),
            "Query evaluated"
        );
        rows
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub today: usize,
    pub pending: usize,
}

impl DashboardStats {
    pub fn compute(appointments: &[Appointment], today: NaiveDate) -> Self {
        Self {
            total: appointments.len(),
            today: appointments
                .iter()
                .filter(|a| a.appointment_date == today)
                .count(),
            pending: appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Pending)
                .count(),
        }
    }
}

/// Number of bookings on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayLoad {
    pub date: NaiveDate,
    pub count: usize,
}

/// Bookings per day for `start` and the six days after it
pub fn week_overview(appointments: &[Appointment], start: NaiveDate) -> Vec<DayLoad> {
    (0..7)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let count = appointments
                .iter()
                .filter(|a| a.appointment_date == date)
                .count();
            DayLoad { date, count }
        })
        .collect()
}

/// Set a new status. No transition rules and no conflict re-check.
pub fn set_status<S: KeyValueSlot>(
    store: &mut AppointmentStore<S>,
    id: &AppointmentId,
    status: AppointmentStatus,
) -> Result<bool> {
    let changed = store.update(id, &AppointmentPatch::status(status))?;
    if changed {
        info!(id = %id, status = %status, "Status changed");
    }
    Ok(changed)
}

/// Start a delete. Nothing happens until the returned handle is confirmed.
pub fn request_delete<S: KeyValueSlot>(
    store: &AppointmentStore<S>,
    id: &AppointmentId,
) -> Option<PendingDeletion> {
    store.get(id).map(|a| PendingDeletion {
        id: a.id.clone(),
        client_name: a.client_name.clone(),
    })
}

/// A delete waiting for explicit confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending deletion does nothing until confirmed"]
pub struct PendingDeletion {
    id: AppointmentId,
    client_name: String,
}

impl PendingDeletion {
    pub fn id(&self) -> &AppointmentId {
        &self.id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn prompt(&self) -> &'static str {
        "Are you sure you want to delete this appointment?"
    }

    /// Irreversible hard delete
    pub fn confirm<S: KeyValueSlot>(self, store: &mut AppointmentStore<S>) -> Result<bool> {
        store.delete(&self.id)
    }

    pub fn cancel(self) {
        debug!(id = %self.id, "Delete cancelled");
    }
}
