//! Admin dashboard view model

use chrono::{NaiveDate, Utc};
use dawa_core::admin::{self, AppointmentQuery, DashboardStats, DayLoad, PendingDeletion};
use dawa_core::{Appointment, AppointmentId, AppointmentStatus, Error, Result};

use crate::state::AppState;

/// One line of the appointment table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRow {
    pub id: String,
    pub icon: &'static str,
    pub client_name: String,
    pub service: &'static str,
    pub phone_number: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
}

impl From<&Appointment> for AppointmentRow {
    fn from(a: &Appointment) -> Self {
        Self {
            id: a.id.to_string(),
            icon: a.service_type.icon(),
            client_name: a.client_name.clone(),
            service: a.service_type.display_name(),
            phone_number: a.phone_number.clone(),
            date: a.appointment_date.to_string(),
            time: a.time_label(),
            status: a.status,
        }
    }
}

/// Dashboard filters. Every read recomputes from the store.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub query: AppointmentQuery,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rows(&self, state: &AppState) -> Result<Vec<AppointmentRow>> {
        state.require_admin()?;
        let store = state.store.lock().await;
        Ok(self
            .query
            .apply(store.appointments())
            .into_iter()
            .map(AppointmentRow::from)
            .collect())
    }

    pub async fn stats(&self, state: &AppState) -> Result<DashboardStats> {
        state.require_admin()?;
        let store = state.store.lock().await;
        Ok(DashboardStats::compute(store.appointments(), today()))
    }

    pub async fn week(&self, state: &AppState) -> Result<Vec<DayLoad>> {
        state.require_admin()?;
        let store = state.store.lock().await;
        Ok(admin::week_overview(store.appointments(), today()))
    }

    pub async fn set_status(
        &self,
        state: &AppState,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> Result<()> {
        state.require_admin()?;
        let mut store = state.store.lock().await;
        if admin::set_status(&mut *store, id, status)? {
            Ok(())
        } else {
            Err(Error::NotFound(format!("Appointment {}", id)))
        }
    }

    /// First half of a delete; see [`Dashboard::confirm_delete`]
    pub async fn request_delete(
        &self,
        state: &AppState,
        id: &AppointmentId,
    ) -> Result<PendingDeletion> {
        state.require_admin()?;
        let store = state.store.lock().await;
        admin::request_delete(&*store, id)
            .ok_or_else(|| Error::NotFound(format!("Appointment {}", id)))
    }

    pub async fn confirm_delete(&self, state: &AppState, pending: PendingDeletion) -> Result<()> {
        state.require_admin()?;
        let mut store = state.store.lock().await;
        let id = pending.id().clone();
        if pending.confirm(&mut *store)? {
            Ok(())
        } else {
            Err(Error::NotFound(format!("Appointment {}", id)))
        }
    }
}

/// Today's date in UTC, matching how dates are stored
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::memory_state;
    use dawa_core::{MemorySlot, StatusFilter};

    #[tokio::test]
    async fn test_requires_login() {
        let (state, _) = memory_state(MemorySlot::new());
        let dashboard = Dashboard::new();
        assert!(matches!(
            dashboard.rows(&state).await,
            Err(Error::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_status_change_and_filter() {
        let (state, _) = memory_state(MemorySlot::new());
        state.login("admin").unwrap();
        let mut dashboard = Dashboard::new();
        let id = AppointmentId::from("2");

        dashboard
            .set_status(&state, &id, AppointmentStatus::Completed)
            .await
            .unwrap();

        dashboard.query.status = StatusFilter::Only(AppointmentStatus::Pending);
        assert!(dashboard.rows(&state).await.unwrap().iter().all(|r| r.id != "2"));

        dashboard.query.status = StatusFilter::Only(AppointmentStatus::Completed);
        let rows = dashboard.rows(&state).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].client_name, "Michael Chen");
        assert_eq!(rows[0].icon, "💪");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (state, _) = memory_state(MemorySlot::new());
        state.login("admin").unwrap();
        let dashboard = Dashboard::new();
        let missing = AppointmentId::from("nope");

        assert!(matches!(
            dashboard
                .set_status(&state, &missing, AppointmentStatus::Cancelled)
                .await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            dashboard.request_delete(&state, &missing).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_after_confirmation() {
        let (state, _) = memory_state(MemorySlot::new());
        state.login("admin").unwrap();
        let dashboard = Dashboard::new();

        let pending = dashboard
            .request_delete(&state, &AppointmentId::from("1"))
            .await
            .unwrap();
        dashboard.confirm_delete(&state, pending).await.unwrap();

        let stats = dashboard.stats(&state).await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(dashboard.week(&state).await.unwrap().len(), 7);
    }
}
