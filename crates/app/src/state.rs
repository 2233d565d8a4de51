//! Application state management

use std::sync::{Arc, Mutex};
use std::time::Duration;

use dawa_core::{
    AdminGate, AdminSession, AppointmentStore, BookingIntake, ClinicConfig, Error, FileSlot,
    KeyValueSlot, Notifier, Result,
};
use dawa_notify::{SimulatedWhatsApp, Templates};

/// Slot behind the store; a file in production, memory in tests
pub type SharedSlot = Box<dyn KeyValueSlot + Send + Sync>;

/// Main application state
pub struct AppState {
    pub config: ClinicConfig,
    pub store: tokio::sync::Mutex<AppointmentStore<SharedSlot>>,
    pub intake: BookingIntake<Arc<dyn Notifier>>,
    gate: AdminGate,
    /// Admin login for this run only, never persisted
    admin_session: Mutex<Option<AdminSession>>,
}

impl AppState {
    /// Open the snapshot file and wire up the simulated WhatsApp transport
    pub fn new(config: ClinicConfig) -> Result<Self> {
        let data_dir = config.data_dir()?;
        let slot = FileSlot::open(&data_dir)?;
        tracing::info!(path = %slot.path_for(&config.storage.key).display(), "Appointment snapshot");

        let notifier = SimulatedWhatsApp::new(
            Templates::from_config(&config),
            Duration::from_millis(config.notifications.latency_ms),
        );

        Self::with_parts(config, Box::new(slot), Arc::new(notifier))
    }

    /// Build from explicit collaborators
    pub fn with_parts(
        config: ClinicConfig,
        slot: SharedSlot,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let store = AppointmentStore::load(slot, &config.storage.key);
        let gate = AdminGate::new(&config.admin.passphrase)?;

        Ok(Self {
            config,
            store: tokio::sync::Mutex::new(store),
            intake: BookingIntake::new(notifier),
            gate,
            admin_session: Mutex::new(None),
        })
    }

    pub fn login(&self, passphrase: &str) -> Result<()> {
        let session = self.gate.login(passphrase)?;
        *self.admin_session.lock().unwrap() = Some(session);
        Ok(())
    }

    pub fn logout(&self) {
        if self.admin_session.lock().unwrap().take().is_some() {
            tracing::info!("Admin logged out");
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin_session.lock().unwrap().is_some()
    }

    /// Gate for every dashboard action
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::Authentication("Admin login required.".into()))
        }
    }
}
