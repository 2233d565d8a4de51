//! Appointment storage for Dawa
//!
//! The store owns the canonical, newest-first collection for the running
//! session and writes a full JSON snapshot to its slot after every change.

mod seed;
mod slots;
mod traits;

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::invariants;
use crate::models::{Appointment, AppointmentId, AppointmentPatch};

pub use seed::demo_appointments;
pub use slots::{FileSlot, MemorySlot};
pub use traits::KeyValueSlot;

/// Default slot key for the appointment snapshot
pub const DEFAULT_KEY: &str = "dawa_appointments";

/// Owned repository of appointments
pub struct AppointmentStore<S: KeyValueSlot> {
    slot: S,
    key: String,
    appointments: Vec<Appointment>,
}

impl<S: KeyValueSlot> AppointmentStore<S> {
    /// Load the collection from `slot`, seeding demo data when the slot is
    /// empty or unreadable. A seed for an empty slot is written straight
    /// back so its dates stay fixed across restarts. Never fails.
    #[instrument(skip(slot))]
    pub fn load(slot: S, key: &str) -> Self {
        let (appointments, source) = read_snapshot(&slot, key);
        info!(count = appointments.len(), "Appointments loaded");
        let store = Self {
            slot,
            key: key.to_string(),
            appointments,
        };
        store.persist_seed(source);
        store
    }

    /// Re-read the slot, replacing the in-memory collection
    pub fn reload(&mut self) -> &[Appointment] {
        let (appointments, source) = read_snapshot(&self.slot, &self.key);
        self.appointments = appointments;
        self.persist_seed(source);
        &self.appointments
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn get(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| &a.id == id)
    }

    /// Whether any stored appointment already holds this date and time
    pub fn is_slot_taken(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.appointments
            .iter()
            .any(|a| a.appointment_date == date && a.appointment_time == time)
    }

    /// Write the current collection, empty or not
    pub fn save(&self) -> Result<()> {
        self.persist(&self.appointments)
    }

    /// Prepend a new appointment and persist
    pub fn insert(&mut self, appointment: Appointment) -> Result<()> {
        invariants::assert_id_unused(&self.appointments, &appointment.id);
        let id = appointment.id.clone();
        let mut next = Vec::with_capacity(self.appointments.len() + 1);
        next.push(appointment);
        next.extend(self.appointments.iter().cloned());
        self.commit(next)?;
        info!(id = %id, "Appointment stored");
        Ok(())
    }

    /// Merge `patch` into the matching record. Returns false (and writes
    /// nothing) when no record has this id.
    pub fn update(&mut self, id: &AppointmentId, patch: &AppointmentPatch) -> Result<bool> {
        let Some(pos) = self.position(id) else {
            debug!(id = %id, "Update skipped, no such appointment");
            return Ok(false);
        };

        let mut next = self.appointments.clone();
        next[pos].apply(patch);
        self.commit(next)?;
        info!(id = %id, "Appointment updated");
        Ok(true)
    }

    /// Remove the matching record. Returns false when no record has this id.
    pub fn delete(&mut self, id: &AppointmentId) -> Result<bool> {
        let Some(pos) = self.position(id) else {
            debug!(id = %id, "Delete skipped, no such appointment");
            return Ok(false);
        };

        let mut next = self.appointments.clone();
        next.remove(pos);
        self.commit(next)?;
        info!(id = %id, "Appointment deleted");
        Ok(true)
    }

    fn position(&self, id: &AppointmentId) -> Option<usize> {
        self.appointments.iter().position(|a| &a.id == id)
    }

    /// Persist first, then swap in, so a failed write leaves memory untouched
    fn commit(&mut self, next: Vec<Appointment>) -> Result<()> {
        self.persist(&next)?;
        self.appointments = next;
        Ok(())
    }

    /// Corrupt or unreadable payloads are left in place
    fn persist_seed(&self, source: Snapshot) {
        if source != Snapshot::Missing {
            return;
        }
        if let Err(e) = self.save() {
            warn!(error = %e, "Could not save demo data");
        }
    }

    fn persist(&self, appointments: &[Appointment]) -> Result<()> {
        let raw = serde_json::to_string(appointments)?;
        self.slot.write(&self.key, &raw)
    }
}

/// Where a loaded collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Snapshot {
    Saved,
    Missing,
    Unusable,
}

fn read_snapshot<S: KeyValueSlot>(slot: &S, key: &str) -> (Vec<Appointment>, Snapshot) {
    match slot.read(key) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<Appointment>>(&raw) {
            Ok(appointments) => (appointments, Snapshot::Saved),
            Err(e) => {
                warn!(error = %e, "Saved appointments are corrupt, using demo data");
                (demo_appointments(Utc::now()), Snapshot::Unusable)
            }
        },
        Ok(None) => {
            debug!("No saved appointments, using demo data");
            (demo_appointments(Utc::now()), Snapshot::Missing)
        }
        Err(e) => {
            warn!(error = %e, "Could not read saved appointments, using demo data");
            (demo_appointments(Utc::now()), Snapshot::Unusable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{AppointmentStatus, ServiceType};

    struct BrokenSlot;

    impl KeyValueSlot for BrokenSlot {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Io(std::io::Error::other("disk gone")))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Io(std::io::Error::other("disk gone")))
        }
    }

    fn booking(name: &str, date: &str, time: &str) -> Appointment {
        Appointment::new(
            name.to_string(),
            "+15550000".to_string(),
            ServiceType::WellnessConsultation,
            date.parse().unwrap(),
            NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        )
    }

    #[test]
    fn test_empty_slot_seeds_demo_data() {
        let slot = MemorySlot::new();
        let store = AppointmentStore::load(slot.clone(), DEFAULT_KEY);
        assert_eq!(store.len(), 2);
        assert_eq!(store.appointments()[0].client_name, "Sarah Johnson");

        // Seed is written once, so a restart keeps the same records
        assert!(slot.read(DEFAULT_KEY).unwrap().is_some());
        let restarted = AppointmentStore::load(slot, DEFAULT_KEY);
        assert_eq!(restarted.appointments(), store.appointments());
    }

    #[test]
    fn test_corrupt_payload_falls_back_to_seed() {
        let slot = MemorySlot::with_value(DEFAULT_KEY, "{not json");
        let store = AppointmentStore::load(slot.clone(), DEFAULT_KEY);
        assert_eq!(store.len(), 2);
        assert_eq!(slot.read(DEFAULT_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_save_round_trips_full_and_empty() {
        let slot = MemorySlot::new();
        let mut store = AppointmentStore::load(slot.clone(), DEFAULT_KEY);
        store.insert(booking("Ana Gomez", "2025-06-01", "09:00")).unwrap();
        store.save().unwrap();

        let reloaded = AppointmentStore::load(slot.clone(), DEFAULT_KEY);
        assert_eq!(reloaded.appointments(), store.appointments());

        let empty_slot = MemorySlot::with_value(DEFAULT_KEY, "[]");
        let empty = AppointmentStore::load(empty_slot.clone(), DEFAULT_KEY);
        assert!(empty.is_empty());
        empty.save().unwrap();
        assert_eq!(empty_slot.read(DEFAULT_KEY).unwrap().as_deref(), Some("[]"));
        assert!(AppointmentStore::load(empty_slot, DEFAULT_KEY).is_empty());
    }

    #[test]
    fn test_legacy_seconds_still_conflict_after_reload() {
        let legacy = r#"[{
            "id": "legacy",
            "clientName": "Sarah Johnson",
            "phoneNumber": "+1234567890",
            "serviceType": "Massage Therapy",
            "appointmentDate": "2025-06-01",
            "appointmentTime": "09:00:30",
            "status": "Pending",
            "createdAt": "2025-01-01T08:00:00Z"
        }]"#;
        let slot = MemorySlot::with_value(DEFAULT_KEY, legacy);
        let store = AppointmentStore::load(slot.clone(), DEFAULT_KEY);

        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert!(store.is_slot_taken("2025-06-01".parse().unwrap(), nine));

        store.save().unwrap();
        let reloaded = AppointmentStore::load(slot, DEFAULT_KEY);
        assert_eq!(reloaded.appointments(), store.appointments());
    }

    #[test]
    fn test_unreadable_slot_falls_back_to_seed() {
        let store = AppointmentStore::load(BrokenSlot, DEFAULT_KEY);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_prepends_and_round_trips() {
        let slot = MemorySlot::new();
        let mut store = AppointmentStore::load(slot.clone(), DEFAULT_KEY);
        let app = booking("Ana Gomez", "2025-06-01", "09:00");
        store.insert(app.clone()).unwrap();
        assert_eq!(store.appointments()[0], app);

        let reloaded = AppointmentStore::load(slot, DEFAULT_KEY);
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.appointments()[0], app);
    }

    #[test]
    fn test_update_status_only_touches_target() {
        let mut store = AppointmentStore::load(MemorySlot::new(), DEFAULT_KEY);
        let before = store.appointments().to_vec();
        let id = before[1].id.clone();

        let found = store
            .update(&id, &AppointmentPatch::status(AppointmentStatus::Completed))
            .unwrap();
        assert!(found);

        let after = store.appointments();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].status, AppointmentStatus::Completed);
        let mut expected = before[1].clone();
        expected.status = AppointmentStatus::Completed;
        assert_eq!(after[1], expected);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = AppointmentStore::load(MemorySlot::new(), DEFAULT_KEY);
        let before = store.appointments().to_vec();
        let found = store
            .update(
                &AppointmentId::from("missing"),
                &AppointmentPatch::status(AppointmentStatus::Cancelled),
            )
            .unwrap();
        assert!(!found);
        assert_eq!(store.appointments(), before.as_slice());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut store = AppointmentStore::load(MemorySlot::new(), DEFAULT_KEY);
        assert!(store.delete(&AppointmentId::from("1")).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.appointments()[0].id, AppointmentId::from("2"));

        assert!(!store.delete(&AppointmentId::from("1")).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_collection_is_persisted() {
        let slot = MemorySlot::new();
        let mut store = AppointmentStore::load(slot.clone(), DEFAULT_KEY);
        store.delete(&AppointmentId::from("1")).unwrap();
        store.delete(&AppointmentId::from("2")).unwrap();
        assert!(store.is_empty());

        let reloaded = AppointmentStore::load(slot, DEFAULT_KEY);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let mut store = AppointmentStore::load(BrokenSlot, DEFAULT_KEY);
        let result = store.insert(booking("Ana Gomez", "2025-06-01", "09:00"));
        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_file_slot_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AppointmentStore::load(FileSlot::open(dir.path()).unwrap(), DEFAULT_KEY);
        store.insert(booking("Ana Gomez", "2025-06-01", "09:00")).unwrap();

        let mut reopened = AppointmentStore::load(FileSlot::open(dir.path()).unwrap(), DEFAULT_KEY);
        assert_eq!(reopened.len(), 3);
        assert_eq!(reopened.reload().len(), 3);
        assert!(reopened.is_slot_taken(
            "2025-06-01".parse().unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        ));
    }
}
