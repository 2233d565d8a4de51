//! Dawa Core Library
//!
//! Appointment models, storage, booking intake, and the admin surface for
//! the Dawa practice booking tool.

pub mod admin;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gate;
pub mod intake;
pub mod invariants;
pub mod models;
pub mod storage;

pub use admin::{AppointmentQuery, DashboardStats, DayLoad, PendingDeletion, StatusFilter};
pub use config::ClinicConfig;
pub use dispatch::Notifier;
pub use error::{Error, Result};
pub use gate::{AdminGate, AdminSession};
pub use intake::{BookingIntake, BookingReceipt, BookingRequest};
pub use models::*;
pub use storage::{AppointmentStore, FileSlot, KeyValueSlot, MemorySlot};
