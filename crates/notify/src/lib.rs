//! Dawa Notification Library
//!
//! Outbound WhatsApp-style messages for booking events.
//!
//! # Architecture
//!
//! - **Templates**: fixed client confirmation and admin alert texts
//! - **Transport**: anything implementing `dawa_core::Notifier`; this crate
//!   ships a simulated one that waits, logs, and never delivers
//!
//! # Usage
//!
//! ```ignore
//! let notifier = SimulatedWhatsApp::new(Templates::from_config(&config), latency);
//! let intake = BookingIntake::new(notifier);
//! let receipt = intake.submit(&mut store, &request).await?;
//! ```

pub mod error;
pub mod templates;
pub mod whatsapp;

pub use error::{Error, Result};
pub use templates::Templates;
pub use whatsapp::SimulatedWhatsApp;
