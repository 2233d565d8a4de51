//! View models for the console front end

mod auth;
mod booking;
mod dashboard;

pub use auth::AuthPanel;
pub use booking::BookingForm;
pub use dashboard::{AppointmentRow, Dashboard};
