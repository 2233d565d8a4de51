//! Data models for Dawa

mod appointment;
mod notification;

pub use appointment::*;
pub use notification::*;
