//! Durable slot trait
//!
//! The appointment collection lives in a single key holding a full JSON
//! snapshot. This trait is the seam between the store and whatever keeps
//! the bytes (a file on disk, memory in tests).

use crate::error::Result;

/// A key-value slot that stores whole serialized snapshots
pub trait KeyValueSlot {
    /// Read the value under `key`, `None` if nothing was ever written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`. Must never leave a partial value behind.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueSlot + ?Sized> KeyValueSlot for &T {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

impl<T: KeyValueSlot + ?Sized> KeyValueSlot for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
