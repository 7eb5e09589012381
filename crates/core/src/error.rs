//! Error types for open-x9-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HID device communication failure (control transfer did not complete).
    #[error("HID error: {0}")]
    Hid(String),

    /// Device not found during enumeration.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Permission denied opening the hidraw node (missing udev rule).
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Another process holds the interface.
    #[error("device busy: {0}")]
    DeviceBusy(String),

    /// A setting has no representation in the device's codebooks.
    #[error("cannot encode {field}: {value}")]
    Encoding { field: &'static str, value: String },

    /// Value out of safe range.
    #[error("value out of range: {field} = {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Malformed or missing settings descriptor section.
    #[error("config section [{section}]: {reason}")]
    ConfigSection {
        section: &'static str,
        reason: String,
    },

    /// Settings descriptor could not be read at all.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
