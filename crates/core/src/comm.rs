//! Device session error classification.
//!
//! hidapi reports failures as strings; this module maps them onto the typed
//! session errors and derives a readiness status for user-facing output.

use crate::error::{Error, Result};

/// Classification of session errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Device is not connected.
    Disconnected,
    /// Permission denied: missing udev rule for the hidraw node.
    PermissionDenied,
    /// Another process holds the device.
    Busy,
    /// Transfer failed after the device was opened.
    Io,
    /// Nothing was sent: the request could not be encoded.
    Rejected,
}

impl ErrorClass {
    /// Classify an error for reporting.
    pub fn classify(err: &Error) -> Self {
        match err {
            Error::DeviceNotFound(_) => Self::Disconnected,
            Error::PermissionDenied(_) => Self::PermissionDenied,
            Error::DeviceBusy(_) => Self::Busy,
            Error::Hid(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("disconnect")
                    || lower.contains("not found")
                    || lower.contains("no such device")
                {
                    Self::Disconnected
                } else if lower.contains("permission")
                    || lower.contains("access denied")
                    || lower.contains("access is denied")
                {
                    Self::PermissionDenied
                } else if lower.contains("busy") {
                    Self::Busy
                } else {
                    Self::Io
                }
            }
            Error::Encoding { .. }
            | Error::OutOfRange { .. }
            | Error::ConfigSection { .. }
            | Error::Config(_) => Self::Rejected,
        }
    }
}

/// Turn a raw hidapi failure message from opening the device into a typed
/// session error.
pub fn open_error(msg: impl Into<String>) -> Error {
    let msg = msg.into();
    match ErrorClass::classify(&Error::Hid(msg.clone())) {
        ErrorClass::Disconnected => Error::DeviceNotFound(msg),
        ErrorClass::PermissionDenied => Error::PermissionDenied(msg),
        ErrorClass::Busy => Error::DeviceBusy(msg),
        _ => Error::Hid(msg),
    }
}

/// Device readiness for user-facing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// Device is open and can be configured.
    Ready,
    /// Device is not found / disconnected.
    Disconnected,
    /// Permission denied: needs a udev rule.
    PermissionError,
    /// Another process holds the device.
    Busy,
    /// Any other failure.
    Error,
}

impl DeviceStatus {
    /// Derive status from the outcome of acquiring the device.
    pub fn from_acquire<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::Ready,
            Err(e) => match ErrorClass::classify(e) {
                ErrorClass::Disconnected => Self::Disconnected,
                ErrorClass::PermissionDenied => Self::PermissionError,
                ErrorClass::Busy => Self::Busy,
                _ => Self::Error,
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Remediation hint shown next to the status.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Ready => None,
            Self::Disconnected => Some("Device not found. Try replugging."),
            Self::PermissionError => Some(
                "Add a udev rule granting access to the X9 hidraw node \
                 (see rootfs/usr/lib/udev/rules.d/70-open-x9.rules); running as root also works but is not recommended.",
            ),
            Self::Busy => Some("Another program is using the device."),
            Self::Error => Some("Device is not ready to be configured."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_typed_errors() {
        assert_eq!(
            ErrorClass::classify(&Error::DeviceNotFound("X9".into())),
            ErrorClass::Disconnected
        );
        assert_eq!(
            ErrorClass::classify(&Error::PermissionDenied("hidraw3".into())),
            ErrorClass::PermissionDenied
        );
        assert_eq!(
            ErrorClass::classify(&Error::DeviceBusy("hidraw3".into())),
            ErrorClass::Busy
        );
    }

    #[test]
    fn classify_hid_messages() {
        assert_eq!(
            ErrorClass::classify(&Error::Hid("No such device".into())),
            ErrorClass::Disconnected
        );
        assert_eq!(
            ErrorClass::classify(&Error::Hid("Permission denied (os error 13)".into())),
            ErrorClass::PermissionDenied
        );
        assert_eq!(
            ErrorClass::classify(&Error::Hid("Device or resource busy".into())),
            ErrorClass::Busy
        );
        assert_eq!(
            ErrorClass::classify(&Error::Hid("Broken pipe".into())),
            ErrorClass::Io
        );
    }

    #[test]
    fn classify_encoding_as_rejected() {
        let err = Error::Encoding {
            field: "dpi",
            value: "1300".into(),
        };
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Rejected);
    }

    #[test]
    fn open_error_maps_to_typed_variants() {
        assert!(matches!(
            open_error("Permission denied (os error 13)"),
            Error::PermissionDenied(_)
        ));
        assert!(matches!(open_error("Device or resource busy"), Error::DeviceBusy(_)));
        assert!(matches!(open_error("No such device"), Error::DeviceNotFound(_)));
        assert!(matches!(open_error("hid_open_path failed"), Error::Hid(_)));
    }

    #[test]
    fn status_from_acquire() {
        let ok: Result<()> = Ok(());
        assert_eq!(DeviceStatus::from_acquire(&ok), DeviceStatus::Ready);
        assert!(DeviceStatus::from_acquire(&ok).is_ready());
        assert!(DeviceStatus::Ready.hint().is_none());

        let denied: Result<()> = Err(Error::PermissionDenied("hidraw3".into()));
        let status = DeviceStatus::from_acquire(&denied);
        assert_eq!(status, DeviceStatus::PermissionError);
        assert!(status.hint().unwrap().contains("udev"));

        let missing: Result<()> = Err(Error::DeviceNotFound("X9".into()));
        assert_eq!(DeviceStatus::from_acquire(&missing), DeviceStatus::Disconnected);
    }
}
