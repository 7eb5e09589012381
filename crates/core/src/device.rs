//! Device discovery.

use crate::error::{Error, Result};
use crate::{CONTROL_INTERFACE, X9_PID, X9_VID};
use tracing::{debug, info};

/// Information about a discovered X9 control interface.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub vid: u16,
    pub pid: u16,
    pub interface: i32,
    pub path: String,
    pub product: Option<String>,
    pub serial: Option<String>,
}

impl DeviceInfo {
    /// Display name, falling back to the USB IDs.
    pub fn name(&self) -> String {
        self.product
            .clone()
            .unwrap_or_else(|| format!("X9 mouse ({:04x}:{:04x})", self.vid, self.pid))
    }
}

/// Whether a HID interface is the X9 control interface.
pub fn is_control_interface(vid: u16, pid: u16, interface: i32) -> bool {
    vid == X9_VID && pid == X9_PID && interface == CONTROL_INTERFACE
}

/// Discover all connected X9 control interfaces.
pub fn discover_devices() -> Result<Vec<DeviceInfo>> {
    debug!("Starting HID device enumeration");
    let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;

    let mut devices = Vec::new();
    for info in api.device_list() {
        if !is_control_interface(info.vendor_id(), info.product_id(), info.interface_number()) {
            continue;
        }

        info!(
            vid = format_args!("0x{:04X}", info.vendor_id()),
            pid = format_args!("0x{:04X}", info.product_id()),
            interface = info.interface_number(),
            path = %info.path().to_string_lossy(),
            "Found X9 device"
        );
        devices.push(DeviceInfo {
            vid: info.vendor_id(),
            pid: info.product_id(),
            interface: info.interface_number(),
            path: info.path().to_string_lossy().into_owned(),
            product: info.product_string().map(|s| s.to_string()),
            serial: info.serial_number().map(|s| s.to_string()),
        });
    }

    debug!(count = devices.len(), "Device enumeration complete");
    Ok(devices)
}

/// First connected X9 control interface.
pub fn find_device() -> Result<DeviceInfo> {
    discover_devices()?.into_iter().next().ok_or_else(|| {
        Error::DeviceNotFound(format!(
            "no device with VID=0x{X9_VID:04X} PID=0x{X9_PID:04X} interface {CONTROL_INTERFACE}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_interface_match() {
        assert!(is_control_interface(0x18F8, 0x0FC0, 1));
        assert!(!is_control_interface(0x18F8, 0x0FC0, 0));
        assert!(!is_control_interface(0x046D, 0x0FC0, 1));
        assert!(!is_control_interface(0x18F8, 0x0FC1, 1));
    }

    #[test]
    fn name_falls_back_to_ids() {
        let info = DeviceInfo {
            vid: X9_VID,
            pid: X9_PID,
            interface: CONTROL_INTERFACE,
            path: "/dev/hidraw3".into(),
            product: None,
            serial: None,
        };
        assert_eq!(info.name(), "X9 mouse (18f8:0fc0)");

        let named = DeviceInfo {
            product: Some("2.4G Wireless Mouse".into()),
            ..info
        };
        assert_eq!(named.name(), "2.4G Wireless Mouse");
    }
}
