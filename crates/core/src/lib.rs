//! open-x9-core: X9 control protocol, settings descriptor, and device discovery.
//!
//! This crate turns mouse settings (DPI, profile colors, lighting, profile
//! enablement) into the 8-byte feature reports the X9 firmware accepts, and
//! replays a `driver.conf` settings descriptor as an ordered frame sequence.

pub mod apply;
pub mod codebook;
pub mod color;
pub mod comm;
pub mod config;
pub mod device;
pub mod dpi;
pub mod error;
pub mod frame;
pub mod lighting;
pub mod mask;
pub mod safety;
pub mod transport;

/// X9 USB Vendor ID.
pub const X9_VID: u16 = 0x18F8;

/// X9 USB Product ID.
pub const X9_PID: u16 = 0x0FC0;

/// Interface that accepts control feature reports.
pub const CONTROL_INTERFACE: i32 = 1;
