//! Control transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that the real hidraw session and
//! mock devices share the same interface.

use crate::error::Result;
use crate::frame::Frame;
use tracing::{trace, warn};

/// Abstraction over the device's SET_REPORT control transfer.
///
/// Implementations own an exclusively acquired device handle; the handle is
/// released when the implementation is dropped.
pub trait ControlTransport {
    /// Deliver one 8-byte control payload.
    fn write_control_payload(&self, frame: &Frame) -> Result<()>;
}

/// Send a frame, tracing it on the way out.
pub fn send_frame(transport: &dyn ControlTransport, frame: &Frame) -> Result<()> {
    trace!(
        opcode = format_args!("0x{:02X}", frame.opcode()),
        frame_hex = %frame,
        "X9 TX"
    );

    transport.write_control_payload(frame).inspect_err(|e| {
        warn!(
            opcode = format_args!("0x{:02X}", frame.opcode()),
            error = %e,
            "Control write failed"
        );
    })
}

/// A mock transport for testing.
///
/// Records every frame it accepts and can be told to fail specific writes.
#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::error::Error;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Mock transport that records written frames.
    pub struct MockTransport {
        written: Mutex<Vec<Frame>>,
        attempts: Mutex<usize>,
        fail_on: Mutex<HashSet<usize>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
                attempts: Mutex::new(0),
                fail_on: Mutex::new(HashSet::new()),
            }
        }

        /// Make the `n`th write attempt (0-based) fail with an I/O error.
        pub fn fail_attempt(&self, n: usize) {
            self.fail_on.lock().unwrap().insert(n);
        }

        /// Frames successfully written so far, in order.
        pub fn written(&self) -> Vec<Frame> {
            self.written.lock().unwrap().clone()
        }

        /// Total write attempts, failed ones included.
        pub fn attempts(&self) -> usize {
            *self.attempts.lock().unwrap()
        }
    }

    impl ControlTransport for MockTransport {
        fn write_control_payload(&self, frame: &Frame) -> Result<()> {
            let mut attempts = self.attempts.lock().unwrap();
            let attempt = *attempts;
            *attempts += 1;

            if self.fail_on.lock().unwrap().contains(&attempt) {
                return Err(Error::Hid(format!(
                    "mock: write {attempt} failed for frame {frame}"
                )));
            }

            self.written.lock().unwrap().push(*frame);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::ScrollwheelMode;

    #[test]
    fn send_frame_delivers_exact_bytes() {
        let mock = mock::MockTransport::new();
        let frame = Frame::scrollwheel(ScrollwheelMode::Volume).unwrap();
        send_frame(&mock, &frame).unwrap();
        assert_eq!(mock.written(), vec![frame]);
    }

    #[test]
    fn send_frame_surfaces_write_failure() {
        let mock = mock::MockTransport::new();
        mock.fail_attempt(0);
        let frame = Frame::scrollwheel(ScrollwheelMode::Scroll).unwrap();
        assert!(send_frame(&mock, &frame).is_err());
        assert!(mock.written().is_empty());
        assert_eq!(mock.attempts(), 1);
    }
}
