//! Ordered application of a [`DeviceConfig`] to the device.
//!
//! A [`ConfigSession`] holds the profile enablement and cyclic color state
//! that frames embed. It is owned by exactly one run; single-setting commands
//! start from a fresh session, so their masks carry the power-on defaults.
//!
//! Application order:
//!   1. DPI frame for profiles 0..5, with the session's *current* state mask
//!   2. profile enablement updated in memory
//!   3. color frame for profiles 1..6, with the updated state mask
//!   4. cyclic color set updated in memory
//!   5. one RGB lighting frame
//!
//! Step 1 runs before step 2, so DPI frames carry the enablement that was in
//! effect before this application. The firmware contract depends on this
//! order.

use crate::color::Rgb;
use crate::config::DeviceConfig;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::lighting::{LightingScheme, ScrollwheelMode};
use crate::mask::{CyclicColors, ProfileStates};
use crate::transport::{send_frame, ControlTransport};
use tracing::{debug, info, warn};

/// Per-run device state embedded into frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSession {
    /// 1..=6; embedded in DPI frames.
    pub active_profile: u8,
    pub states: ProfileStates,
    pub cyclic_colors: CyclicColors,
}

impl Default for ConfigSession {
    fn default() -> Self {
        Self {
            active_profile: 1,
            states: ProfileStates::default(),
            cyclic_colors: CyclicColors::default(),
        }
    }
}

/// Which logical step a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// DPI for a 0-based profile.
    Dpi(usize),
    /// Color for a 1-based profile.
    Color(usize),
    Lighting,
}

/// A step that produced no device write.
#[derive(Debug)]
pub struct StepFailure {
    pub step: Step,
    pub error: Error,
}

/// Outcome of a best-effort application.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Frames the transport accepted, in write order.
    pub written: Vec<Frame>,
    /// Steps whose frame could not be built or written.
    pub failures: Vec<StepFailure>,
}

impl ApplyReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl ConfigSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and write a DPI frame for 0-based `profile`.
    pub fn set_dpi(
        &self,
        transport: &dyn ControlTransport,
        profile: usize,
        dpi: i64,
    ) -> Result<Frame> {
        let frame = Frame::dpi(self.active_profile, profile, dpi, &self.states)?;
        send_frame(transport, &frame)?;
        Ok(frame)
    }

    /// Build and write a color frame for 1-based `profile`.
    pub fn set_color(
        &self,
        transport: &dyn ControlTransport,
        profile: i64,
        color: Rgb,
    ) -> Result<Frame> {
        let frame = Frame::profile_color(profile, color, &self.states)?;
        send_frame(transport, &frame)?;
        Ok(frame)
    }

    /// Build and write the RGB lighting frame.
    pub fn set_lighting(
        &self,
        transport: &dyn ControlTransport,
        scheme: &LightingScheme,
    ) -> Result<Frame> {
        let frame = Frame::rgb_lighting(&self.cyclic_colors, scheme)?;
        send_frame(transport, &frame)?;
        Ok(frame)
    }

    /// Build and write the scroll-wheel frame.
    pub fn set_scrollwheel(
        &self,
        transport: &dyn ControlTransport,
        mode: ScrollwheelMode,
    ) -> Result<Frame> {
        let frame = Frame::scrollwheel(mode)?;
        send_frame(transport, &frame)?;
        Ok(frame)
    }

    /// Apply a full configuration, best effort.
    ///
    /// A frame that fails to encode or write is recorded in the report and the
    /// remaining steps still run.
    pub fn apply(
        &mut self,
        config: &DeviceConfig,
        transport: &dyn ControlTransport,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();
        self.active_profile = config.active_profile;
        debug!(active_profile = self.active_profile, "Applying configuration");

        for (profile, &dpi) in config.dpis.iter().enumerate() {
            record(&mut report, Step::Dpi(profile), self.set_dpi(transport, profile, dpi));
        }

        self.states = config.states;

        for (i, &color) in config.colors.iter().enumerate() {
            let profile = i + 1;
            record(
                &mut report,
                Step::Color(profile),
                self.set_color(transport, profile as i64, color),
            );
        }

        self.cyclic_colors = config.cyclic_colors;

        record(
            &mut report,
            Step::Lighting,
            self.set_lighting(transport, &config.scheme),
        );

        info!(
            written = report.written.len(),
            failed = report.failures.len(),
            active_profile = self.active_profile,
            "Configuration applied"
        );
        report
    }
}

/// Frames a full application would write, without a device.
///
/// Frames that fail to encode are skipped, matching what [`ConfigSession::apply`]
/// would deliver through a transport that never fails.
pub fn plan(config: &DeviceConfig) -> Vec<Frame> {
    let mut session = ConfigSession::new();
    let recorder = Recorder::default();
    session.apply(config, &recorder);
    recorder.frames.into_inner()
}

#[derive(Default)]
struct Recorder {
    frames: std::cell::RefCell<Vec<Frame>>,
}

impl ControlTransport for Recorder {
    fn write_control_payload(&self, frame: &Frame) -> Result<()> {
        self.frames.borrow_mut().push(*frame);
        Ok(())
    }
}

fn record(report: &mut ApplyReport, step: Step, result: Result<Frame>) {
    match result {
        Ok(frame) => report.written.push(frame),
        Err(error) => {
            warn!(?step, %error, "Step failed; continuing");
            report.failures.push(StepFailure { step, error });
        }
    }
}
