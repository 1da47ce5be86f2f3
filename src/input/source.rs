//! Raw sample source boundary
//!
//! The console polling calls (pad scan, remote probe, USB pad reads) live
//! outside this crate. A [`RawSampleSource`] hands the driver one
//! [`RawSample`] per port per poll in the family's native encoding.
//!
//! Probe order mirrors the hardware: GameCube pads are scanned first and
//! short-circuit the port, then the USB six-axis pad, then the Wii Remote.

use serde::{Deserialize, Serialize};

use super::kind::DeviceKind;
use super::port::{Port, MAX_PORTS};
use crate::error::InputError;

/// Stick reading in polar form, as reported by remote extensions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarStick {
    /// Deflection, nominally `0.0..=1.0`; noisy sensors can exceed it
    pub magnitude: f32,
    /// Direction in degrees, 0 = up, clockwise
    pub angle: f32,
}

impl PolarStick {
    pub fn new(magnitude: f32, angle: f32) -> Self {
        Self { magnitude, angle }
    }
}

/// Native analog encoding of one sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "shape")]
pub enum RawAnalog {
    /// No sticks (bare Wii Remote, or nothing attached)
    #[default]
    None,
    /// Signed 8-bit stick deflections, up is positive
    Cartesian {
        #[serde(default)]
        left: [i8; 2],
        #[serde(default)]
        right: [i8; 2],
        /// Analog trigger travel (L, R), 0..=255
        #[serde(default)]
        triggers: [u8; 2],
    },
    /// Magnitude/angle sticks; the Nunchuk only has a left stick
    Polar {
        left: PolarStick,
        #[serde(default)]
        right: Option<PolarStick>,
    },
}

/// One port's raw reading for a single poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Device-kind tag reported by the hardware layer
    pub kind: DeviceKind,
    /// Family-native held-button bitfield
    #[serde(default)]
    pub buttons: u32,
    #[serde(default)]
    pub analog: RawAnalog,
}

impl RawSample {
    pub fn new(kind: DeviceKind, buttons: u32, analog: RawAnalog) -> Self {
        Self { kind, buttons, analog }
    }

    /// Buttons only, no analog data
    pub fn buttons(kind: DeviceKind, buttons: u32) -> Self {
        Self::new(kind, buttons, RawAnalog::None)
    }
}

/// Supplier of raw per-port samples, consumed once per poll
pub trait RawSampleSource {
    /// Bring the hardware layer up; failure aborts driver construction
    fn open(&mut self) -> Result<(), InputError> {
        Ok(())
    }

    /// Latch fresh hardware state; called once at the start of every poll
    fn scan(&mut self) {}

    /// GameCube pad on `port`, probed unconditionally every cycle
    fn fixed_pad(&mut self, port: Port) -> Option<RawSample>;

    /// USB six-axis pad assigned to `port`
    fn six_axis(&mut self, _port: Port) -> Option<RawSample> {
        None
    }

    /// Wii Remote (with or without extension) on `port`
    fn remote(&mut self, port: Port) -> Option<RawSample>;

    /// Release hardware resources
    fn close(&mut self) {}
}

/// In-memory source returning whatever was last staged per port
///
/// Used by tests and by the replay tool. Samples are routed to the probe
/// matching their kind, so a staged GameCube pad wins over anything else.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    staged: [Option<RawSample>; MAX_PORTS],
    scans: u64,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage the sample `port` reports from now on; `None` unplugs it
    pub fn set(&mut self, port: Port, sample: Option<RawSample>) {
        self.staged[port.index()] = sample;
    }

    /// Unplug every port
    pub fn clear(&mut self) {
        self.staged = [None; MAX_PORTS];
    }

    /// Number of completed `scan` calls
    pub fn scans(&self) -> u64 {
        self.scans
    }

    fn staged_if(&self, port: Port, pred: impl Fn(DeviceKind) -> bool) -> Option<RawSample> {
        self.staged[port.index()].filter(|s| pred(s.kind))
    }
}

impl RawSampleSource for ScriptedSource {
    fn scan(&mut self) {
        self.scans += 1;
    }

    fn fixed_pad(&mut self, port: Port) -> Option<RawSample> {
        self.staged_if(port, |k| k == DeviceKind::FixedPad)
    }

    fn six_axis(&mut self, port: Port) -> Option<RawSample> {
        self.staged_if(port, |k| k == DeviceKind::SixAxisPad)
    }

    fn remote(&mut self, port: Port) -> Option<RawSample> {
        self.staged_if(port, |k| {
            matches!(
                k,
                DeviceKind::MotionRemote
                    | DeviceKind::MotionRemoteWithExtension
                    | DeviceKind::ClassicExtension
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(n: u8) -> Port {
        Port::new(n).unwrap()
    }

    #[test]
    fn test_scripted_routes_by_kind() {
        let mut source = ScriptedSource::new();
        source.set(port(0), Some(RawSample::buttons(DeviceKind::FixedPad, 0x0100)));
        source.set(port(1), Some(RawSample::buttons(DeviceKind::ClassicExtension, 0)));

        assert!(source.fixed_pad(port(0)).is_some());
        assert!(source.remote(port(0)).is_none());
        assert!(source.fixed_pad(port(1)).is_none());
        assert!(source.remote(port(1)).is_some());
        assert!(source.six_axis(port(2)).is_none());
    }

    #[test]
    fn test_scripted_unplug() {
        let mut source = ScriptedSource::new();
        source.set(port(3), Some(RawSample::buttons(DeviceKind::SixAxisPad, 1)));
        assert!(source.six_axis(port(3)).is_some());

        source.clear();
        assert!(source.six_axis(port(3)).is_none());
    }

    #[test]
    fn test_sample_yaml() {
        let yaml = r#"
kind: classic_extension
buttons: 16
analog:
  shape: polar
  left: { magnitude: 1.0, angle: 90.0 }
"#;
        let sample: RawSample = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(sample.kind, DeviceKind::ClassicExtension);
        assert_eq!(sample.buttons, 16);
        assert!(matches!(sample.analog, RawAnalog::Polar { right: None, .. }));
    }
}
