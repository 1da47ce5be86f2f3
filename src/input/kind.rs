//! Device families a port can report

use serde::{Deserialize, Serialize};
use std::fmt;

/// Controller family attached to a port
///
/// Changes only through hotplug reclassification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// GameCube pad on the front ports
    FixedPad,
    /// Wii Remote with nothing plugged in (held sideways)
    MotionRemote,
    /// Wii Remote with a Nunchuk attached (held upright)
    MotionRemoteWithExtension,
    /// Wii Remote with a Classic Controller attached
    ClassicExtension,
    /// DualShock 3 / Sixaxis over USB
    SixAxisPad,
    /// Nothing attached
    #[default]
    None,
}

impl DeviceKind {
    /// Families this layer knows how to drive
    pub const SUPPORTED: [DeviceKind; 5] = [
        DeviceKind::FixedPad,
        DeviceKind::MotionRemote,
        DeviceKind::MotionRemoteWithExtension,
        DeviceKind::ClassicExtension,
        DeviceKind::SixAxisPad,
    ];

    /// Name shown to the user once default bindings are generated
    pub fn display_name(self) -> &'static str {
        match self {
            DeviceKind::FixedPad => "Gamecube Controller",
            DeviceKind::MotionRemote => "Wiimote",
            DeviceKind::MotionRemoteWithExtension => "Wiimote + Nunchuk",
            DeviceKind::ClassicExtension => "Classic Controller",
            DeviceKind::SixAxisPad => "DualShock3/Sixaxis",
            DeviceKind::None => "None",
        }
    }

    /// Whether the family reports polar (magnitude/angle) sticks
    pub fn is_polar(self) -> bool {
        matches!(
            self,
            DeviceKind::MotionRemoteWithExtension | DeviceKind::ClassicExtension
        )
    }

    pub fn is_connected(self) -> bool {
        self != DeviceKind::None
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for DeviceKind {
    type Err = String;

    /// Accepts the config spelling (`fixed_pad`) as well as short aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fixed_pad" | "gamecube" | "gc" => Ok(DeviceKind::FixedPad),
            "motion_remote" | "wiimote" => Ok(DeviceKind::MotionRemote),
            "motion_remote_with_extension" | "nunchuk" => {
                Ok(DeviceKind::MotionRemoteWithExtension)
            }
            "classic_extension" | "classic" => Ok(DeviceKind::ClassicExtension),
            "six_axis_pad" | "sixaxis" | "ds3" => Ok(DeviceKind::SixAxisPad),
            "none" => Ok(DeviceKind::None),
            other => Err(format!("unknown device kind: {}", other)),
        }
    }
}
