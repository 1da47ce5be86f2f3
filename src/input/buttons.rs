//! Logical button namespace shared by every device family
//!
//! Each physical button of every supported family owns exactly one bit
//! position in [`UnifiedMask`]. Positions are fixed, so masks from
//! different ports can be combined without two families aliasing the same
//! bit with different meanings.
//!
//! ```text
//!  0..=11  GameCube pad
//! 12..=19  DualShock 3 (face/menu/d-pad)
//! 20..=34  Classic Controller
//! 35..=42  DualShock 3 (face/shoulders/sticks)
//! 43..=53  Wii Remote
//! 54..=59  Nunchuk (buttons + stick directions)
//!      61  DualShock 3 PS button
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// One physical button, identified by its bit position in the unified mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum LogicalButton {
    GcA = 0,
    GcB = 1,
    GcX = 2,
    GcY = 3,
    GcStart = 4,
    GcZ = 5,
    GcL = 6,
    GcR = 7,
    GcUp = 8,
    GcDown = 9,
    GcLeft = 10,
    GcRight = 11,

    SixAxisCross = 12,
    SixAxisSquare = 13,
    SixAxisSelect = 14,
    SixAxisStart = 15,
    SixAxisUp = 16,
    SixAxisDown = 17,
    SixAxisLeft = 18,
    SixAxisRight = 19,

    ClassicA = 20,
    ClassicB = 21,
    ClassicX = 22,
    ClassicY = 23,
    ClassicPlus = 24,
    ClassicMinus = 25,
    ClassicHome = 26,
    ClassicL = 27,
    ClassicR = 28,
    ClassicZl = 29,
    ClassicZr = 30,
    ClassicUp = 31,
    ClassicDown = 32,
    ClassicLeft = 33,
    ClassicRight = 34,

    SixAxisCircle = 35,
    SixAxisTriangle = 36,
    SixAxisL1 = 37,
    SixAxisR1 = 38,
    SixAxisL2 = 39,
    SixAxisR2 = 40,
    SixAxisL3 = 41,
    SixAxisR3 = 42,

    WiimoteA = 43,
    WiimoteB = 44,
    Wiimote1 = 45,
    Wiimote2 = 46,
    WiimotePlus = 47,
    WiimoteMinus = 48,
    WiimoteHome = 49,
    WiimoteUp = 50,
    WiimoteDown = 51,
    WiimoteLeft = 52,
    WiimoteRight = 53,

    NunchukZ = 54,
    NunchukC = 55,
    NunchukStickUp = 56,
    NunchukStickDown = 57,
    NunchukStickLeft = 58,
    NunchukStickRight = 59,

    SixAxisPs = 61,
}

impl LogicalButton {
    /// Every logical button, in bit order
    pub const ALL: [LogicalButton; 61] = [
        Self::GcA, Self::GcB, Self::GcX, Self::GcY, Self::GcStart, Self::GcZ,
        Self::GcL, Self::GcR, Self::GcUp, Self::GcDown, Self::GcLeft, Self::GcRight,
        Self::SixAxisCross, Self::SixAxisSquare, Self::SixAxisSelect, Self::SixAxisStart,
        Self::SixAxisUp, Self::SixAxisDown, Self::SixAxisLeft, Self::SixAxisRight,
        Self::ClassicA, Self::ClassicB, Self::ClassicX, Self::ClassicY, Self::ClassicPlus,
        Self::ClassicMinus, Self::ClassicHome, Self::ClassicL, Self::ClassicR,
        Self::ClassicZl, Self::ClassicZr, Self::ClassicUp, Self::ClassicDown,
        Self::ClassicLeft, Self::ClassicRight,
        Self::SixAxisCircle, Self::SixAxisTriangle, Self::SixAxisL1, Self::SixAxisR1,
        Self::SixAxisL2, Self::SixAxisR2, Self::SixAxisL3, Self::SixAxisR3,
        Self::WiimoteA, Self::WiimoteB, Self::Wiimote1, Self::Wiimote2, Self::WiimotePlus,
        Self::WiimoteMinus, Self::WiimoteHome, Self::WiimoteUp, Self::WiimoteDown,
        Self::WiimoteLeft, Self::WiimoteRight,
        Self::NunchukZ, Self::NunchukC, Self::NunchukStickUp, Self::NunchukStickDown,
        Self::NunchukStickLeft, Self::NunchukStickRight,
        Self::SixAxisPs,
    ];

    /// Bit position inside [`UnifiedMask`]
    pub fn bit(self) -> u16 {
        self as u16
    }

    /// Single-bit mask for this button
    pub const fn mask(self) -> u64 {
        1u64 << (self as u8)
    }

    /// Reverse lookup from a bit position; `None` for unused positions
    pub fn from_bit(bit: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.bit() == bit)
    }

    /// Human-readable label used by "what is bound here" displays
    pub fn label(self) -> &'static str {
        match self {
            Self::GcA => "GC A button",
            Self::GcB => "GC B button",
            Self::GcX => "GC X button",
            Self::GcY => "GC Y button",
            Self::GcStart => "GC Start button",
            Self::GcZ => "GC Z Trigger",
            Self::GcL => "GC Left Trigger",
            Self::GcR => "GC Right Trigger",
            Self::GcUp => "GC D-Pad Up",
            Self::GcDown => "GC D-Pad Down",
            Self::GcLeft => "GC D-Pad Left",
            Self::GcRight => "GC D-Pad Right",

            Self::SixAxisCross => "DS3 Cross button",
            Self::SixAxisSquare => "DS3 Square button",
            Self::SixAxisSelect => "DS3 Select button",
            Self::SixAxisStart => "DS3 Start button",
            Self::SixAxisUp => "DS3 D-Pad Up",
            Self::SixAxisDown => "DS3 D-Pad Down",
            Self::SixAxisLeft => "DS3 D-Pad Left",
            Self::SixAxisRight => "DS3 D-Pad Right",
            Self::SixAxisCircle => "DS3 Circle button",
            Self::SixAxisTriangle => "DS3 Triangle button",
            Self::SixAxisL1 => "DS3 L1 button",
            Self::SixAxisR1 => "DS3 R1 button",
            Self::SixAxisL2 => "DS3 L2 button",
            Self::SixAxisR2 => "DS3 R2 button",
            Self::SixAxisL3 => "DS3 L3 button",
            Self::SixAxisR3 => "DS3 R3 button",
            Self::SixAxisPs => "DS3 PS button",

            Self::ClassicA => "Classic A button",
            Self::ClassicB => "Classic B button",
            Self::ClassicX => "Classic X button",
            Self::ClassicY => "Classic Y button",
            Self::ClassicPlus => "Classic Plus button",
            Self::ClassicMinus => "Classic Minus button",
            Self::ClassicHome => "Classic Home button",
            Self::ClassicL => "Classic L Trigger",
            Self::ClassicR => "Classic R Trigger",
            Self::ClassicZl => "Classic ZL Trigger",
            Self::ClassicZr => "Classic ZR Trigger",
            Self::ClassicUp => "Classic D-Pad Up",
            Self::ClassicDown => "Classic D-Pad Down",
            Self::ClassicLeft => "Classic D-Pad Left",
            Self::ClassicRight => "Classic D-Pad Right",

            Self::WiimoteA => "Wiimote A button",
            Self::WiimoteB => "Wiimote B button",
            Self::Wiimote1 => "Wiimote 1 button",
            Self::Wiimote2 => "Wiimote 2 button",
            Self::WiimotePlus => "Wiimote Plus button",
            Self::WiimoteMinus => "Wiimote Minus button",
            Self::WiimoteHome => "Wiimote Home button",
            Self::WiimoteUp => "Wiimote D-Pad Up",
            Self::WiimoteDown => "Wiimote D-Pad Down",
            Self::WiimoteLeft => "Wiimote D-Pad Left",
            Self::WiimoteRight => "Wiimote D-Pad Right",

            Self::NunchukZ => "Nunchuk Z button",
            Self::NunchukC => "Nunchuk C button",
            Self::NunchukStickUp => "Nunchuk Stick Up",
            Self::NunchukStickDown => "Nunchuk Stick Down",
            Self::NunchukStickLeft => "Nunchuk Stick Left",
            Self::NunchukStickRight => "Nunchuk Stick Right",
        }
    }
}

impl fmt::Display for LogicalButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of held logical buttons for one port, recomputed every poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnifiedMask(pub u64);

impl UnifiedMask {
    pub const EMPTY: UnifiedMask = UnifiedMask(0);

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, button: LogicalButton) -> bool {
        self.0 & button.mask() != 0
    }

    /// True when every button of `other` is also held here
    pub fn contains_all(self, other: UnifiedMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Test a raw bit position; positions past 63 are never set
    pub fn contains_bit(self, bit: u16) -> bool {
        bit < 64 && self.0 & (1u64 << bit) != 0
    }

    pub fn insert(&mut self, button: LogicalButton) {
        self.0 |= button.mask();
    }

    /// Set `button` when `held` is true
    pub fn set_if(&mut self, button: LogicalButton, held: bool) {
        if held {
            self.insert(button);
        }
    }

    /// Held buttons in bit order
    pub fn iter(self) -> impl Iterator<Item = LogicalButton> {
        LogicalButton::ALL.into_iter().filter(move |b| self.contains(*b))
    }
}

impl FromIterator<LogicalButton> for UnifiedMask {
    fn from_iter<I: IntoIterator<Item = LogicalButton>>(iter: I) -> Self {
        let mut mask = UnifiedMask::EMPTY;
        for button in iter {
            mask.insert(button);
        }
        mask
    }
}

impl BitOr for UnifiedMask {
    type Output = UnifiedMask;

    fn bitor(self, rhs: UnifiedMask) -> UnifiedMask {
        UnifiedMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for UnifiedMask {
    fn bitor_assign(&mut self, rhs: UnifiedMask) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for UnifiedMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.iter().map(LogicalButton::label).collect();
        if labels.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", labels.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bit_positions_unique() {
        let bits: HashSet<u16> = LogicalButton::ALL.iter().map(|b| b.bit()).collect();
        assert_eq!(bits.len(), LogicalButton::ALL.len());
        assert!(bits.iter().all(|&b| b < 64));
    }

    #[test]
    fn test_labels_unique() {
        let labels: HashSet<&str> = LogicalButton::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels.len(), LogicalButton::ALL.len());
    }

    #[test]
    fn test_from_bit_round_trip() {
        for button in LogicalButton::ALL {
            assert_eq!(LogicalButton::from_bit(button.bit()), Some(button));
        }
        assert_eq!(LogicalButton::from_bit(60), None);
        assert_eq!(LogicalButton::from_bit(999), None);
    }

    #[test]
    fn test_known_positions() {
        assert_eq!(LogicalButton::GcA.bit(), 0);
        assert_eq!(LogicalButton::ClassicHome.bit(), 26);
        assert_eq!(LogicalButton::WiimoteHome.bit(), 49);
        assert_eq!(LogicalButton::NunchukStickRight.bit(), 59);
    }

    #[test]
    fn test_mask_operations() {
        let mut mask = UnifiedMask::EMPTY;
        mask.insert(LogicalButton::GcStart);
        mask.set_if(LogicalButton::GcZ, true);
        mask.set_if(LogicalButton::GcL, false);

        assert!(mask.contains(LogicalButton::GcStart));
        assert!(mask.contains(LogicalButton::GcZ));
        assert!(!mask.contains(LogicalButton::GcL));
        assert!(mask.contains_bit(4));
        assert!(!mask.contains_bit(64));

        let chord: UnifiedMask = [LogicalButton::GcStart, LogicalButton::GcZ].into_iter().collect();
        assert!(mask.contains_all(chord));
        assert_eq!(mask.iter().count(), 2);
        assert_eq!(mask.to_string(), "GC Start button, GC Z Trigger");
    }
}
