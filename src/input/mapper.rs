//! Raw bitfield to unified mask mapping, one table per device family
//!
//! The console libraries don't name their flags in a way we can import,
//! so the held-button layouts are spelled out here. Unrecognized raw bits
//! are dropped silently.

use super::buttons::{LogicalButton as B, UnifiedMask};
use super::kind::DeviceKind;
use super::normalize::{stick_directions, AnalogPair, TRIGGER_PRESS_THRESHOLD, WII_JOYSTICK_THRESHOLD};
use super::source::{RawAnalog, RawSample};

/// GameCube pad held-button flags
pub mod gc_flags {
    pub const LEFT: u32 = 0x0001;
    pub const RIGHT: u32 = 0x0002;
    pub const DOWN: u32 = 0x0004;
    pub const UP: u32 = 0x0008;
    pub const TRIGGER_Z: u32 = 0x0010;
    pub const TRIGGER_R: u32 = 0x0020;
    pub const TRIGGER_L: u32 = 0x0040;
    pub const A: u32 = 0x0100;
    pub const B: u32 = 0x0200;
    pub const X: u32 = 0x0400;
    pub const Y: u32 = 0x0800;
    pub const START: u32 = 0x1000;
}

/// Wii Remote core buttons (low half of the held word)
pub mod wiimote_flags {
    pub const TWO: u32 = 0x0001;
    pub const ONE: u32 = 0x0002;
    pub const B: u32 = 0x0004;
    pub const A: u32 = 0x0008;
    pub const MINUS: u32 = 0x0010;
    pub const HOME: u32 = 0x0080;
    pub const LEFT: u32 = 0x0100;
    pub const RIGHT: u32 = 0x0200;
    pub const DOWN: u32 = 0x0400;
    pub const UP: u32 = 0x0800;
    pub const PLUS: u32 = 0x1000;
}

/// Nunchuk buttons (high half of the held word)
pub mod nunchuk_flags {
    pub const Z: u32 = 0x0001 << 16;
    pub const C: u32 = 0x0002 << 16;
}

/// Classic Controller buttons (high half of the held word)
pub mod classic_flags {
    pub const UP: u32 = 0x0001 << 16;
    pub const LEFT: u32 = 0x0002 << 16;
    pub const ZR: u32 = 0x0004 << 16;
    pub const X: u32 = 0x0008 << 16;
    pub const A: u32 = 0x0010 << 16;
    pub const Y: u32 = 0x0020 << 16;
    pub const B: u32 = 0x0040 << 16;
    pub const ZL: u32 = 0x0080 << 16;
    pub const FULL_R: u32 = 0x0200 << 16;
    pub const PLUS: u32 = 0x0400 << 16;
    pub const HOME: u32 = 0x0800 << 16;
    pub const MINUS: u32 = 0x1000 << 16;
    pub const FULL_L: u32 = 0x2000 << 16;
    pub const DOWN: u32 = 0x4000 << 16;
    pub const RIGHT: u32 = 0x8000 << 16;
}

/// DualShock 3 buttons in HID report order
pub mod sixaxis_flags {
    pub const SELECT: u32 = 0x0001;
    pub const L3: u32 = 0x0002;
    pub const R3: u32 = 0x0004;
    pub const START: u32 = 0x0008;
    pub const UP: u32 = 0x0010;
    pub const RIGHT: u32 = 0x0020;
    pub const DOWN: u32 = 0x0040;
    pub const LEFT: u32 = 0x0080;
    pub const L2: u32 = 0x0100;
    pub const R2: u32 = 0x0200;
    pub const L1: u32 = 0x0400;
    pub const R1: u32 = 0x0800;
    pub const TRIANGLE: u32 = 0x1000;
    pub const CIRCLE: u32 = 0x2000;
    pub const CROSS: u32 = 0x4000;
    pub const SQUARE: u32 = 0x8000;
    pub const PS: u32 = 0x0001_0000;
}

/// One (raw flag, logical button) pair
pub type FlagMapping = (u32, B);

const GAMECUBE: &[FlagMapping] = &[
    (gc_flags::A, B::GcA),
    (gc_flags::B, B::GcB),
    (gc_flags::X, B::GcX),
    (gc_flags::Y, B::GcY),
    (gc_flags::UP, B::GcUp),
    (gc_flags::DOWN, B::GcDown),
    (gc_flags::LEFT, B::GcLeft),
    (gc_flags::RIGHT, B::GcRight),
    (gc_flags::START, B::GcStart),
    (gc_flags::TRIGGER_Z, B::GcZ),
    (gc_flags::TRIGGER_L, B::GcL),
    (gc_flags::TRIGGER_R, B::GcR),
];

const WIIMOTE_CORE: &[FlagMapping] = &[
    (wiimote_flags::A, B::WiimoteA),
    (wiimote_flags::B, B::WiimoteB),
    (wiimote_flags::ONE, B::Wiimote1),
    (wiimote_flags::TWO, B::Wiimote2),
    (wiimote_flags::PLUS, B::WiimotePlus),
    (wiimote_flags::MINUS, B::WiimoteMinus),
    (wiimote_flags::HOME, B::WiimoteHome),
];

// Remote held sideways: the d-pad is rotated a quarter turn
const WIIMOTE_DPAD_SIDEWAYS: &[FlagMapping] = &[
    (wiimote_flags::UP, B::WiimoteLeft),
    (wiimote_flags::DOWN, B::WiimoteRight),
    (wiimote_flags::LEFT, B::WiimoteDown),
    (wiimote_flags::RIGHT, B::WiimoteUp),
];

const WIIMOTE_DPAD_UPRIGHT: &[FlagMapping] = &[
    (wiimote_flags::UP, B::WiimoteUp),
    (wiimote_flags::DOWN, B::WiimoteDown),
    (wiimote_flags::LEFT, B::WiimoteLeft),
    (wiimote_flags::RIGHT, B::WiimoteRight),
];

const NUNCHUK: &[FlagMapping] = &[
    (nunchuk_flags::Z, B::NunchukZ),
    (nunchuk_flags::C, B::NunchukC),
];

const CLASSIC: &[FlagMapping] = &[
    (classic_flags::A, B::ClassicA),
    (classic_flags::B, B::ClassicB),
    (classic_flags::X, B::ClassicX),
    (classic_flags::Y, B::ClassicY),
    (classic_flags::UP, B::ClassicUp),
    (classic_flags::DOWN, B::ClassicDown),
    (classic_flags::LEFT, B::ClassicLeft),
    (classic_flags::RIGHT, B::ClassicRight),
    (classic_flags::PLUS, B::ClassicPlus),
    (classic_flags::MINUS, B::ClassicMinus),
    (classic_flags::HOME, B::ClassicHome),
    (classic_flags::FULL_L, B::ClassicL),
    (classic_flags::FULL_R, B::ClassicR),
    (classic_flags::ZL, B::ClassicZl),
    (classic_flags::ZR, B::ClassicZr),
];

const SIXAXIS: &[FlagMapping] = &[
    (sixaxis_flags::PS, B::SixAxisPs),
    (sixaxis_flags::CROSS, B::SixAxisCross),
    (sixaxis_flags::SQUARE, B::SixAxisSquare),
    (sixaxis_flags::SELECT, B::SixAxisSelect),
    (sixaxis_flags::START, B::SixAxisStart),
    (sixaxis_flags::UP, B::SixAxisUp),
    (sixaxis_flags::DOWN, B::SixAxisDown),
    (sixaxis_flags::LEFT, B::SixAxisLeft),
    (sixaxis_flags::RIGHT, B::SixAxisRight),
    (sixaxis_flags::CIRCLE, B::SixAxisCircle),
    (sixaxis_flags::TRIANGLE, B::SixAxisTriangle),
    (sixaxis_flags::L1, B::SixAxisL1),
    (sixaxis_flags::R1, B::SixAxisR1),
    (sixaxis_flags::L2, B::SixAxisL2),
    (sixaxis_flags::R2, B::SixAxisR2),
    (sixaxis_flags::L3, B::SixAxisL3),
    (sixaxis_flags::R3, B::SixAxisR3),
];

/// Tables applied for a family, in order
pub fn tables(kind: DeviceKind) -> &'static [&'static [FlagMapping]] {
    match kind {
        DeviceKind::FixedPad => &[GAMECUBE],
        DeviceKind::MotionRemote => &[WIIMOTE_CORE, WIIMOTE_DPAD_SIDEWAYS],
        DeviceKind::MotionRemoteWithExtension => &[WIIMOTE_CORE, WIIMOTE_DPAD_UPRIGHT, NUNCHUK],
        DeviceKind::ClassicExtension => &[WIIMOTE_CORE, WIIMOTE_DPAD_SIDEWAYS, CLASSIC],
        DeviceKind::SixAxisPad => &[SIXAXIS],
        DeviceKind::None => &[],
    }
}

/// Map a family-native held bitfield onto the unified mask
pub fn map(kind: DeviceKind, raw_buttons: u32) -> UnifiedMask {
    let mut mask = UnifiedMask::EMPTY;
    for table in tables(kind) {
        for &(flag, button) in table.iter() {
            mask.set_if(button, raw_buttons & flag != 0);
        }
    }
    mask
}

/// Map a full sample: bitfield plus analog-derived buttons
///
/// GameCube L/R also count as held once the analog trigger passes the
/// halfway point, and the Nunchuk stick drives its four direction bits.
pub fn map_sample(sample: &RawSample, sticks: &[AnalogPair; 2]) -> UnifiedMask {
    let mut mask = map(sample.kind, sample.buttons);

    match (sample.kind, sample.analog) {
        (DeviceKind::FixedPad, RawAnalog::Cartesian { triggers: [l, r], .. }) => {
            mask.set_if(B::GcL, l > TRIGGER_PRESS_THRESHOLD);
            mask.set_if(B::GcR, r > TRIGGER_PRESS_THRESHOLD);
        }
        (DeviceKind::MotionRemoteWithExtension, _) => {
            let [up, down, left, right] = stick_directions(sticks[0], WII_JOYSTICK_THRESHOLD);
            mask.set_if(B::NunchukStickUp, up);
            mask.set_if(B::NunchukStickDown, down);
            mask.set_if(B::NunchukStickLeft, left);
            mask.set_if(B::NunchukStickRight, right);
        }
        _ => {}
    }

    mask
}
