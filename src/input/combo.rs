//! Menu combo detection
//!
//! The GameCube pad has no spare button, so it opens the menu with a
//! Start + Z + L + R chord. Every other family has a dedicated home-style
//! button.

use super::buttons::{LogicalButton, UnifiedMask};
use super::kind::DeviceKind;
use super::port::Port;
use tracing::trace;

/// Chord that opens the menu from a GameCube pad
pub const GAMECUBE_MENU_CHORD: UnifiedMask = UnifiedMask(
    LogicalButton::GcStart.mask()
        | LogicalButton::GcZ.mask()
        | LogicalButton::GcL.mask()
        | LogicalButton::GcR.mask(),
);

/// Buttons that open the menu on their own for a family
pub fn home_buttons(kind: DeviceKind) -> &'static [LogicalButton] {
    match kind {
        DeviceKind::FixedPad | DeviceKind::None => &[],
        DeviceKind::MotionRemote | DeviceKind::MotionRemoteWithExtension => {
            &[LogicalButton::WiimoteHome]
        }
        // The remote's own Home stays usable with a Classic attached
        DeviceKind::ClassicExtension => &[LogicalButton::ClassicHome, LogicalButton::WiimoteHome],
        DeviceKind::SixAxisPad => &[LogicalButton::SixAxisPs],
    }
}

/// Whether `mask` requests the menu for a port of the given family
pub fn detect(port: Port, mask: UnifiedMask, kind: DeviceKind) -> bool {
    let hit = match kind {
        DeviceKind::FixedPad => mask.contains_all(GAMECUBE_MENU_CHORD),
        _ => home_buttons(kind).iter().any(|b| mask.contains(*b)),
    };
    if hit {
        trace!("Menu requested from {} ({})", port, kind);
    }
    hit
}
