//! Hotplug classification
//!
//! Tracks the device family last seen on each port. When a port reports a
//! family other than the one last connected there, the stored kind is
//! updated and (when autodetection is on) that family's default bindings
//! are generated. Unplugging never touches bindings, and plugging the same
//! family back in keeps whatever was configured before.

use tracing::{debug, info};

use super::binding::BindingStore;
use super::kind::DeviceKind;
use super::port::{Port, MAX_PORTS};

/// Result of classifying one port for one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub previous: DeviceKind,
    pub kind: DeviceKind,
    /// The stored kind changed this cycle
    pub changed: bool,
    /// Default bindings were regenerated this cycle
    pub regenerated: bool,
}

/// Per-port family tracker
#[derive(Debug, Clone)]
pub struct Classifier {
    kinds: [DeviceKind; MAX_PORTS],
    /// Last family seen connected; survives unplugging
    last_connected: [DeviceKind; MAX_PORTS],
    autodetect: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Classifier {
    pub fn new(autodetect: bool) -> Self {
        Self {
            kinds: [DeviceKind::None; MAX_PORTS],
            last_connected: [DeviceKind::None; MAX_PORTS],
            autodetect,
        }
    }

    pub fn kind(&self, port: Port) -> DeviceKind {
        self.kinds[port.index()]
    }

    /// Family most recently connected on `port`, even if now unplugged
    pub fn last_connected(&self, port: Port) -> DeviceKind {
        self.last_connected[port.index()]
    }

    pub fn autodetect(&self) -> bool {
        self.autodetect
    }

    pub fn set_autodetect(&mut self, enabled: bool) {
        if self.autodetect != enabled {
            info!("Device autodetection {}", if enabled { "enabled" } else { "disabled" });
        }
        self.autodetect = enabled;
    }

    /// Record what `port` reports this cycle
    ///
    /// Idempotent: reporting the stored kind again changes nothing.
    pub fn classify(
        &mut self,
        port: Port,
        reported: DeviceKind,
        bindings: &mut BindingStore,
    ) -> Classification {
        let previous = self.kinds[port.index()];
        if previous == reported {
            return Classification {
                previous,
                kind: reported,
                changed: false,
                regenerated: false,
            };
        }

        self.kinds[port.index()] = reported;

        let regenerated = if !reported.is_connected() {
            info!("🔌 {} disconnected ({})", port, previous);
            false
        } else if reported == self.last_connected[port.index()] {
            info!("🔌 {} reconnected {}, keeping bindings", port, reported);
            false
        } else if !self.autodetect {
            self.last_connected[port.index()] = reported;
            debug!(
                "{} now reports {}, autodetection off, bindings unchanged",
                port, reported
            );
            false
        } else {
            self.last_connected[port.index()] = reported;
            info!("🔌 {} detected {} (was {})", port, reported, previous);
            bindings.apply_defaults(port, reported)
        };

        Classification {
            previous,
            kind: reported,
            changed: true,
            regenerated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::binding::ControlFunction;
    use crate::input::buttons::LogicalButton;

    fn port(n: u8) -> Port {
        Port::new(n).unwrap()
    }

    #[test]
    fn test_change_regenerates_once() {
        let mut classifier = Classifier::new(true);
        let mut bindings = BindingStore::new();

        let first = classifier.classify(port(0), DeviceKind::MotionRemote, &mut bindings);
        assert!(first.changed && first.regenerated);

        let again = classifier.classify(port(0), DeviceKind::MotionRemote, &mut bindings);
        assert!(!again.changed && !again.regenerated);
        assert_eq!(bindings.port(port(0)).generation(), 1);

        let swap = classifier.classify(port(0), DeviceKind::ClassicExtension, &mut bindings);
        assert_eq!(swap.previous, DeviceKind::MotionRemote);
        assert!(swap.regenerated);
        assert_eq!(bindings.port(port(0)).generation(), 2);
        assert_eq!(bindings.port(port(0)).device_name(), "Classic Controller");
    }

    #[test]
    fn test_unplug_keeps_bindings() {
        let mut classifier = Classifier::new(true);
        let mut bindings = BindingStore::new();
        classifier.classify(port(1), DeviceKind::FixedPad, &mut bindings);

        let gone = classifier.classify(port(1), DeviceKind::None, &mut bindings);
        assert!(gone.changed);
        assert!(!gone.regenerated);
        assert_eq!(classifier.kind(port(1)), DeviceKind::None);
        assert_eq!(
            bindings.binding(port(1), ControlFunction::A),
            LogicalButton::GcA.into()
        );

        assert_eq!(classifier.last_connected(port(1)), DeviceKind::FixedPad);
    }

    #[test]
    fn test_replug_same_family_keeps_manual_bindings() {
        let mut classifier = Classifier::new(true);
        let mut bindings = BindingStore::new();
        classifier.classify(port(0), DeviceKind::FixedPad, &mut bindings);
        bindings.set_binding(port(0), ControlFunction::A, LogicalButton::GcB.into());

        classifier.classify(port(0), DeviceKind::None, &mut bindings);
        let back = classifier.classify(port(0), DeviceKind::FixedPad, &mut bindings);

        assert!(back.changed);
        assert!(!back.regenerated);
        assert_eq!(classifier.kind(port(0)), DeviceKind::FixedPad);
        assert_eq!(bindings.port(port(0)).generation(), 1);
        assert_eq!(
            bindings.binding(port(0), ControlFunction::A),
            LogicalButton::GcB.into()
        );

        // A different family after the gap still regenerates
        classifier.classify(port(0), DeviceKind::None, &mut bindings);
        let other = classifier.classify(port(0), DeviceKind::SixAxisPad, &mut bindings);
        assert!(other.regenerated);
        assert_eq!(bindings.port(port(0)).generation(), 2);
    }

    #[test]
    fn test_autodetect_off_updates_kind_only() {
        let mut classifier = Classifier::new(false);
        let mut bindings = BindingStore::new();

        let c = classifier.classify(port(2), DeviceKind::SixAxisPad, &mut bindings);
        assert!(c.changed);
        assert!(!c.regenerated);
        assert_eq!(classifier.kind(port(2)), DeviceKind::SixAxisPad);
        assert_eq!(bindings.port(port(2)).generation(), 0);
        assert_eq!(bindings.port(port(2)).device_name(), "None");
    }

    #[test]
    fn test_pinned_port_not_regenerated() {
        let mut classifier = Classifier::new(true);
        let mut bindings = BindingStore::new();
        bindings.pin(port(3), None, Some("Custom".into()), []);

        let c = classifier.classify(port(3), DeviceKind::FixedPad, &mut bindings);
        assert!(c.changed);
        assert!(!c.regenerated);
        assert_eq!(bindings.port(port(3)).device_name(), "Custom");
    }
}
