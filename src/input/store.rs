//! Port state store
//!
//! Holds the latest normalized state of every port plus the menu signal,
//! and publishes a copy after each poll for readers on other threads.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use super::buttons::UnifiedMask;
use super::kind::DeviceKind;
use super::normalize::{AnalogPair, Stick};
use super::port::{Port, MAX_PORTS};

/// Normalized state of one port for the current poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PortState {
    pub mask: UnifiedMask,
    /// (left, right) stick
    pub analog: [AnalogPair; 2],
    pub kind: DeviceKind,
}

impl PortState {
    pub fn stick(&self, stick: Stick) -> AnalogPair {
        self.analog[stick.index()]
    }

    pub fn is_connected(&self) -> bool {
        self.kind.is_connected()
    }
}

/// Everything the frontend reads after one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InputSnapshot {
    pub ports: [PortState; MAX_PORTS],
    /// Set when any port requested the menu this poll
    pub menu_toggle: bool,
}

impl InputSnapshot {
    pub fn port(&self, port: Port) -> &PortState {
        &self.ports[port.index()]
    }
}

type SubscriberFn = Arc<dyn Fn(&InputSnapshot) + Send + Sync>;

/// Shared, cloneable view of the last published snapshot
#[derive(Clone, Default)]
pub struct SnapshotStore {
    current: Arc<RwLock<InputSnapshot>>,
    subscribers: Arc<RwLock<Vec<SubscriberFn>>>,
}

impl std::fmt::Debug for SnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("current", &*self.current.read())
            .field("subscribers", &self.subscribers.read().len())
            .finish()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published snapshot and notify subscribers
    pub fn publish(&self, snapshot: InputSnapshot) {
        *self.current.write() = snapshot;

        let subscribers = self.subscribers.read();
        for subscriber in subscribers.iter() {
            subscriber(&snapshot);
        }
    }

    /// Copy of the latest snapshot
    pub fn latest(&self) -> InputSnapshot {
        *self.current.read()
    }

    /// Called with every published snapshot, on the polling thread
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&InputSnapshot) + Send + Sync + 'static,
    {
        self.subscribers.write().push(Arc::new(callback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::buttons::LogicalButton;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_default_snapshot_is_idle() {
        let snapshot = InputSnapshot::default();
        assert!(!snapshot.menu_toggle);
        for state in snapshot.ports {
            assert!(state.mask.is_empty());
            assert_eq!(state.analog, [AnalogPair::CENTER; 2]);
            assert!(!state.is_connected());
        }
    }

    #[test]
    fn test_publish_visible_to_clones() {
        let store = SnapshotStore::new();
        let reader = store.clone();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut snapshot = InputSnapshot::default();
        snapshot.ports[2].mask.insert(LogicalButton::SixAxisPs);
        snapshot.ports[2].kind = DeviceKind::SixAxisPad;
        snapshot.menu_toggle = true;
        store.publish(snapshot);

        let latest = reader.latest();
        assert!(latest.menu_toggle);
        assert!(latest
            .port(Port::new(2).unwrap())
            .mask
            .contains(LogicalButton::SixAxisPs));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
