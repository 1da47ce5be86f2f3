//! Reset and power-down requests
//!
//! Console buttons and the OS raise these asynchronously (from interrupt
//! style callbacks or other threads). They are plain atomic flags; the
//! driver consumes them once per poll.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle to one request flag
#[derive(Debug, Clone, Default)]
pub struct SignalHandle(Arc<AtomicBool>);

impl SignalHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the request; safe from any thread
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Consume the request, returning whether it was raised
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Both lifecycle flags of the input layer
#[derive(Debug, Clone, Default)]
pub struct LifecycleSignals {
    pub reset: SignalHandle,
    pub power_down: SignalHandle,
}

impl LifecycleSignals {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_take_consumes() {
        let signal = SignalHandle::new();
        assert!(!signal.take());
        signal.raise();
        assert!(signal.is_raised());
        assert!(signal.take());
        assert!(!signal.take());
    }

    #[test]
    fn test_raise_from_other_thread() {
        let signals = LifecycleSignals::new();
        let power = signals.power_down.clone();
        thread::spawn(move || power.raise()).join().unwrap();

        assert!(signals.power_down.take());
        assert!(!signals.reset.take());
    }
}
