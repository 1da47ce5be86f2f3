//! Poll entry point and frontend query surface
//!
//! One [`InputDriver::poll`] call samples every port, normalizes and maps
//! the raw data, tracks hotplug, evaluates the menu combo and publishes a
//! snapshot. Queries only read the state of the most recent poll.

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::binding::{self, AxisCode, AxisDirection, BindingStore, ControlFunction, PhysicalCode};
use super::classifier::Classifier;
use super::combo;
use super::kind::DeviceKind;
use super::lifecycle::{LifecycleSignals, SignalHandle};
use super::mapper;
use super::normalize::{self, clamp_axis, Axis, Stick, AXIS_MAX};
use super::port::Port;
use super::source::{RawSample, RawSampleSource};
use super::store::{InputSnapshot, PortState, SnapshotStore};
use crate::config::InputConfig;
use crate::error::InputError;

/// What the frontend learns from one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PollOutcome {
    /// Some port asked for the menu (or a reset was requested)
    pub menu_toggle: bool,
    pub reset_requested: bool,
    pub power_down_requested: bool,
}

/// Input classes this driver serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Joypad,
    Analog,
}

const CAPABILITIES: &[DeviceClass] = &[DeviceClass::Joypad, DeviceClass::Analog];

/// Per-port input driver over a raw sample source
pub struct InputDriver<S: RawSampleSource> {
    source: S,
    classifier: Classifier,
    bindings: BindingStore,
    state: InputSnapshot,
    published: SnapshotStore,
    signals: LifecycleSignals,
    axis_threshold: i16,
    polls: u64,
}

impl<S: RawSampleSource> InputDriver<S> {
    /// Open the source and apply configured pins
    ///
    /// Nothing is constructed when the source fails to open.
    pub fn new(mut source: S, config: &InputConfig) -> Result<Self, InputError> {
        source.open()?;

        let mut bindings = BindingStore::new();
        for pin in &config.ports {
            let port = Port::try_from(pin.port)?;
            if pin.is_empty() {
                warn!(
                    "{} is pinned without a device or bindings, every function stays unbound",
                    port
                );
            }
            bindings.pin(
                port,
                pin.device,
                pin.device_name.clone(),
                pin.bindings.iter().map(|(f, c)| (*f, *c)),
            );
        }

        info!(
            "Input driver ready (autodetect: {}, axis threshold: {}, {} pinned port(s))",
            config.autodetect,
            config.axis_threshold,
            config.ports.len()
        );

        Ok(Self {
            source,
            classifier: Classifier::new(config.autodetect),
            bindings,
            state: InputSnapshot::default(),
            published: SnapshotStore::new(),
            signals: LifecycleSignals::new(),
            axis_threshold: config.axis_threshold_units(),
            polls: 0,
        })
    }

    /// Sample every port once and recompute all derived state
    pub fn poll(&mut self) -> PollOutcome {
        self.source.scan();

        let reset_requested = self.signals.reset.take();
        let power_down_requested = self.signals.power_down.take();
        let mut menu_toggle = reset_requested;

        for port in Port::all() {
            let state = match self.sample(port) {
                Some(sample) if sample.kind.is_connected() => Self::build_state(&sample),
                _ => PortState::default(),
            };

            let classification = self.classifier.classify(port, state.kind, &mut self.bindings);
            if classification.changed {
                debug!(
                    "{} reclassified {} -> {} (bindings regenerated: {})",
                    port, classification.previous, classification.kind, classification.regenerated
                );
            }

            if combo::detect(port, state.mask, state.kind) {
                menu_toggle = true;
            }

            trace!("{} {} mask={:#018x}", port, state.kind, state.mask.bits());
            self.state.ports[port.index()] = state;
        }

        self.state.menu_toggle = menu_toggle;
        self.published.publish(self.state);
        self.polls += 1;

        if reset_requested {
            info!("Reset requested, opening menu");
        }
        if power_down_requested {
            info!("Power-down requested");
        }

        PollOutcome {
            menu_toggle,
            reset_requested,
            power_down_requested,
        }
    }

    // Probe order: GameCube pad wins the port, then six-axis, then remote
    fn sample(&mut self, port: Port) -> Option<RawSample> {
        if let Some(sample) = self.source.fixed_pad(port) {
            return Some(sample);
        }
        self.source
            .six_axis(port)
            .or_else(|| self.source.remote(port))
    }

    fn build_state(sample: &RawSample) -> PortState {
        let analog = normalize::normalize(&sample.analog);
        PortState {
            mask: mapper::map_sample(sample, &analog),
            analog,
            kind: sample.kind,
        }
    }

    fn state_of(&self, port: u8) -> Option<(Port, &PortState)> {
        let port = Port::new(port)?;
        Some((port, &self.state.ports[port.index()]))
    }

    // Signed magnitude a binding currently reads as, in axis units
    fn code_value(state: &PortState, code: PhysicalCode) -> i16 {
        match code {
            PhysicalCode::Button(bit) => {
                if state.mask.contains_bit(bit) {
                    AXIS_MAX
                } else {
                    0
                }
            }
            PhysicalCode::Axis(axis) => Self::axis_value(state, axis),
            PhysicalCode::Unbound => 0,
        }
    }

    fn axis_value(state: &PortState, code: AxisCode) -> i16 {
        match code.target() {
            Some((stick, axis)) => code.half(state.stick(stick).get(axis)),
            None => 0,
        }
    }

    /// Whether the function bound on `port` is active; false for bad ports
    pub fn is_button_pressed(&self, port: u8, function: ControlFunction) -> bool {
        let Some((port, state)) = self.state_of(port) else {
            return false;
        };
        match self.bindings.binding(port, function) {
            PhysicalCode::Button(bit) => state.mask.contains_bit(bit),
            PhysicalCode::Axis(axis) => {
                (Self::axis_value(state, axis) as i32).abs() > self.axis_threshold as i32
            }
            PhysicalCode::Unbound => false,
        }
    }

    /// Half-axis value: positive codes never report below 0, negative never above
    pub fn get_axis(&self, port: u8, code: AxisCode) -> i16 {
        self.state_of(port)
            .map(|(_, state)| Self::axis_value(state, code))
            .unwrap_or(0)
    }

    /// Stick axis as seen through the port's analog bindings
    pub fn analog(&self, port: u8, stick: Stick, axis: Axis) -> i16 {
        let Some((port, state)) = self.state_of(port) else {
            return 0;
        };
        let read = |direction| {
            let function = ControlFunction::for_analog(stick, axis, direction);
            (Self::code_value(state, self.bindings.binding(port, function)) as i32).abs()
        };
        clamp_axis(read(AxisDirection::Positive) - read(AxisDirection::Negative))
    }

    pub fn describe_binding(&self, code: PhysicalCode) -> &'static str {
        binding::describe(code)
    }

    /// Number of device families this driver handles
    pub fn device_count(&self) -> usize {
        DeviceKind::SUPPORTED.len()
    }

    /// Whether the last poll raised the menu
    pub fn menu_signal(&self) -> bool {
        self.state.menu_toggle
    }

    pub fn connected_ports(&self) -> Vec<Port> {
        Port::all()
            .filter(|p| self.state.ports[p.index()].is_connected())
            .collect()
    }

    pub fn capabilities(&self) -> &'static [DeviceClass] {
        CAPABILITIES
    }

    /// Name of the binding set active on `port`
    pub fn device_name(&self, port: u8) -> Option<&str> {
        Port::new(port).map(|p| self.bindings.port(p).device_name())
    }

    pub fn port_state(&self, port: u8) -> Option<PortState> {
        self.state_of(port).map(|(_, state)| *state)
    }

    /// State from the most recent poll
    pub fn snapshot(&self) -> InputSnapshot {
        self.state
    }

    /// Cloneable reader for other threads
    pub fn snapshot_store(&self) -> SnapshotStore {
        self.published.clone()
    }

    pub fn reset_handle(&self) -> SignalHandle {
        self.signals.reset.clone()
    }

    pub fn power_down_handle(&self) -> SignalHandle {
        self.signals.power_down.clone()
    }

    pub fn bindings(&self) -> &BindingStore {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut BindingStore {
        &mut self.bindings
    }

    pub fn set_autodetect(&mut self, enabled: bool) {
        self.classifier.set_autodetect(enabled);
    }

    pub fn kind(&self, port: Port) -> DeviceKind {
        self.classifier.kind(port)
    }

    /// Completed poll cycles
    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: RawSampleSource> Drop for InputDriver<S> {
    fn drop(&mut self) {
        self.source.close();
        debug!("Input driver closed after {} polls", self.polls);
    }
}

#[cfg(test)]
mod tests;
