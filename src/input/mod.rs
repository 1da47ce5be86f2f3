//! Input core - per-port controller normalization
//!
//! Each poll cycle runs, for every port:
//! - raw sample from the [`RawSampleSource`] (probe order: GameCube pad,
//!   six-axis pad, Wii Remote)
//! - analog normalization to signed 16-bit pairs
//! - family-specific bit mapping into a [`UnifiedMask`]
//! - hotplug classification and default binding regeneration
//! - menu combo detection
//!
//! The frontend then reads the results through [`InputDriver`] queries.

pub mod binding;
pub mod buttons;
pub mod classifier;
pub mod combo;
pub mod driver;
pub mod kind;
pub mod lifecycle;
pub mod mapper;
pub mod normalize;
pub mod port;
pub mod source;
pub mod store;

pub use binding::{
    describe, AxisCode, AxisDirection, BindingEntry, BindingSet, BindingStore, ControlFunction,
    PhysicalCode,
};
pub use binding::generate as generate_defaults;
pub use buttons::{LogicalButton, UnifiedMask};
pub use classifier::{Classification, Classifier};
pub use driver::{DeviceClass, InputDriver, PollOutcome};
pub use kind::DeviceKind;
pub use lifecycle::{LifecycleSignals, SignalHandle};
pub use normalize::{AnalogPair, Axis, Stick};
pub use port::{Port, MAX_PORTS};
pub use source::{PolarStick, RawAnalog, RawSample, RawSampleSource, ScriptedSource};
pub use store::{InputSnapshot, PortState, SnapshotStore};
