//! GX Input - per-port controller normalization
//!
//! Turns raw GameCube pad, Wii Remote (bare, with Nunchuk, with Classic
//! Controller) and DualShock 3 samples into one uniform per-port state: a
//! 64-bit logical button mask, two signed 16-bit stick pairs, and a menu
//! toggle signal for the emulation frontend.

pub mod config;
pub mod error;
pub mod input;

pub use config::InputConfig;
pub use error::InputError;
pub use input::{
    AnalogPair, AxisCode, AxisDirection, BindingEntry, ControlFunction, DeviceKind, InputDriver,
    InputSnapshot, LogicalButton, PhysicalCode, PollOutcome, Port, PortState, RawAnalog,
    RawSample, RawSampleSource, UnifiedMask, MAX_PORTS,
};
