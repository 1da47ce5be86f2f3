//! Default binding generation and per-port binding tables
//!
//! Every frontend control function is assigned either a logical button, a
//! half-axis, or nothing. Defaults come from a fixed table per device
//! family and are regenerated wholesale whenever a port's family changes.
//! Families with fewer buttons than functions leave the rest unbound.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::buttons::LogicalButton as B;
use super::kind::DeviceKind;
use super::normalize::{Axis, Stick};
use super::port::{Port, MAX_PORTS};

/// Label for an explicitly unbound function
pub const NO_BUTTON_LABEL: &str = "No button";

/// Label for a code that matches no table entry
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Raw sentinel for "no button" in numeric binding codes
pub const NO_BUTTON: u16 = u16::MAX;

/// Frontend-level control functions, in frontend id order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlFunction {
    B,
    Y,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
    A,
    X,
    L,
    R,
    L2,
    R2,
    L3,
    R3,
    LeftXPlus,
    LeftXMinus,
    LeftYPlus,
    LeftYMinus,
    RightXPlus,
    RightXMinus,
    RightYPlus,
    RightYMinus,
}

impl ControlFunction {
    pub const COUNT: usize = 24;

    pub const ALL: [ControlFunction; Self::COUNT] = [
        Self::B, Self::Y, Self::Select, Self::Start,
        Self::Up, Self::Down, Self::Left, Self::Right,
        Self::A, Self::X, Self::L, Self::R,
        Self::L2, Self::R2, Self::L3, Self::R3,
        Self::LeftXPlus, Self::LeftXMinus, Self::LeftYPlus, Self::LeftYMinus,
        Self::RightXPlus, Self::RightXMinus, Self::RightYPlus, Self::RightYMinus,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Analog pseudo-functions (one stick direction each)
    pub fn is_analog(self) -> bool {
        self.index() >= Self::LeftXPlus.index()
    }

    /// The stick and axis an analog function drives, with its sign
    pub fn analog_target(self) -> Option<(Stick, Axis, AxisDirection)> {
        use AxisDirection::{Negative as Neg, Positive as Pos};
        Some(match self {
            Self::LeftXPlus => (Stick::Left, Axis::X, Pos),
            Self::LeftXMinus => (Stick::Left, Axis::X, Neg),
            Self::LeftYPlus => (Stick::Left, Axis::Y, Pos),
            Self::LeftYMinus => (Stick::Left, Axis::Y, Neg),
            Self::RightXPlus => (Stick::Right, Axis::X, Pos),
            Self::RightXMinus => (Stick::Right, Axis::X, Neg),
            Self::RightYPlus => (Stick::Right, Axis::Y, Pos),
            Self::RightYMinus => (Stick::Right, Axis::Y, Neg),
            _ => return None,
        })
    }

    /// Function driving one direction of a stick axis
    pub fn for_analog(stick: Stick, axis: Axis, direction: AxisDirection) -> ControlFunction {
        Self::ALL[Self::LeftXPlus.index()..]
            .iter()
            .copied()
            .find(|f| f.analog_target() == Some((stick, axis, direction)))
            .unwrap_or(Self::LeftXPlus)
    }
}

impl ControlFunction {
    /// Config key spelling
    pub fn name(self) -> &'static str {
        match self {
            Self::B => "b",
            Self::Y => "y",
            Self::Select => "select",
            Self::Start => "start",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::A => "a",
            Self::X => "x",
            Self::L => "l",
            Self::R => "r",
            Self::L2 => "l2",
            Self::R2 => "r2",
            Self::L3 => "l3",
            Self::R3 => "r3",
            Self::LeftXPlus => "left_x_plus",
            Self::LeftXMinus => "left_x_minus",
            Self::LeftYPlus => "left_y_plus",
            Self::LeftYMinus => "left_y_minus",
            Self::RightXPlus => "right_x_plus",
            Self::RightXMinus => "right_x_minus",
            Self::RightYPlus => "right_y_plus",
            Self::RightYMinus => "right_y_minus",
        }
    }
}

impl fmt::Display for ControlFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of a half-axis binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisDirection {
    Positive,
    Negative,
}

/// One half of a normalized axis: 0 = left X, 1 = left Y, 2 = right X, 3 = right Y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisCode {
    pub index: u8,
    pub direction: AxisDirection,
}

impl AxisCode {
    pub const fn positive(index: u8) -> Self {
        Self { index, direction: AxisDirection::Positive }
    }

    pub const fn negative(index: u8) -> Self {
        Self { index, direction: AxisDirection::Negative }
    }

    /// Stick and axis this code reads; `None` for indices past 3
    pub fn target(self) -> Option<(Stick, Axis)> {
        match self.index {
            0 => Some((Stick::Left, Axis::X)),
            1 => Some((Stick::Left, Axis::Y)),
            2 => Some((Stick::Right, Axis::X)),
            3 => Some((Stick::Right, Axis::Y)),
            _ => None,
        }
    }

    /// Keep only the half of `value` this code covers
    pub fn half(self, value: i16) -> i16 {
        match self.direction {
            AxisDirection::Positive => value.max(0),
            AxisDirection::Negative => value.min(0),
        }
    }

    pub fn label(self) -> Option<&'static str> {
        use AxisDirection::{Negative, Positive};
        Some(match (self.index, self.direction) {
            (0, Positive) => "Left Analog X+",
            (0, Negative) => "Left Analog X-",
            (1, Positive) => "Left Analog Y+",
            (1, Negative) => "Left Analog Y-",
            (2, Positive) => "Right Analog X+",
            (2, Negative) => "Right Analog X-",
            (3, Positive) => "Right Analog Y+",
            (3, Negative) => "Right Analog Y-",
            _ => return None,
        })
    }
}

/// What a control function is bound to
///
/// In YAML config this is written as a single-key map (`{ button: 4 }`),
/// so fields holding it use `serde_yaml::with::singleton_map_recursive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalCode {
    /// Logical button bit position
    Button(u16),
    /// Half of an analog axis
    Axis(AxisCode),
    /// Explicitly bound to nothing
    #[default]
    Unbound,
}

impl PhysicalCode {
    /// Interpret a raw numeric button code, honoring the [`NO_BUTTON`] sentinel
    pub fn from_raw(code: u16) -> Self {
        if code == NO_BUTTON {
            PhysicalCode::Unbound
        } else {
            PhysicalCode::Button(code)
        }
    }

    pub fn is_bound(self) -> bool {
        self != PhysicalCode::Unbound
    }
}

impl From<B> for PhysicalCode {
    fn from(button: B) -> Self {
        PhysicalCode::Button(button.bit())
    }
}

/// One function's assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingEntry {
    pub function: ControlFunction,
    pub code: PhysicalCode,
}

/// Complete assignment for every control function of one port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingSet([PhysicalCode; ControlFunction::COUNT]);

impl Default for BindingSet {
    fn default() -> Self {
        Self([PhysicalCode::Unbound; ControlFunction::COUNT])
    }
}

impl BindingSet {
    pub fn get(&self, function: ControlFunction) -> PhysicalCode {
        self.0[function.index()]
    }

    pub fn set(&mut self, function: ControlFunction, code: PhysicalCode) {
        self.0[function.index()] = code;
    }

    pub fn entries(&self) -> impl Iterator<Item = BindingEntry> + '_ {
        ControlFunction::ALL.iter().map(move |&function| BindingEntry {
            function,
            code: self.get(function),
        })
    }

    /// Number of functions with an assignment
    pub fn bound_count(&self) -> usize {
        self.0.iter().filter(|c| c.is_bound()).count()
    }
}

const fn btn(button: B) -> PhysicalCode {
    PhysicalCode::Button(button as u16)
}

const fn pos(index: u8) -> PhysicalCode {
    PhysicalCode::Axis(AxisCode::positive(index))
}

const fn neg(index: u8) -> PhysicalCode {
    PhysicalCode::Axis(AxisCode::negative(index))
}

type DefaultRow = (ControlFunction, PhysicalCode);

use ControlFunction as F;

const LEFT_STICK: &[DefaultRow] = &[
    (F::LeftXPlus, pos(0)),
    (F::LeftXMinus, neg(0)),
    (F::LeftYPlus, pos(1)),
    (F::LeftYMinus, neg(1)),
];

const RIGHT_STICK: &[DefaultRow] = &[
    (F::RightXPlus, pos(2)),
    (F::RightXMinus, neg(2)),
    (F::RightYPlus, pos(3)),
    (F::RightYMinus, neg(3)),
];

const GAMECUBE: &[DefaultRow] = &[
    (F::B, btn(B::GcB)),
    (F::Y, btn(B::GcY)),
    (F::Select, btn(B::GcZ)),
    (F::Start, btn(B::GcStart)),
    (F::Up, btn(B::GcUp)),
    (F::Down, btn(B::GcDown)),
    (F::Left, btn(B::GcLeft)),
    (F::Right, btn(B::GcRight)),
    (F::A, btn(B::GcA)),
    (F::X, btn(B::GcX)),
    (F::L, btn(B::GcL)),
    (F::R, btn(B::GcR)),
];

// Sideways remote: 1/2 are the main face buttons
const WIIMOTE: &[DefaultRow] = &[
    (F::B, btn(B::Wiimote1)),
    (F::Y, btn(B::WiimoteA)),
    (F::Select, btn(B::WiimoteMinus)),
    (F::Start, btn(B::WiimotePlus)),
    (F::Up, btn(B::WiimoteUp)),
    (F::Down, btn(B::WiimoteDown)),
    (F::Left, btn(B::WiimoteLeft)),
    (F::Right, btn(B::WiimoteRight)),
    (F::A, btn(B::Wiimote2)),
    (F::X, btn(B::WiimoteB)),
];

const NUNCHUK: &[DefaultRow] = &[
    (F::B, btn(B::WiimoteB)),
    (F::Y, btn(B::Wiimote2)),
    (F::Select, btn(B::WiimoteMinus)),
    (F::Start, btn(B::WiimotePlus)),
    (F::Up, btn(B::WiimoteUp)),
    (F::Down, btn(B::WiimoteDown)),
    (F::Left, btn(B::WiimoteLeft)),
    (F::Right, btn(B::WiimoteRight)),
    (F::A, btn(B::WiimoteA)),
    (F::X, btn(B::Wiimote1)),
    (F::L, btn(B::NunchukZ)),
    (F::R, btn(B::NunchukC)),
];

const CLASSIC: &[DefaultRow] = &[
    (F::B, btn(B::ClassicB)),
    (F::Y, btn(B::ClassicY)),
    (F::Select, btn(B::ClassicMinus)),
    (F::Start, btn(B::ClassicPlus)),
    (F::Up, btn(B::ClassicUp)),
    (F::Down, btn(B::ClassicDown)),
    (F::Left, btn(B::ClassicLeft)),
    (F::Right, btn(B::ClassicRight)),
    (F::A, btn(B::ClassicA)),
    (F::X, btn(B::ClassicX)),
    (F::L, btn(B::ClassicL)),
    (F::R, btn(B::ClassicR)),
    (F::L2, btn(B::ClassicZl)),
    (F::R2, btn(B::ClassicZr)),
];

const SIXAXIS: &[DefaultRow] = &[
    (F::B, btn(B::SixAxisCross)),
    (F::Y, btn(B::SixAxisSquare)),
    (F::Select, btn(B::SixAxisSelect)),
    (F::Start, btn(B::SixAxisStart)),
    (F::Up, btn(B::SixAxisUp)),
    (F::Down, btn(B::SixAxisDown)),
    (F::Left, btn(B::SixAxisLeft)),
    (F::Right, btn(B::SixAxisRight)),
    (F::A, btn(B::SixAxisCircle)),
    (F::X, btn(B::SixAxisTriangle)),
    (F::L, btn(B::SixAxisL1)),
    (F::R, btn(B::SixAxisR1)),
    (F::L2, btn(B::SixAxisL2)),
    (F::R2, btn(B::SixAxisR2)),
    (F::L3, btn(B::SixAxisL3)),
    (F::R3, btn(B::SixAxisR3)),
];

fn default_rows(kind: DeviceKind) -> &'static [&'static [DefaultRow]] {
    match kind {
        DeviceKind::FixedPad => &[GAMECUBE, LEFT_STICK, RIGHT_STICK],
        DeviceKind::MotionRemote => &[WIIMOTE],
        DeviceKind::MotionRemoteWithExtension => &[NUNCHUK, LEFT_STICK],
        DeviceKind::ClassicExtension => &[CLASSIC, LEFT_STICK, RIGHT_STICK],
        DeviceKind::SixAxisPad => &[SIXAXIS, LEFT_STICK, RIGHT_STICK],
        DeviceKind::None => &[],
    }
}

/// Default assignment of every control function for a family
pub fn generate(kind: DeviceKind) -> BindingSet {
    let mut set = BindingSet::default();
    for rows in default_rows(kind) {
        for &(function, code) in rows.iter() {
            set.set(function, code);
        }
    }
    set
}

/// Label for "what is bound here"
///
/// The explicit unbound sentinel and a code matching nothing produce
/// different labels.
pub fn describe(code: PhysicalCode) -> &'static str {
    match code {
        PhysicalCode::Unbound => NO_BUTTON_LABEL,
        PhysicalCode::Button(bit) => B::from_bit(bit).map(B::label).unwrap_or(UNKNOWN_LABEL),
        PhysicalCode::Axis(axis) => axis.label().unwrap_or(UNKNOWN_LABEL),
    }
}

/// Binding state of one port
#[derive(Debug, Clone)]
pub struct PortBindings {
    device_name: String,
    active: BindingSet,
    defaults: BindingSet,
    pinned: bool,
    generation: u64,
}

impl Default for PortBindings {
    fn default() -> Self {
        Self {
            device_name: DeviceKind::None.display_name().to_string(),
            active: BindingSet::default(),
            defaults: BindingSet::default(),
            pinned: false,
            generation: 0,
        }
    }
}

impl PortBindings {
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn active(&self) -> &BindingSet {
        &self.active
    }

    pub fn defaults(&self) -> &BindingSet {
        &self.defaults
    }

    /// Manually configured; default regeneration is suppressed
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// How many times defaults were regenerated for this port
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Binding tables for every port
#[derive(Debug, Clone, Default)]
pub struct BindingStore {
    ports: [PortBindings; MAX_PORTS],
}

impl BindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn port(&self, port: Port) -> &PortBindings {
        &self.ports[port.index()]
    }

    pub fn binding(&self, port: Port, function: ControlFunction) -> PhysicalCode {
        self.ports[port.index()].active.get(function)
    }

    /// Regenerate the defaults of `port` for `kind` and make them active
    ///
    /// Returns `false` without touching anything when the port is pinned.
    pub fn apply_defaults(&mut self, port: Port, kind: DeviceKind) -> bool {
        let entry = &mut self.ports[port.index()];
        if entry.pinned {
            debug!("{} is pinned, keeping manual bindings for {}", port, kind);
            return false;
        }

        entry.defaults = generate(kind);
        entry.active = entry.defaults;
        entry.device_name = kind.display_name().to_string();
        entry.generation += 1;

        info!(
            "🎮 {} default bindings set for {} ({} functions bound)",
            port,
            kind,
            entry.active.bound_count()
        );
        true
    }

    /// Pin a port to manual bindings
    ///
    /// Starts from the defaults of `base` (if given) and applies `overrides`
    /// on top. Pinned ports never have their bindings regenerated.
    pub fn pin(
        &mut self,
        port: Port,
        base: Option<DeviceKind>,
        device_name: Option<String>,
        overrides: impl IntoIterator<Item = (ControlFunction, PhysicalCode)>,
    ) {
        let entry = &mut self.ports[port.index()];
        let kind = base.unwrap_or(DeviceKind::None);
        entry.defaults = generate(kind);
        entry.active = entry.defaults;
        for (function, code) in overrides {
            entry.active.set(function, code);
        }
        entry.device_name = device_name.unwrap_or_else(|| kind.display_name().to_string());
        entry.pinned = true;
        debug!("{} pinned as \"{}\"", port, entry.device_name);
    }

    /// Assign one function by hand
    pub fn set_binding(&mut self, port: Port, function: ControlFunction, code: PhysicalCode) {
        self.ports[port.index()].active.set(function, code);
    }

    /// Put one function back to its current default
    pub fn reset_to_default(&mut self, port: Port, function: ControlFunction) {
        let entry = &mut self.ports[port.index()];
        let code = entry.defaults.get(function);
        entry.active.set(function, code);
    }
}
