//! Analog normalization for every stick encoding.
//!
//! Both input shapes end up as two [`AnalogPair`]s (left stick, right stick)
//! of signed 16-bit values sharing one convention: positive x is right,
//! negative y is up.
//!
//! # Shapes
//!
//! - **Cartesian** (GameCube pad, DualShock 3): signed 8-bit deflections
//!   scaled by 256. The raw vertical axis reports up as positive, so it is
//!   negated.
//! - **Polar** (Nunchuk, Classic Controller): magnitude clamped to
//!   `[-1.0, 1.0]`, then `x = m·sin(θ)`, `y = -m·cos(θ)`, scaled by 32767.
//!   Angle 0° is full up, matching the cartesian convention.
//!
//! Every result goes through [`clamp_axis`], which never yields -32768 so
//! that negating a stored value is always representable.

use serde::{Deserialize, Serialize};

use super::source::{PolarStick, RawAnalog};

/// Largest stored axis magnitude
pub const AXIS_MAX: i16 = 0x7fff;

/// Scale applied to signed 8-bit cartesian deflections
pub const CARTESIAN_SCALE: i32 = 256;

/// Nunchuk stick deflection past which a stick direction counts as held
pub const WII_JOYSTICK_THRESHOLD: i16 = 40 * 256;

/// GameCube analog trigger travel past which L/R count as held
pub const TRIGGER_PRESS_THRESHOLD: u8 = 127;

/// Stick identifier
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stick {
    Left,
    Right,
}

impl Stick {
    pub fn index(self) -> usize {
        match self {
            Stick::Left => 0,
            Stick::Right => 1,
        }
    }
}

/// Axis within a stick
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Normalized stick position, each component in `[-32767, 32767]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AnalogPair {
    pub x: i16,
    pub y: i16,
}

impl AnalogPair {
    pub const CENTER: AnalogPair = AnalogPair { x: 0, y: 0 };

    /// Build a pair, remapping -32768 on either component
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    pub fn get(self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Saturate to 16 bits and move the most-negative value to -32767.
///
/// Only the negative end is adjusted; the positive end saturates at 32767
/// as any i16 would.
pub fn clamp_axis(value: i32) -> i16 {
    let v = value.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    if v == i16::MIN {
        -AXIS_MAX
    } else {
        v
    }
}

/// Convert one signed 8-bit cartesian stick
///
/// The vertical component is negated so raw up becomes negative (up).
pub fn cartesian_pair(raw: [i8; 2]) -> AnalogPair {
    let [x, y] = raw;
    AnalogPair::new(x as i32 * CARTESIAN_SCALE, -(y as i32) * CARTESIAN_SCALE)
}

/// Convert one polar stick reading
///
/// # Example
/// ```
/// use gx_input::input::normalize::polar_pair;
/// use gx_input::input::source::PolarStick;
///
/// // Straight up at full deflection
/// let pair = polar_pair(PolarStick::new(1.0, 0.0));
/// assert_eq!((pair.x, pair.y), (0, -32767));
/// ```
pub fn polar_pair(stick: PolarStick) -> AnalogPair {
    let magnitude = stick.magnitude.clamp(-1.0, 1.0) as f64;
    let radians = (stick.angle as f64).to_radians();

    let x = magnitude * radians.sin();
    let y = -magnitude * radians.cos();

    // `as` truncates toward zero and maps NaN to 0
    AnalogPair::new(
        (x * AXIS_MAX as f64) as i32,
        (y * AXIS_MAX as f64) as i32,
    )
}

/// Normalize a sample's analog block into (left, right) pairs
///
/// Missing sticks stay centered.
pub fn normalize(analog: &RawAnalog) -> [AnalogPair; 2] {
    match *analog {
        RawAnalog::None => [AnalogPair::CENTER; 2],
        RawAnalog::Cartesian { left, right, .. } => [cartesian_pair(left), cartesian_pair(right)],
        RawAnalog::Polar { left, right } => [
            polar_pair(left),
            right.map(polar_pair).unwrap_or(AnalogPair::CENTER),
        ],
    }
}

/// Digital directions (up, down, left, right) implied by a stick position
pub fn stick_directions(pair: AnalogPair, threshold: i16) -> [bool; 4] {
    [
        pair.y < -threshold,
        pair.y > threshold,
        pair.x < -threshold,
        pair.x > threshold,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_axis_negative_end_only() {
        assert_eq!(clamp_axis(-32768), -32767);
        assert_eq!(clamp_axis(-40000), -32767);
        assert_eq!(clamp_axis(32767), 32767);
        assert_eq!(clamp_axis(32768), 32767);
        assert_eq!(clamp_axis(-32767), -32767);
        assert_eq!(clamp_axis(0), 0);
    }

    #[test]
    fn test_cartesian_scaling_and_inversion() {
        let pair = cartesian_pair([127, 127]);
        assert_eq!(pair.x, 127 * 256);
        assert_eq!(pair.y, -127 * 256); // raw up -> negative

        let pair = cartesian_pair([-128, -128]);
        assert_eq!(pair.x, -32767); // -32768 remapped
        assert_eq!(pair.y, 32767); // 32768 saturates

        assert_eq!(cartesian_pair([0, 0]), AnalogPair::CENTER);
    }

    #[test]
    fn test_polar_cardinal_directions() {
        let up = polar_pair(PolarStick::new(1.0, 0.0));
        assert_eq!((up.x, up.y), (0, -32767));

        let down = polar_pair(PolarStick::new(1.0, 180.0));
        assert_eq!(down.y, 32767);
        assert_eq!(down.x, 0);

        let right = polar_pair(PolarStick::new(1.0, 90.0));
        assert_eq!(right.x, 32767);
        assert_eq!(right.y, 0);

        let left = polar_pair(PolarStick::new(1.0, 270.0));
        assert_eq!(left.x, -32767);
    }

    #[test]
    fn test_polar_magnitude_clamped() {
        let over = polar_pair(PolarStick::new(1.7, 0.0));
        assert_eq!(over, polar_pair(PolarStick::new(1.0, 0.0)));

        let under = polar_pair(PolarStick::new(-3.0, 0.0));
        assert_eq!(under.y, 32767);
    }

    #[test]
    fn test_polar_nan_is_centered() {
        assert_eq!(polar_pair(PolarStick::new(f32::NAN, 0.0)), AnalogPair::CENTER);
    }

    #[test]
    fn test_normalize_shapes() {
        assert_eq!(normalize(&RawAnalog::None), [AnalogPair::CENTER; 2]);

        let nunchuk = RawAnalog::Polar {
            left: PolarStick::new(1.0, 90.0),
            right: None,
        };
        let [left, right] = normalize(&nunchuk);
        assert_eq!(left.x, 32767);
        assert_eq!(right, AnalogPair::CENTER);

        let pad = RawAnalog::Cartesian {
            left: [10, 0],
            right: [0, -10],
            triggers: [0, 0],
        };
        let [left, right] = normalize(&pad);
        assert_eq!(left.x, 2560);
        assert_eq!(right.y, 2560);
    }

    #[test]
    fn test_stick_directions() {
        let t = WII_JOYSTICK_THRESHOLD;
        assert_eq!(stick_directions(AnalogPair::CENTER, t), [false; 4]);
        assert_eq!(
            stick_directions(AnalogPair { x: 0, y: -32767 }, t),
            [true, false, false, false]
        );
        assert_eq!(
            stick_directions(AnalogPair { x: 20000, y: 20000 }, t),
            [false, true, false, true]
        );
        // exactly at threshold is not held
        assert_eq!(stick_directions(AnalogPair { x: t, y: 0 }, t), [false; 4]);
    }

    proptest! {
        #[test]
        fn prop_polar_never_most_negative(mag in -10.0f32..10.0, angle in -720.0f32..720.0) {
            let pair = polar_pair(PolarStick::new(mag, angle));
            prop_assert!(pair.x > i16::MIN && pair.y > i16::MIN);
        }

        #[test]
        fn prop_polar_clamps_magnitude(mag in 1.0f32..100.0, angle in 0.0f32..360.0) {
            prop_assert_eq!(
                polar_pair(PolarStick::new(mag, angle)),
                polar_pair(PolarStick::new(1.0, angle))
            );
        }

        #[test]
        fn prop_cartesian_in_range(x in any::<i8>(), y in any::<i8>()) {
            let pair = cartesian_pair([x, y]);
            prop_assert!(pair.x >= -AXIS_MAX && pair.y >= -AXIS_MAX);
            prop_assert_eq!(pair.x, clamp_axis(x as i32 * 256));
        }
    }
}
