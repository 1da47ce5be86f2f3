//! Scenario tests for the input driver

use super::*;
use crate::config::PortOverride;
use crate::input::buttons::LogicalButton;
use crate::input::mapper::{classic_flags, gc_flags, sixaxis_flags, wiimote_flags};
use crate::input::source::{PolarStick, RawAnalog, ScriptedSource};
use std::collections::BTreeMap;

fn port(n: u8) -> Port {
    Port::new(n).unwrap()
}

fn driver_with(config: InputConfig) -> InputDriver<ScriptedSource> {
    InputDriver::new(ScriptedSource::new(), &config).unwrap()
}

fn driver() -> InputDriver<ScriptedSource> {
    driver_with(InputConfig::default())
}

fn stage(driver: &mut InputDriver<ScriptedSource>, n: u8, sample: Option<RawSample>) {
    driver.source_mut().set(port(n), sample);
}

fn gc(buttons: u32, left: [i8; 2], triggers: [u8; 2]) -> RawSample {
    RawSample::new(
        DeviceKind::FixedPad,
        buttons,
        RawAnalog::Cartesian { left, right: [0, 0], triggers },
    )
}

#[test]
fn test_reclassify_regenerates_for_new_kind_once() {
    let mut d = driver();
    stage(&mut d, 0, Some(gc(0, [0, 0], [0, 0])));
    d.poll();
    assert_eq!(d.bindings().port(port(0)).generation(), 1);
    assert_eq!(d.device_name(0), Some("Gamecube Controller"));

    stage(&mut d, 0, Some(RawSample::buttons(DeviceKind::MotionRemote, 0)));
    d.poll();
    d.poll();
    assert_eq!(d.bindings().port(port(0)).generation(), 2);
    assert_eq!(d.device_name(0), Some("Wiimote"));
    assert_eq!(
        d.bindings().binding(port(0), ControlFunction::A),
        LogicalButton::Wiimote2.into()
    );
    assert_eq!(d.kind(port(0)), DeviceKind::MotionRemote);
}

#[test]
fn test_autodetect_disabled_tracks_kind_only() {
    let mut d = driver_with(InputConfig {
        autodetect: false,
        ..InputConfig::default()
    });
    stage(&mut d, 1, Some(gc(gc_flags::A, [0, 0], [0, 0])));
    d.poll();

    assert_eq!(d.kind(port(1)), DeviceKind::FixedPad);
    assert_eq!(d.bindings().port(port(1)).generation(), 0);
    assert_eq!(d.bindings().binding(port(1), ControlFunction::A), PhysicalCode::Unbound);
    // Mask is still mapped even though nothing is bound
    assert!(d.port_state(1).unwrap().mask.contains(LogicalButton::GcA));
    assert!(!d.is_button_pressed(1, ControlFunction::A));

    d.set_autodetect(true);
    stage(&mut d, 1, Some(RawSample::buttons(DeviceKind::SixAxisPad, 0)));
    d.poll();
    assert_eq!(d.bindings().port(port(1)).generation(), 1);
}

#[test]
fn test_unchanged_sample_is_idempotent() {
    let mut d = driver();
    let sample = RawSample::new(
        DeviceKind::ClassicExtension,
        classic_flags::A | wiimote_flags::ONE,
        RawAnalog::Polar {
            left: PolarStick::new(0.8, 33.0),
            right: Some(PolarStick::new(1.7, 200.0)),
        },
    );
    stage(&mut d, 2, Some(sample));

    d.poll();
    let first = d.port_state(2).unwrap();
    d.poll();
    let second = d.port_state(2).unwrap();

    assert_eq!(first, second);
    assert_eq!(d.bindings().port(port(2)).generation(), 1);
}

#[test]
fn test_unplug_zeroes_port_and_keeps_bindings() {
    let mut d = driver();
    stage(&mut d, 0, Some(gc(gc_flags::START, [100, -100], [0, 0])));
    d.poll();
    assert!(!d.port_state(0).unwrap().mask.is_empty());

    stage(&mut d, 0, None);
    d.poll();
    assert_eq!(d.port_state(0), Some(PortState::default()));
    assert_eq!(d.kind(port(0)), DeviceKind::None);
    assert_eq!(d.device_name(0), Some("Gamecube Controller"));
    assert!(d.connected_ports().is_empty());
}

#[test]
fn test_replug_same_pad_keeps_manual_binding() {
    let mut d = driver();
    stage(&mut d, 0, Some(gc(0, [0, 0], [0, 0])));
    d.poll();
    d.bindings_mut()
        .set_binding(port(0), ControlFunction::A, LogicalButton::GcB.into());

    stage(&mut d, 0, None);
    d.poll();
    stage(&mut d, 0, Some(gc(gc_flags::B, [0, 0], [0, 0])));
    d.poll();

    assert_eq!(d.kind(port(0)), DeviceKind::FixedPad);
    assert_eq!(d.bindings().port(port(0)).generation(), 1);
    assert_eq!(
        d.bindings().binding(port(0), ControlFunction::A),
        LogicalButton::GcB.into()
    );
    assert!(d.is_button_pressed(0, ControlFunction::A));
}

#[test]
fn test_empty_pin_leaves_port_unbound() {
    let config = InputConfig::from_yaml_str("ports: [{ port: 3 }]").unwrap();
    assert!(config.ports[0].is_empty());

    let mut d = driver_with(config);
    stage(&mut d, 3, Some(gc(gc_flags::A, [0, 0], [0, 0])));
    d.poll();

    let pinned = d.bindings().port(port(3));
    assert!(pinned.is_pinned());
    assert_eq!(pinned.active().bound_count(), 0);
    assert!(!d.is_button_pressed(3, ControlFunction::A));
}

#[test]
fn test_menu_is_or_across_ports_and_not_sticky() {
    let mut d = driver();
    stage(&mut d, 0, Some(gc(0, [0, 0], [0, 0])));
    stage(&mut d, 3, Some(RawSample::buttons(DeviceKind::SixAxisPad, sixaxis_flags::PS)));

    assert!(d.poll().menu_toggle);
    assert!(d.menu_signal());
    assert!(d.snapshot().menu_toggle);

    stage(&mut d, 3, Some(RawSample::buttons(DeviceKind::SixAxisPad, 0)));
    assert!(!d.poll().menu_toggle);
    assert!(!d.menu_signal());
}

#[test]
fn test_gamecube_chord_through_poll() {
    let mut d = driver();
    let three = gc_flags::START | gc_flags::TRIGGER_Z | gc_flags::TRIGGER_L;
    stage(&mut d, 0, Some(gc(three, [0, 0], [0, 0])));
    assert!(!d.poll().menu_toggle);

    // Analog trigger past halfway completes the chord
    stage(&mut d, 0, Some(gc(three, [0, 0], [0, 200])));
    assert!(d.poll().menu_toggle);
}

#[test]
fn test_home_buttons_raise_menu() {
    let mut d = driver();
    stage(&mut d, 1, Some(RawSample::buttons(DeviceKind::MotionRemote, wiimote_flags::HOME)));
    assert!(d.poll().menu_toggle);

    stage(&mut d, 1, Some(RawSample::buttons(DeviceKind::ClassicExtension, classic_flags::HOME)));
    assert!(d.poll().menu_toggle);

    // Remote Home still works with a classic attached
    stage(&mut d, 1, Some(RawSample::buttons(DeviceKind::ClassicExtension, wiimote_flags::HOME)));
    assert!(d.poll().menu_toggle);
}

#[test]
fn test_lifecycle_signals_are_edge_triggered() {
    let mut d = driver();
    let reset = d.reset_handle();
    let power = d.power_down_handle();

    reset.raise();
    power.raise();
    let outcome = d.poll();
    assert!(outcome.reset_requested);
    assert!(outcome.power_down_requested);
    assert!(outcome.menu_toggle);

    assert_eq!(d.poll(), PollOutcome::default());
}

#[test]
fn test_axis_binding_uses_threshold() {
    let mut d = driver();
    stage(&mut d, 0, Some(gc(0, [100, 0], [0, 0])));
    d.poll();

    assert!(d.is_button_pressed(0, ControlFunction::LeftXPlus));
    assert!(!d.is_button_pressed(0, ControlFunction::LeftXMinus));

    // 40 * 256 = 10240 is under half scale
    stage(&mut d, 0, Some(gc(0, [40, 0], [0, 0])));
    d.poll();
    assert!(!d.is_button_pressed(0, ControlFunction::LeftXPlus));
}

#[test]
fn test_invalid_port_queries_are_neutral() {
    let mut d = driver();
    d.poll();
    assert!(!d.is_button_pressed(9, ControlFunction::A));
    assert_eq!(d.get_axis(4, AxisCode::positive(0)), 0);
    assert_eq!(d.analog(200, Stick::Left, Axis::X), 0);
    assert_eq!(d.device_name(4), None);
    assert_eq!(d.port_state(4), None);
}

#[test]
fn test_get_axis_half_semantics() {
    let mut d = driver();
    stage(&mut d, 0, Some(gc(0, [-100, 0], [0, 0])));
    d.poll();

    assert_eq!(d.get_axis(0, AxisCode::positive(0)), 0);
    assert_eq!(d.get_axis(0, AxisCode::negative(0)), -25600);
    assert_eq!(d.get_axis(0, AxisCode::negative(7)), 0);
}

#[test]
fn test_analog_follows_bindings() {
    let mut inverted = BTreeMap::new();
    inverted.insert(ControlFunction::LeftXPlus, PhysicalCode::Axis(AxisCode::negative(0)));
    inverted.insert(ControlFunction::LeftXMinus, PhysicalCode::Axis(AxisCode::positive(0)));
    let config = InputConfig {
        ports: vec![PortOverride {
            port: 1,
            device: Some(DeviceKind::FixedPad),
            device_name: None,
            bindings: inverted,
        }],
        ..InputConfig::default()
    };
    let mut d = driver_with(config);
    stage(&mut d, 0, Some(gc(0, [100, 50], [0, 0])));
    stage(&mut d, 1, Some(gc(0, [100, 50], [0, 0])));
    d.poll();

    assert_eq!(d.analog(0, Stick::Left, Axis::X), 25600);
    assert_eq!(d.analog(0, Stick::Left, Axis::Y), -12800);
    assert_eq!(d.analog(1, Stick::Left, Axis::X), -25600);
    assert_eq!(d.bindings().port(port(1)).generation(), 0);
}

#[test]
fn test_bare_remote_has_no_analog() {
    let mut d = driver();
    stage(&mut d, 2, Some(RawSample::buttons(DeviceKind::MotionRemote, 0)));
    d.poll();
    assert_eq!(d.analog(2, Stick::Left, Axis::X), 0);
    assert_eq!(d.analog(2, Stick::Right, Axis::Y), 0);
}

#[test]
fn test_nunchuk_stick_sets_direction_bits() {
    let mut d = driver();
    stage(
        &mut d,
        0,
        Some(RawSample::new(
            DeviceKind::MotionRemoteWithExtension,
            0,
            RawAnalog::Polar {
                left: PolarStick::new(1.0, 90.0),
                right: None,
            },
        )),
    );
    d.poll();

    let state = d.port_state(0).unwrap();
    assert!(state.mask.contains(LogicalButton::NunchukStickRight));
    assert!(!state.mask.contains(LogicalButton::NunchukStickUp));
    assert_eq!(state.analog[1], normalize::AnalogPair::CENTER);
}

#[test]
fn test_queries_and_snapshot_store() {
    let mut d = driver();
    let reader = d.snapshot_store();
    stage(&mut d, 2, Some(RawSample::buttons(DeviceKind::SixAxisPad, sixaxis_flags::CROSS)));
    d.poll();

    assert_eq!(d.device_count(), 5);
    assert_eq!(d.capabilities(), &[DeviceClass::Joypad, DeviceClass::Analog]);
    assert_eq!(d.connected_ports(), vec![port(2)]);
    assert!(d.is_button_pressed(2, ControlFunction::B));
    assert_eq!(d.describe_binding(PhysicalCode::Unbound), "No button");
    assert_eq!(reader.latest(), d.snapshot());
    assert_eq!(d.polls(), 1);
    assert_eq!(d.source_mut().scans(), 1);
}

#[test]
fn test_manual_rebind_and_reset() {
    let mut d = driver();
    stage(&mut d, 0, Some(gc(gc_flags::B, [0, 0], [0, 0])));
    d.poll();
    assert!(!d.is_button_pressed(0, ControlFunction::A));

    d.bindings_mut()
        .set_binding(port(0), ControlFunction::A, LogicalButton::GcB.into());
    assert!(d.is_button_pressed(0, ControlFunction::A));

    d.bindings_mut().reset_to_default(port(0), ControlFunction::A);
    assert!(!d.is_button_pressed(0, ControlFunction::A));
}

struct EverythingSource;

impl RawSampleSource for EverythingSource {
    fn fixed_pad(&mut self, _port: Port) -> Option<RawSample> {
        Some(RawSample::buttons(DeviceKind::FixedPad, 0))
    }

    fn six_axis(&mut self, _port: Port) -> Option<RawSample> {
        Some(RawSample::buttons(DeviceKind::SixAxisPad, sixaxis_flags::PS))
    }

    fn remote(&mut self, _port: Port) -> Option<RawSample> {
        Some(RawSample::buttons(DeviceKind::MotionRemote, wiimote_flags::HOME))
    }
}

#[test]
fn test_fixed_pad_short_circuits_probe() {
    let mut d = InputDriver::new(EverythingSource, &InputConfig::default()).unwrap();
    assert!(!d.poll().menu_toggle);
    for n in 0..4 {
        assert_eq!(d.kind(port(n)), DeviceKind::FixedPad);
    }
}

struct BrokenSource;

impl RawSampleSource for BrokenSource {
    fn open(&mut self) -> Result<(), InputError> {
        Err(InputError::SourceInit("pad subsystem offline".into()))
    }

    fn fixed_pad(&mut self, _port: Port) -> Option<RawSample> {
        None
    }

    fn remote(&mut self, _port: Port) -> Option<RawSample> {
        None
    }
}

#[test]
fn test_open_failure_builds_nothing() {
    let result = InputDriver::new(BrokenSource, &InputConfig::default());
    assert!(matches!(result, Err(InputError::SourceInit(_))));
}
