//! Unit tests for brightness scaling and the dimmer screen value.

use cuckoo_panel::integrations::home_assistant::dimmer::{native_to_percent, percent_to_native};
use cuckoo_panel::screens::dimmer::{DimmerScreen, DIMMER_STEP};
use cuckoo_panel::screens::{ScreenInfo, ScreenKind};

#[test]
fn test_percent_to_native() {
    assert_eq!(percent_to_native(0), 0);
    assert_eq!(percent_to_native(1), 3);
    assert_eq!(percent_to_native(48), 122);
    assert_eq!(percent_to_native(50), 128);
    assert_eq!(percent_to_native(100), 255);
    // Out of range input saturates
    assert_eq!(percent_to_native(200), 255);
}

#[test]
fn test_native_to_percent() {
    assert_eq!(native_to_percent(0.0), 0);
    assert_eq!(native_to_percent(128.0), 50);
    assert_eq!(native_to_percent(255.0), 100);
    assert_eq!(native_to_percent(300.0), 100);
    assert_eq!(native_to_percent(-5.0), 0);
}

#[test]
fn test_screen_value_clamped() {
    let mut screen = DimmerScreen::new(ScreenInfo::new(ScreenKind::Dimmer, "d", "Dimmer"));
    assert_eq!(screen.percent(), 50);

    screen.set_raw_value(-10);
    assert_eq!(screen.raw_value(), 0);

    screen.set_raw_value(1_000_000);
    assert_eq!(screen.percent(), 100);

    // Partial steps round down
    screen.set_raw_value(37 * DIMMER_STEP + DIMMER_STEP - 1);
    assert_eq!(screen.percent(), 37);
}
