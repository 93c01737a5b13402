//! Unit tests for screen descriptors and entity id decoding.

use cuckoo_panel::integrations::EntityKind;
use cuckoo_panel::screens::registry::build_screen;
use cuckoo_panel::screens::{Screen, ScreenAction, ScreenInfo, ScreenKind};
use serde_json::json;

#[test]
fn test_screen_kind_parsing() {
    assert_eq!("Home".parse::<ScreenKind>(), Ok(ScreenKind::Home));
    assert_eq!("MENU".parse::<ScreenKind>(), Ok(ScreenKind::Menu));
    assert_eq!("analog_clock".parse::<ScreenKind>(), Ok(ScreenKind::AnalogClock));
    assert_eq!("Analog Clock".parse::<ScreenKind>(), Ok(ScreenKind::AnalogClock));
    assert!("thermostat".parse::<ScreenKind>().is_err());
}

/// Test that the id falls back to the name, and the name to the kind.
#[test]
fn test_info_defaults() {
    let info = ScreenInfo::from_descriptor(ScreenKind::Dimmer, &json!({ "name": "Lamp" }));
    assert_eq!(info.id, "Lamp");
    assert!(!info.has_next_screen());
    assert!(info.integration_id.is_empty());

    let info = ScreenInfo::from_descriptor(ScreenKind::AnalogClock, &json!({}));
    assert_eq!(info.name, "Analog Clock");
    assert_eq!(info.id, "Analog Clock");
}

#[test]
fn test_info_wiring() {
    let info = ScreenInfo::from_descriptor(
        ScreenKind::Switch,
        &json!({ "id": 7, "nextScreenId": "home", "integrationId": 3 }),
    );

    assert_eq!(info.id, "7");
    assert_eq!(info.integration_id, "3");
    assert_eq!(info.next_or_back(), ScreenAction::GoToNext("home".to_string()));
    assert_eq!(
        ScreenInfo::new(ScreenKind::Switch, "s", "S").next_or_back(),
        ScreenAction::GoToPrevious
    );
}

#[test]
fn test_build_screen() {
    let screen = build_screen(&json!({ "id": "clock", "type": "analogClock" })).unwrap();
    assert_eq!(screen.id(), "clock");
    assert_eq!(screen.info().kind, ScreenKind::AnalogClock);

    assert!(build_screen(&json!({ "id": "x", "type": "weather" })).is_none());
    assert!(build_screen(&json!({ "id": "x" })).is_none());
    assert!(build_screen(&json!("home")).is_none());
}

#[test]
fn test_entity_kinds() {
    assert_eq!(EntityKind::from_entity_id("switch.porch"), Some(EntityKind::Switch));
    assert_eq!(EntityKind::from_entity_id("light.kitchen"), Some(EntityKind::Dimmer));
    assert_eq!(EntityKind::from_entity_id("fan.attic"), None);
    assert_eq!(EntityKind::from_entity_id("light."), None);
    assert_eq!(EntityKind::from_entity_id("switch"), None);
}
