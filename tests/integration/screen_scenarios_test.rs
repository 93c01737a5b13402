//! End-to-end screen scenarios against a recording Home Assistant transport.

use super::transport_mock::MockTransport;
use cuckoo_panel::config::PanelConfig;
use cuckoo_panel::hal::{SensorSnapshot, SilentBeeper, TextFrame};
use cuckoo_panel::input::InputEvent;
use cuckoo_panel::integrations::IntegrationRegistry;
use cuckoo_panel::screens::{NavigationController, ScreenContext, ScreenRegistry};
use serde_json::{json, Value};
use std::sync::Arc;

/// Panel wired from a config document, rendering into a text frame.
struct Harness {
    integrations: IntegrationRegistry,
    navigation: NavigationController,
    sensors: SensorSnapshot,
    frame: TextFrame,
}

impl Harness {
    fn new(document: Value, transport: Arc<MockTransport>) -> Self {
        let config = PanelConfig::from_value(document).unwrap();
        Self {
            integrations: IntegrationRegistry::load(&config, transport),
            navigation: NavigationController::new(ScreenRegistry::load(&config)),
            sensors: SensorSnapshot {
                temperature_c: Some(21.5),
                humidity_percent: Some(40.0),
            },
            frame: TextFrame::new(),
        }
    }

    fn go(&mut self, id: &str) {
        let ctx = ScreenContext {
            integrations: &self.integrations,
            beeper: &SilentBeeper,
            sensors: &self.sensors,
        };
        assert!(self.navigation.go_to_next_screen(id, &ctx));
    }

    fn input(&mut self, event: InputEvent) {
        let ctx = ScreenContext {
            integrations: &self.integrations,
            beeper: &SilentBeeper,
            sensors: &self.sensors,
        };
        self.navigation.process_input_event(&event, &ctx);
    }

    fn render(&mut self) -> Vec<String> {
        let ctx = ScreenContext {
            integrations: &self.integrations,
            beeper: &SilentBeeper,
            sensors: &self.sensors,
        };
        self.navigation.render_if_needed(&mut self.frame, &ctx);
        self.frame.texts().into_iter().map(str::to_string).collect()
    }
}

fn document(screens: Value) -> Value {
    json!({
        "homeAssistant": { "baseURL": "http://ha.local:8123/", "token": "secret" },
        "integrations": [
            { "id": 1, "name": "Porch", "type": "HomeAssistant", "entityId": "switch.porch" },
            { "id": 2, "name": "Kitchen", "type": "homeassistant", "entityId": "light.kitchen" }
        ],
        "screens": screens
    })
}

/// Test menu composition with a forward target configured.
#[test]
fn test_menu_with_next_screen() {
    let screens = json!([
        {
            "id": "menu",
            "name": "Rooms",
            "type": "menu",
            "nextScreenId": "home",
            "menuItems": [
                { "name": "Porch", "nextScreenId": "porch" },
                { "name": "Kitchen", "nextScreenId": "kitchen" }
            ]
        },
        { "id": "home", "type": "home" },
        { "id": "porch", "type": "switch", "integrationId": 1 },
        { "id": "kitchen", "type": "dimmer", "integrationId": 2 }
    ]);
    let mut panel = Harness::new(document(screens), Arc::new(MockTransport::default()));
    panel.go("menu");

    assert_eq!(
        panel.render(),
        vec!["Rooms", "> Previous", "Porch", "Kitchen", "Next"]
    );

    // Last entry forwards to the configured next screen
    for _ in 0..3 {
        panel.input(InputEvent::rotary(-100));
    }
    panel.input(InputEvent::button_press());
    assert_eq!(panel.navigation.current_id(), Some("home"));
}

/// Test that two +50 rotations from 50% commit 48% as native 122.
#[test]
fn test_dimmer_commit() {
    let transport = Arc::new(MockTransport::default());
    transport.set_state("light.kitchen", "on", json!({ "brightness": 128 }));

    let screens = json!([
        { "id": "menu", "type": "menu", "menuItems": [{ "name": "Kitchen", "nextScreenId": "kitchen" }] },
        { "id": "kitchen", "name": "Kitchen", "type": "dimmer", "integrationId": 2 }
    ]);
    let mut panel = Harness::new(document(screens), transport.clone());
    panel.go("menu");
    panel.go("kitchen");
    assert!(panel.render().contains(&"50%".to_string()));

    panel.input(InputEvent::rotary(50));
    panel.input(InputEvent::rotary(50));
    assert!(panel.render().contains(&"48%".to_string()));

    panel.input(InputEvent::button_press());

    let calls = transport.calls_to("light/turn_on");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, "http://ha.local:8123/api/services/light/turn_on");
    assert_eq!(calls[0].token, "secret");
    assert_eq!(
        calls[0].body,
        json!({ "entity_id": "light.kitchen", "brightness": 122 })
    );

    // No next screen configured: the commit returns to the menu
    assert_eq!(panel.navigation.current_id(), Some("menu"));
}

/// Test that a dimmer committed at zero turns the light off.
#[test]
fn test_dimmer_commit_zero_turns_off() {
    let transport = Arc::new(MockTransport::default());
    transport.set_state("light.kitchen", "on", json!({ "brightness": 5 }));

    let screens = json!([
        { "id": "kitchen", "type": "dimmer", "integrationId": 2, "nextScreenId": "kitchen" }
    ]);
    let mut panel = Harness::new(document(screens), transport.clone());
    panel.go("kitchen");

    panel.input(InputEvent::rotary(5000));
    panel.input(InputEvent::button_press());

    assert!(transport.calls_to("light/turn_on").is_empty());
    let calls = transport.calls_to("light/turn_off");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, json!({ "entity_id": "light.kitchen" }));
}

/// Test that toggling an off switch sends exactly one turn_on.
#[test]
fn test_switch_toggle_from_off() {
    let transport = Arc::new(MockTransport::default());
    transport.set_state("switch.porch", "off", Value::Null);

    let screens = json!([
        { "id": "porch", "name": "Porch", "type": "switch", "integrationId": 1 }
    ]);
    let mut panel = Harness::new(document(screens), transport.clone());
    panel.go("porch");
    assert_eq!(panel.render(), vec!["Porch", "> On", "  Back"]);

    panel.input(InputEvent::button_press());

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].url.ends_with("switch/turn_on"));
    assert_eq!(calls[0].body, json!({ "entity_id": "switch.porch" }));

    // The label now offers the opposite action
    assert_eq!(panel.render(), vec!["Porch", "> Off", "  Back"]);
    assert_eq!(panel.navigation.current_id(), Some("porch"));
}

/// Test that an unreachable server reads as off and commands still go out.
#[test]
fn test_switch_offline_is_fail_safe() {
    let transport = Arc::new(MockTransport::offline());

    let screens = json!([
        { "id": "porch", "name": "Porch", "type": "switch", "integrationId": 1 }
    ]);
    let mut panel = Harness::new(document(screens), transport.clone());
    panel.go("porch");

    assert_eq!(panel.render(), vec!["Porch", "> On", "  Back"]);

    panel.input(InputEvent::button_press());
    assert_eq!(transport.calls_to("switch/turn_on").len(), 1);
    // The local state follows the command even though it failed
    assert_eq!(panel.render(), vec!["Porch", "> Off", "  Back"]);
}

/// Test that a switch screen with a dangling integration does nothing.
#[test]
fn test_switch_without_integration() {
    let transport = Arc::new(MockTransport::default());

    let screens = json!([
        { "id": "garage", "type": "switch", "integrationId": 99 }
    ]);
    let mut panel = Harness::new(document(screens), transport.clone());
    panel.go("garage");

    panel.input(InputEvent::button_press());

    assert!(transport.calls().is_empty());
    assert_eq!(panel.navigation.current_id(), Some("garage"));
}

/// Test that the home screen shows the sensor readings in the configured unit.
#[test]
fn test_home_screen_readings() {
    let screens = json!([
        { "id": "initial", "type": "home", "showTempAs": "Fahrenheit", "timeFormat": 24 }
    ]);
    let mut panel = Harness::new(document(screens), Arc::new(MockTransport::default()));
    panel.go("initial");

    let texts = panel.render();

    // 21.5 C -> (21.5 * 1.8) truncated + 32
    assert!(texts.contains(&"70 F".to_string()));
    assert!(texts.contains(&"40.00 %".to_string()));
}
