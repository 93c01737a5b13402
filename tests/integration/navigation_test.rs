//! Integration tests for configuration-driven navigation.

use super::transport_mock::MockTransport;
use cuckoo_panel::config::PanelConfig;
use cuckoo_panel::hal::{SensorSnapshot, SilentBeeper, TextFrame};
use cuckoo_panel::input::InputEvent;
use cuckoo_panel::integrations::IntegrationRegistry;
use cuckoo_panel::screens::{NavigationController, ScreenContext, ScreenRegistry};
use serde_json::json;
use std::sync::Arc;

fn panel_config() -> PanelConfig {
    PanelConfig::from_value(json!({
        "homeAssistant": { "baseURL": "http://ha.local:8123", "token": "secret" },
        "integrations": [
            { "id": 1, "name": "Porch", "type": "HomeAssistant", "entityId": "switch.porch" },
            { "id": 2, "name": "Kitchen", "type": "HomeAssistant", "entityId": "light.kitchen" }
        ],
        "screens": [
            { "id": "initial", "type": "home", "nextScreenId": "main" },
            {
                "id": "main",
                "name": "Main",
                "type": "menu",
                "menuItems": [
                    { "name": "Porch", "nextScreenId": "porch", "icon": "power" },
                    { "name": "Kitchen", "nextScreenId": "kitchen", "icon": "light" },
                    { "name": "Clock" }
                ]
            },
            { "id": "porch", "type": "switch", "integrationId": 1 },
            { "id": "kitchen", "type": "dimmer", "integrationId": 2 },
            { "id": "Clock", "type": "AnalogClock" }
        ]
    }))
    .unwrap()
}

struct Panel {
    integrations: IntegrationRegistry,
    navigation: NavigationController,
    sensors: SensorSnapshot,
}

impl Panel {
    fn new(transport: Arc<MockTransport>) -> Self {
        let config = panel_config();
        Self {
            integrations: IntegrationRegistry::load(&config, transport),
            navigation: NavigationController::new(ScreenRegistry::load(&config)),
            sensors: SensorSnapshot::default(),
        }
    }

    fn go(&mut self, id: &str) -> bool {
        let ctx = ScreenContext {
            integrations: &self.integrations,
            beeper: &SilentBeeper,
            sensors: &self.sensors,
        };
        self.navigation.go_to_next_screen(id, &ctx)
    }

    fn back(&mut self) -> bool {
        let ctx = ScreenContext {
            integrations: &self.integrations,
            beeper: &SilentBeeper,
            sensors: &self.sensors,
        };
        self.navigation.go_to_previous_screen(&ctx)
    }

    fn input(&mut self, event: InputEvent) {
        let ctx = ScreenContext {
            integrations: &self.integrations,
            beeper: &SilentBeeper,
            sensors: &self.sensors,
        };
        self.navigation.process_input_event(&event, &ctx);
    }

    fn render(&mut self, frame: &mut TextFrame) -> bool {
        let ctx = ScreenContext {
            integrations: &self.integrations,
            beeper: &SilentBeeper,
            sensors: &self.sensors,
        };
        self.navigation.render_if_needed(frame, &ctx)
    }

    fn assert_history_invariant(&self) {
        assert_eq!(
            self.navigation.current_id(),
            self.navigation.history().last().map(String::as_str)
        );
    }
}

/// Test that current always equals the top of history and the root survives.
#[test]
fn test_history_invariant() {
    let mut panel = Panel::new(Arc::new(MockTransport::default()));
    assert!(panel.go("initial"));

    let steps: &[Option<&str>] = &[
        Some("main"),
        Some("porch"),
        None,
        Some("kitchen"),
        None,
        None,
        None,
        None,
        Some("Clock"),
        Some("main"),
        None,
    ];

    for step in steps {
        match step {
            Some(id) => {
                panel.go(id);
            }
            None => {
                panel.back();
            }
        }
        panel.assert_history_invariant();
        assert!(panel.navigation.depth() >= 1);
    }

    assert_eq!(panel.navigation.history(), ["initial".to_string(), "Clock".to_string()]);
}

/// Test that an unknown target changes neither current screen nor depth.
#[test]
fn test_unknown_target_is_noop() {
    let mut panel = Panel::new(Arc::new(MockTransport::default()));
    panel.go("initial");
    panel.go("main");

    assert!(!panel.go("missing-id"));

    assert_eq!(panel.navigation.current_id(), Some("main"));
    assert_eq!(panel.navigation.depth(), 2);
}

/// Test walking the configured screen graph with button and rotary input.
#[test]
fn test_walk_screen_graph_with_input() {
    let mut panel = Panel::new(Arc::new(MockTransport::default()));
    panel.go("initial");

    // Home -> menu
    panel.input(InputEvent::button_press());
    assert_eq!(panel.navigation.current_id(), Some("main"));

    // Menu reads [Porch, Kitchen, Clock, Back]; select Clock
    for _ in 0..2 {
        panel.input(InputEvent::rotary(-100));
    }
    panel.input(InputEvent::button_press());
    assert_eq!(panel.navigation.current_id(), Some("Clock"));

    // Clock has no next screen: press goes back to the menu
    panel.input(InputEvent::button_press());
    assert_eq!(panel.navigation.current_id(), Some("main"));

    // Selection survives the round trip; one more step lands on Back
    panel.input(InputEvent::rotary(-100));
    panel.input(InputEvent::button_press());
    assert_eq!(panel.navigation.current_id(), Some("initial"));
    assert_eq!(panel.navigation.depth(), 1);
}

/// Test that input before any screen has focus is dropped.
#[test]
fn test_input_before_focus_dropped() {
    let mut panel = Panel::new(Arc::new(MockTransport::default()));

    panel.input(InputEvent::button_press());

    assert_eq!(panel.navigation.current_id(), None);
    assert_eq!(panel.navigation.depth(), 0);
}

/// Test that the focused screen renders through the display collaborator.
#[test]
fn test_render_focused_screen() {
    let mut panel = Panel::new(Arc::new(MockTransport::default()));
    panel.go("initial");
    panel.go("main");

    let mut frame = TextFrame::new();
    assert!(panel.render(&mut frame));
    assert!(!panel.render(&mut frame));

    assert_eq!(
        frame.texts(),
        vec!["Main", "> Porch", "Kitchen", "Clock", "Back"]
    );
}
