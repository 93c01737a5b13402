//! Unit tests for configuration document parsing.

use cuckoo_panel::config::{string_field, ConfigError, HalConfig, PanelConfig};
use serde_json::json;
use std::io::Write;

/// Test that a full document keeps its sections and hardware overrides.
#[test]
fn test_full_document() {
    let config = PanelConfig::from_json_str(
        r#"{
            "hal": { "emulate_display": true, "backlight_active_seconds": 30 },
            "homeAssistant": { "baseURL": "http://10.0.0.2:8123", "token": "abc" },
            "integrations": [{ "id": 1 }],
            "screens": [{ "id": "initial", "type": "home" }, { "type": "menu" }]
        }"#,
    )
    .unwrap();

    assert!(config.hal.emulate_display);
    assert_eq!(config.hal.backlight_active_seconds, 30);
    // Unset hardware fields keep their defaults
    assert_eq!(config.hal.rotary_device, HalConfig::default().rotary_device);
    assert_eq!(config.home_assistant.base_url, "http://10.0.0.2:8123");
    assert_eq!(config.home_assistant.token, "abc");
    assert_eq!(config.integrations().len(), 1);
    assert_eq!(config.screens().len(), 2);
}

/// Test that missing sections fall back to defaults instead of failing.
#[test]
fn test_empty_document() {
    let config = PanelConfig::from_json_str("{}").unwrap();

    assert_eq!(config.hal, HalConfig::default());
    assert!(config.home_assistant.base_url.is_empty());
    assert!(config.screens().is_empty());
    assert!(config.integrations().is_empty());
}

/// Test that a non-array screens section is ignored.
#[test]
fn test_screens_not_an_array() {
    let config = PanelConfig::from_value(json!({ "screens": { "id": "x" } })).unwrap();
    assert!(config.screens().is_empty());
}

/// Test whole-document failures.
#[test]
fn test_document_errors() {
    assert!(matches!(
        PanelConfig::from_json_str("{ not json"),
        Err(ConfigError::ParseError(_))
    ));
    assert!(matches!(
        PanelConfig::from_json_str("\"text\""),
        Err(ConfigError::NotAnObject)
    ));
    assert!(matches!(
        PanelConfig::load("/nonexistent/config.json"),
        Err(ConfigError::IoError(_))
    ));
}

/// Test loading from a file on disk.
#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "screens": [{{ "id": "initial", "type": "home" }}] }}"#).unwrap();

    let config = PanelConfig::load(file.path()).unwrap();
    assert_eq!(config.screens().len(), 1);
}

/// Test that ids written as numbers and strings read the same.
#[test]
fn test_string_field_accepts_numbers() {
    let descriptor = json!({ "a": 3, "b": "3", "c": true });

    assert_eq!(string_field(&descriptor, "a").as_deref(), Some("3"));
    assert_eq!(string_field(&descriptor, "b").as_deref(), Some("3"));
    assert_eq!(string_field(&descriptor, "c"), None);
    assert_eq!(string_field(&descriptor, "missing"), None);
}

/// Test that a mistyped hardware field does not discard its neighbours.
#[test]
fn test_mistyped_hal_field() {
    let config = PanelConfig::from_value(json!({
        "hal": {
            "button_device": "/dev/input/event5",
            "emulate_display": true,
            "backlight_active_seconds": "30"
        }
    }))
    .unwrap();

    assert_eq!(config.hal.button_device, "/dev/input/event5");
    assert!(config.hal.emulate_display);
    assert_eq!(
        config.hal.backlight_active_seconds,
        HalConfig::default().backlight_active_seconds
    );
}
