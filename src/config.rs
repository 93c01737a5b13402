//! Panel configuration document.
//!
//! The whole panel is driven by one JSON document: hardware paths (`hal`),
//! shared Home Assistant credentials (`homeAssistant`), the `integrations`
//! list and the `screens` list. Only whole-document failures are errors;
//! individual descriptors are validated (and skipped) by the registries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Hardware abstraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalConfig {
    /// Evdev node driving the piezo beeper
    pub beeper_device: String,
    /// Framebuffer device
    pub display_device: String,
    /// Evdev node for the push button
    pub button_device: String,
    /// Evdev node for the rotary encoder
    pub rotary_device: String,
    /// Sysfs brightness file for the backlight
    pub backlight_device: String,
    /// Serial port of the sensor backplate
    pub backplate_serial_device: String,
    /// Run without hardware input (desktop development)
    pub emulate_display: bool,
    /// Seconds of inactivity before the backlight dims
    pub backlight_active_seconds: u32,
    /// Brightness written while active
    pub backlight_max_brightness: u32,
    /// Brightness written once idle
    pub backlight_min_brightness: u32,
}

impl Default for HalConfig {
    fn default() -> Self {
        Self {
            beeper_device: "/dev/input/event0".to_string(),
            display_device: "/dev/fb0".to_string(),
            button_device: "/dev/input/event2".to_string(),
            rotary_device: "/dev/input/event1".to_string(),
            backlight_device: "/sys/class/backlight/3-0036/brightness".to_string(),
            backplate_serial_device: "/dev/ttyO2".to_string(),
            emulate_display: false,
            backlight_active_seconds: 10,
            backlight_max_brightness: 115,
            backlight_min_brightness: 20,
        }
    }
}

impl HalConfig {
    /// Decode a `hal` section one key at a time.
    ///
    /// A key with a value of the wrong type is skipped with a warning; every
    /// other key still applies on top of the defaults.
    pub fn from_section(section: &Value) -> Self {
        let Some(fields) = section.as_object() else {
            tracing::warn!("'hal' section is not an object, using defaults");
            return Self::default();
        };

        let mut config = Self::default();
        let Ok(mut merged) = serde_json::to_value(&config) else {
            return config;
        };

        for (key, value) in fields {
            let mut candidate = merged.clone();
            candidate[key.as_str()] = value.clone();

            match Self::deserialize(&candidate) {
                Ok(parsed) => {
                    config = parsed;
                    merged = candidate;
                }
                Err(e) => tracing::warn!(
                    "Ignoring hal.{} ({}), keeping {}",
                    key,
                    e,
                    merged[key.as_str()]
                ),
            }
        }

        config
    }
}

/// Shared Home Assistant credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeAssistantConfig {
    /// Base URL, e.g. `http://homeassistant.local:8123`
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// Long-lived access token
    pub token: String,
}

/// A parsed configuration document.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Hardware settings (defaults when absent)
    pub hal: HalConfig,
    /// Remote credentials (empty when absent)
    pub home_assistant: HomeAssistantConfig,
    document: Value,
}

impl PanelConfig {
    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config = Self::from_json_str(&content)?;
        tracing::info!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Parse a configuration document from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build from an already parsed document. The root must be an object.
    pub fn from_value(document: Value) -> Result<Self, ConfigError> {
        if !document.is_object() {
            return Err(ConfigError::NotAnObject);
        }

        let hal = match document.get("hal") {
            Some(section) => HalConfig::from_section(section),
            None => {
                tracing::warn!("No 'hal' section found in config, using defaults");
                HalConfig::default()
            }
        };

        let home_assistant = match document.get("homeAssistant") {
            Some(section) => HomeAssistantConfig::deserialize(section).unwrap_or_else(|e| {
                tracing::warn!("Invalid 'homeAssistant' section: {}", e);
                HomeAssistantConfig::default()
            }),
            None => HomeAssistantConfig::default(),
        };

        Ok(Self {
            hal,
            home_assistant,
            document,
        })
    }

    /// Screen descriptors in document order.
    pub fn screens(&self) -> &[Value] {
        self.section_array("screens")
    }

    /// Integration descriptors in document order.
    pub fn integrations(&self) -> &[Value] {
        self.section_array("integrations")
    }

    /// The raw document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    fn section_array(&self, key: &str) -> &[Value] {
        match self.document.get(key) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                tracing::warn!("Config section '{}' is not an array, ignoring it", key);
                &[]
            }
            None => &[],
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Root JSON element must be an object")]
    NotAnObject,
}

/// Read a string field, treating numbers as their decimal text.
///
/// Descriptor ids have been written both ways in the wild (`"id": 3` and
/// `"id": "3"`), so both resolve to the same key.
pub fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
