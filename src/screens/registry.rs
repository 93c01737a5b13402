//! Screen registry
//!
//! Owns every configured screen, keyed by id. The navigation controller only
//! holds ids into this map.

use super::{
    AnalogClockScreen, DimmerScreen, HomeScreen, MenuScreen, Screen, ScreenInfo, ScreenKind,
    SwitchScreen,
};
use crate::config::{string_field, PanelConfig};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Default)]
pub struct ScreenRegistry {
    screens: HashMap<String, Box<dyn Screen>>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every screen in the `screens` section. Unknown types and
    /// malformed descriptors are skipped with a warning.
    pub fn load(config: &PanelConfig) -> Self {
        let mut registry = Self::new();

        for descriptor in config.screens() {
            if let Some(screen) = build_screen(descriptor) {
                registry.insert(screen);
            }
        }

        tracing::info!("Loaded {} screen(s)", registry.len());
        registry
    }

    /// Add a screen under its own id, replacing any previous one.
    pub fn insert(&mut self, screen: Box<dyn Screen>) {
        let id = screen.id().to_string();
        if self.screens.insert(id.clone(), screen).is_some() {
            tracing::warn!("Duplicate screen id '{}', keeping the last one", id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&dyn Screen> {
        self.screens.get(id).map(|screen| screen.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn Screen + 'static)> {
        self.screens.get_mut(id).map(|screen| screen.as_mut())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.screens.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Screen ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.screens.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Build one screen from its descriptor.
pub fn build_screen(descriptor: &Value) -> Option<Box<dyn Screen>> {
    if !descriptor.is_object() {
        tracing::warn!("Skipping screen descriptor that is not an object");
        return None;
    }

    let type_name = string_field(descriptor, "type").unwrap_or_default();
    let kind = match type_name.parse::<ScreenKind>() {
        Ok(kind) => kind,
        Err(e) => {
            tracing::warn!("Skipping screen: {}", e);
            return None;
        }
    };

    let info = ScreenInfo::from_descriptor(kind, descriptor);
    tracing::debug!("Building {:?} screen '{}'", kind, info.id);

    let screen: Box<dyn Screen> = match kind {
        ScreenKind::Home => Box::new(HomeScreen::from_descriptor(info, descriptor)),
        ScreenKind::Menu => Box::new(MenuScreen::from_descriptor(info, descriptor)),
        ScreenKind::Switch => Box::new(SwitchScreen::new(info)),
        ScreenKind::Dimmer => Box::new(DimmerScreen::new(info)),
        ScreenKind::AnalogClock => Box::new(AnalogClockScreen::new(info)),
    };

    Some(screen)
}
