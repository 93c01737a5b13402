//! Integration registry
//!
//! Materializes the `integrations` section of the configuration into
//! switches and dimmers keyed by integration id. Switch ids and dimmer ids are
//! independent namespaces. Loading never touches the network.

use super::home_assistant::{HomeAssistantCreds, HomeAssistantDimmer, HomeAssistantSwitch, Transport};
use super::{Dimmer, EntityKind, Switch};
use crate::config::{string_field, PanelConfig};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Integration type handled by this registry.
const HOME_ASSISTANT_TYPE: &str = "HomeAssistant";

/// Owns every configured remote entity.
#[derive(Default)]
pub struct IntegrationRegistry {
    switches: HashMap<String, Box<dyn Switch>>,
    dimmers: HashMap<String, Box<dyn Dimmer>>,
}

impl IntegrationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the configuration document.
    ///
    /// Malformed descriptors and unsupported domains are skipped with a warning.
    pub fn load(config: &PanelConfig, transport: Arc<dyn Transport>) -> Self {
        let creds = Arc::new(HomeAssistantCreds::from(&config.home_assistant));
        let mut registry = Self::new();

        for descriptor in config.integrations() {
            registry.load_descriptor(descriptor, &creds, &transport);
        }

        tracing::info!(
            "Loaded {} switch(es) and {} dimmer(s)",
            registry.switches.len(),
            registry.dimmers.len()
        );

        registry
    }

    fn load_descriptor(
        &mut self,
        descriptor: &Value,
        creds: &Arc<HomeAssistantCreds>,
        transport: &Arc<dyn Transport>,
    ) {
        if !descriptor.is_object() {
            tracing::warn!("Skipping integration descriptor that is not an object");
            return;
        }

        let Some(id) = string_field(descriptor, "id").filter(|id| !id.is_empty()) else {
            tracing::warn!("Skipping integration without an id: {}", descriptor);
            return;
        };
        let name = string_field(descriptor, "name").unwrap_or_default();
        let kind_name = string_field(descriptor, "type").unwrap_or_default();

        if !kind_name.eq_ignore_ascii_case(HOME_ASSISTANT_TYPE) {
            tracing::warn!(
                "Skipping integration '{}': unsupported type '{}'",
                id,
                kind_name
            );
            return;
        }

        let entity_id = string_field(descriptor, "entityId").unwrap_or_default();
        match EntityKind::from_entity_id(&entity_id) {
            Some(EntityKind::Switch) => {
                tracing::debug!("Integration '{}' -> switch {}", id, entity_id);
                let switch = HomeAssistantSwitch::new(
                    id.clone(),
                    name,
                    entity_id,
                    creds.clone(),
                    transport.clone(),
                );
                self.register_switch(id, Box::new(switch));
            }
            Some(EntityKind::Dimmer) => {
                tracing::debug!("Integration '{}' -> dimmer {}", id, entity_id);
                let dimmer = HomeAssistantDimmer::new(
                    id.clone(),
                    name,
                    entity_id,
                    creds.clone(),
                    transport.clone(),
                );
                self.register_dimmer(id, Box::new(dimmer));
            }
            None => {
                tracing::warn!(
                    "Skipping integration '{}': unsupported entity id '{}'",
                    id,
                    entity_id
                );
            }
        }
    }

    /// Add or replace a switch.
    pub fn register_switch(&mut self, id: impl Into<String>, switch: Box<dyn Switch>) {
        let id = id.into();
        if self.switches.insert(id.clone(), switch).is_some() {
            tracing::warn!("Duplicate switch integration id '{}', keeping the last one", id);
        }
    }

    /// Add or replace a dimmer.
    pub fn register_dimmer(&mut self, id: impl Into<String>, dimmer: Box<dyn Dimmer>) {
        let id = id.into();
        if self.dimmers.insert(id.clone(), dimmer).is_some() {
            tracing::warn!("Duplicate dimmer integration id '{}', keeping the last one", id);
        }
    }

    pub fn get_switch(&self, id: &str) -> Option<&dyn Switch> {
        self.switches.get(id).map(|s| s.as_ref())
    }

    pub fn get_dimmer(&self, id: &str) -> Option<&dyn Dimmer> {
        self.dimmers.get(id).map(|d| d.as_ref())
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub fn dimmer_count(&self) -> usize {
        self.dimmers.len()
    }
}
