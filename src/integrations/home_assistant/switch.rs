//! Home Assistant `switch.*` entity.

use super::{HomeAssistantCreds, Transport};
use crate::integrations::{Switch, SwitchState};
use serde_json::json;
use std::sync::Arc;

const DOMAIN: &str = "switch";

pub struct HomeAssistantSwitch {
    id: String,
    name: String,
    entity_id: String,
    creds: Arc<HomeAssistantCreds>,
    transport: Arc<dyn Transport>,
}

impl HomeAssistantSwitch {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        entity_id: impl Into<String>,
        creds: Arc<HomeAssistantCreds>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entity_id: entity_id.into(),
            creds,
            transport,
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn execute(&self, service: &str) {
        tracing::info!("Calling {}/{} for {}", DOMAIN, service, self.entity_id);

        let body = json!({ "entity_id": self.entity_id });
        if let Err(e) = self
            .transport
            .call_service(&self.creds, DOMAIN, service, &body)
        {
            tracing::warn!(
                "Failed to call {}/{} for {}: {}",
                DOMAIN,
                service,
                self.entity_id,
                e
            );
        }
    }
}

impl Switch for HomeAssistantSwitch {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_state(&self) -> SwitchState {
        match self.transport.get_state(&self.creds, &self.entity_id) {
            Ok(state) if state.is_on() => SwitchState::On,
            Ok(_) => SwitchState::Off,
            Err(e) => {
                tracing::warn!("Failed to query state of {}: {}", self.entity_id, e);
                SwitchState::Off
            }
        }
    }

    fn turn_on(&self) {
        self.execute("turn_on");
    }

    fn turn_off(&self) {
        self.execute("turn_off");
    }
}
