//! Recording Home Assistant transport.
//!
//! Serves entity states from memory and records every service call, so screen
//! and entity behavior can be checked without a server.

use cuckoo_panel::integrations::{EntityState, HomeAssistantCreds, IntegrationError, Transport};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// A recorded `domain/service` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub url: String,
    pub token: String,
    pub body: Value,
}

/// In-memory transport.
#[derive(Default)]
pub struct MockTransport {
    states: Mutex<HashMap<String, EntityState>>,
    calls: Mutex<Vec<RecordedCall>>,
    /// Fail every request
    pub offline: bool,
}

impl MockTransport {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    /// Set what the server reports for `entity_id`.
    pub fn set_state(&self, entity_id: &str, state: &str, attributes: Value) {
        self.states.lock().unwrap().insert(
            entity_id.to_string(),
            EntityState {
                entity_id: entity_id.to_string(),
                state: state.to_string(),
                attributes,
            },
        );
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose URL ends with `domain/service`.
    pub fn calls_to(&self, service_path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.url.ends_with(service_path))
            .collect()
    }
}

impl Transport for MockTransport {
    fn get_state(
        &self,
        _creds: &HomeAssistantCreds,
        entity_id: &str,
    ) -> Result<EntityState, IntegrationError> {
        if self.offline {
            return Err(IntegrationError::Request("offline".to_string()));
        }

        self.states
            .lock()
            .unwrap()
            .get(entity_id)
            .cloned()
            .ok_or(IntegrationError::Status(404))
    }

    fn call_service(
        &self,
        creds: &HomeAssistantCreds,
        domain: &str,
        service: &str,
        body: &Value,
    ) -> Result<(), IntegrationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: creds.service_url(domain, service),
            token: creds.token.clone(),
            body: body.clone(),
        });

        if self.offline {
            Err(IntegrationError::Request("offline".to_string()))
        } else {
            Ok(())
        }
    }
}
