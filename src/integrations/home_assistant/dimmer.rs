//! Home Assistant `light.*` entity with brightness.
//!
//! Brightness is kept locally as a percentage and mapped to the native
//! 0-255 scale on the wire.

use super::{HomeAssistantCreds, Transport};
use crate::integrations::{Dimmer, SwitchState};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const DOMAIN: &str = "light";

/// Native brightness of a fully lit light.
pub const NATIVE_MAX: f64 = 255.0;

/// Percentage (0-100) to native brightness (0-255).
pub fn percent_to_native(percent: u8) -> u8 {
    let percent = percent.min(100) as f64;
    (percent * NATIVE_MAX / 100.0).round() as u8
}

/// Native brightness (0-255) to percentage, clamped to 0-100.
pub fn native_to_percent(native: f64) -> u8 {
    (native * 100.0 / NATIVE_MAX).round().clamp(0.0, 100.0) as u8
}

pub struct HomeAssistantDimmer {
    id: String,
    name: String,
    entity_id: String,
    creds: Arc<HomeAssistantCreds>,
    transport: Arc<dyn Transport>,
    /// Last known brightness percentage
    brightness: AtomicU8,
}

impl HomeAssistantDimmer {
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
            brightness: AtomicU8::new(0),
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Brightness cached from the last write or successful read.
    pub fn cached_brightness(&self) -> u8 {
        self.brightness.load(Ordering::Relaxed)
    }

    fn execute(&self, service: &str, body: Value) {
        tracing::info!("Calling {}/{} with {}", DOMAIN, service, body);

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

impl Dimmer for HomeAssistantDimmer {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_state(&self) -> SwitchState {
        let remote_on = match self.transport.get_state(&self.creds, &self.entity_id) {
            Ok(state) => state.is_on(),
            Err(e) => {
                tracing::warn!("Failed to query state of {}: {}", self.entity_id, e);
                false
            }
        };

        if remote_on && self.cached_brightness() > 0 {
            SwitchState::On
        } else {
            SwitchState::Off
        }
    }

    fn turn_on(&self) {
        self.set_brightness(100);
    }

    fn turn_off(&self) {
        self.set_brightness(0);
    }

    fn set_brightness(&self, percent: i32) {
        if percent <= 0 {
            self.brightness.store(0, Ordering::Relaxed);
            self.execute("turn_off", json!({ "entity_id": self.entity_id }));
            return;
        }

        let percent = percent.min(100) as u8;
        self.brightness.store(percent, Ordering::Relaxed);
        self.execute(
            "turn_on",
            json!({
                "entity_id": self.entity_id,
                "brightness": percent_to_native(percent),
            }),
        );
    }

    fn get_brightness(&self) -> u8 {
        match self.transport.get_state(&self.creds, &self.entity_id) {
            Ok(state) => {
                // Lights that are off report no brightness attribute
                let percent = match state.brightness() {
                    Some(native) if state.is_on() => native_to_percent(native),
                    _ => 0,
                };
                self.brightness.store(percent, Ordering::Relaxed);
                percent
            }
            Err(e) => {
                tracing::warn!("Failed to query brightness of {}: {}", self.entity_id, e);
                self.cached_brightness()
            }
        }
    }
}
