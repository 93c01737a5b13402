//! Remote smart-home integrations
//!
//! Each configured integration becomes one remote-controllable entity with a
//! capability set: [`Switch`] (on/off) or [`Dimmer`] (brightness 0-100).
//! Entities are created once by the [`IntegrationRegistry`] and live for the
//! whole process.

pub mod home_assistant;
pub mod registry;

use thiserror::Error;

// Re-export main types
pub use home_assistant::{
    EntityState, HomeAssistantCreds, HomeAssistantDimmer, HomeAssistantSwitch, HttpTransport,
    Transport,
};
pub use registry::IntegrationRegistry;

/// Remote-call errors
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// On/off state of a remote entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchState {
    #[default]
    Off,
    On,
}

impl SwitchState {
    pub fn is_on(self) -> bool {
        self == SwitchState::On
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            SwitchState::Off => SwitchState::On,
            SwitchState::On => SwitchState::Off,
        }
    }
}

impl std::fmt::Display for SwitchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwitchState::Off => write!(f, "OFF"),
            SwitchState::On => write!(f, "ON"),
        }
    }
}

/// Entity kind, selected by the domain prefix of a remote entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// `switch.*`
    Switch,
    /// `light.*`
    Dimmer,
}

impl EntityKind {
    /// Decode the kind from an entity id like `light.kitchen`.
    ///
    /// Returns `None` for ids without a `.` separator or with an unsupported
    /// domain.
    pub fn from_entity_id(entity_id: &str) -> Option<Self> {
        let (domain, name) = entity_id.split_once('.')?;
        if name.is_empty() {
            return None;
        }

        match domain {
            "switch" => Some(EntityKind::Switch),
            "light" => Some(EntityKind::Dimmer),
            _ => None,
        }
    }
}

/// A remote on/off entity.
///
/// Commands are best effort: failures are logged by the implementation and
/// never returned to the caller.
pub trait Switch: Send + Sync {
    /// Integration id (registry key)
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Query the remote state. Any failure reads as `Off`.
    fn get_state(&self) -> SwitchState;

    fn turn_on(&self);

    fn turn_off(&self);
}

/// A remote entity with a 0-100 brightness.
pub trait Dimmer: Send + Sync {
    /// Integration id (registry key)
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// On when the remote reports on and a brightness above zero is known.
    fn get_state(&self) -> SwitchState;

    /// Full brightness.
    fn turn_on(&self);

    fn turn_off(&self);

    /// Set brightness in percent. `<= 0` turns the entity off, values above
    /// 100 are clamped.
    fn set_brightness(&self, percent: i32);

    /// Current brightness in percent.
    fn get_brightness(&self) -> u8;
}
