//! Home Assistant entities
//!
//! Switches and lights are addressed by their Home Assistant entity id and
//! share one set of credentials. All traffic goes through a [`Transport`].

pub mod dimmer;
pub mod switch;
pub mod transport;

use crate::config::HomeAssistantConfig;

pub use dimmer::HomeAssistantDimmer;
pub use switch::HomeAssistantSwitch;
pub use transport::{EntityState, HttpTransport, Transport};

/// Base URL and bearer token shared by every entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeAssistantCreds {
    pub base_url: String,
    pub token: String,
}

impl HomeAssistantCreds {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// `{base}/api/states/{entity_id}`
    pub fn state_url(&self, entity_id: &str) -> String {
        format!("{}/api/states/{}", self.base(), entity_id)
    }

    /// `{base}/api/services/{domain}/{service}`
    pub fn service_url(&self, domain: &str, service: &str) -> String {
        format!("{}/api/services/{}/{}", self.base(), domain, service)
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl From<&HomeAssistantConfig> for HomeAssistantCreds {
    fn from(config: &HomeAssistantConfig) -> Self {
        Self::new(config.base_url.clone(), config.token.clone())
    }
}
