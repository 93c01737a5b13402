//! Home Assistant REST transport.

use super::HomeAssistantCreds;
use crate::integrations::IntegrationError;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Request timeout for remote calls. They block the main loop.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// State object returned by `GET /api/states/{entity_id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EntityState {
    #[serde(default)]
    pub entity_id: String,
    /// `"on"`, `"off"`, `"unavailable"`, ...
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub attributes: Value,
}

impl EntityState {
    pub fn is_on(&self) -> bool {
        self.state == "on"
    }

    /// Native 0-255 brightness attribute of a light, if reported.
    pub fn brightness(&self) -> Option<f64> {
        self.attributes.get("brightness").and_then(Value::as_f64)
    }
}

/// Logical remote operations keyed by entity id.
pub trait Transport: Send + Sync {
    /// Fetch the current state of one entity.
    fn get_state(
        &self,
        creds: &HomeAssistantCreds,
        entity_id: &str,
    ) -> Result<EntityState, IntegrationError>;

    /// Call `domain/service` with a JSON body.
    fn call_service(
        &self,
        creds: &HomeAssistantCreds,
        domain: &str,
        service: &str,
        body: &Value,
    ) -> Result<(), IntegrationError>;
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, IntegrationError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IntegrationError::Request(e.to_string()))?;

        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn get_state(
        &self,
        creds: &HomeAssistantCreds,
        entity_id: &str,
    ) -> Result<EntityState, IntegrationError> {
        let url = creds.state_url(entity_id);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", creds.token))
            .header("Content-Type", "application/json")
            .send()
            .map_err(|e| IntegrationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IntegrationError::Status(status.as_u16()));
        }

        response
            .json::<EntityState>()
            .map_err(|e| IntegrationError::InvalidResponse(e.to_string()))
    }

    fn call_service(
        &self,
        creds: &HomeAssistantCreds,
        domain: &str,
        service: &str,
        body: &Value,
    ) -> Result<(), IntegrationError> {
        let url = creds.service_url(domain, service);
        tracing::debug!("POST {} {}", url, body);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", creds.token))
            .json(body)
            .send()
            .map_err(|e| IntegrationError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(IntegrationError::Status(status.as_u16()))
        }
    }
}
