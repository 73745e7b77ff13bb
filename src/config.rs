//! Configuration types.

use crate::error::ConfigError;

/// Default base URL of the postal code lookup service.
pub const DEFAULT_ADDRESS_SERVICE_URL: &str = "https://viacep.com.br";

/// Default intake webhook that receives finished registrations.
pub const DEFAULT_INTAKE_ENDPOINT_URL: &str = "https://flow.cactoai.com/webhook/cadastro-clinica";

/// Default origin reported in `triggered_from`.
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Endpoints the form talks to.
///
/// Both URLs are injected so the core can run against a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Base URL of the address service (`{base}/ws/{cep}/json/`).
    pub address_service_url: String,
    /// Full URL the submission payload is POSTed to.
    pub intake_endpoint_url: String,
    /// Origin identifier sent as `triggered_from`.
    pub origin: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            address_service_url: DEFAULT_ADDRESS_SERVICE_URL.to_string(),
            intake_endpoint_url: DEFAULT_INTAKE_ENDPOINT_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }
}

impl IntakeConfig {
    /// Build configuration from environment variables, falling back to the
    /// defaults for anything unset.
    ///
    /// - `CLINIC_INTAKE_ADDRESS_URL`
    /// - `CLINIC_INTAKE_WEBHOOK_URL`
    /// - `CLINIC_INTAKE_ORIGIN`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let address_service_url = std::env::var("CLINIC_INTAKE_ADDRESS_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.address_service_url);

        let intake_endpoint_url = std::env::var("CLINIC_INTAKE_WEBHOOK_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.intake_endpoint_url);

        let origin = std::env::var("CLINIC_INTAKE_ORIGIN")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.origin);

        Self {
            address_service_url,
            intake_endpoint_url,
            origin,
        }
    }

    pub fn with_address_service_url(mut self, url: impl Into<String>) -> Self {
        self.address_service_url = url.into();
        self
    }

    pub fn with_intake_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.intake_endpoint_url = url.into();
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Check that both endpoints are http(s) URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_http_url("address_service_url", &self.address_service_url)?;
        check_http_url("intake_endpoint_url", &self.intake_endpoint_url)?;
        Ok(())
    }
}

fn check_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = reqwest::Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("unsupported scheme `{other}`"),
        }),
    }
}
