//! Postal code (CEP) lookup against a ViaCEP-compatible service.
//!
//! Lookups are best-effort: a missing postal code or a failed request
//! leaves the address fields alone and never reaches the user.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::LookupError;
use crate::format::{POSTAL_CODE_DIGITS, digits_only};
use crate::model::{BrazilianState, BusinessRecord};

/// Address fields filled in from a postal code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub city: String,
    pub state: Option<BrazilianState>,
    pub street: String,
    pub neighborhood: String,
}

impl ResolvedAddress {
    /// Overwrite the four address fields of `record`.
    pub fn apply_to(&self, record: &mut BusinessRecord) {
        record.city = self.city.clone();
        record.state = self.state;
        record.street = self.street.clone();
        record.neighborhood = self.neighborhood.clone();
    }
}

/// Resolves an 8-digit postal code to an address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// `Ok(None)` when the service reports the postal code does not exist.
    async fn resolve(&self, postal_code: &str) -> Result<Option<ResolvedAddress>, LookupError>;
}

/// Raw ViaCEP body. Not-found is `{"erro": true}` (older deployments send
/// `"true"` as a string).
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    uf: Option<String>,
    #[serde(default)]
    logradouro: Option<String>,
    #[serde(default)]
    bairro: Option<String>,
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

impl ViaCepResponse {
    fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    fn into_address(self) -> Option<ResolvedAddress> {
        if self.is_not_found() {
            return None;
        }
        Some(ResolvedAddress {
            city: self.localidade.unwrap_or_default(),
            state: self.uf.as_deref().and_then(|uf| uf.parse().ok()),
            street: self.logradouro.unwrap_or_default(),
            neighborhood: self.bairro.unwrap_or_default(),
        })
    }
}

/// HTTP client for `GET {base}/ws/{cep}/json/`.
pub struct ViaCepClient {
    base_url: String,
    client: reqwest::Client,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn lookup_url(&self, digits: &str) -> String {
        format!("{}/ws/{digits}/json/", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn resolve(&self, postal_code: &str) -> Result<Option<ResolvedAddress>, LookupError> {
        let digits = digits_only(postal_code);
        if digits.len() != POSTAL_CODE_DIGITS {
            return Err(LookupError::InvalidPostalCode {
                digits: digits.len(),
            });
        }

        let resp = self
            .client
            .get(self.lookup_url(&digits))
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!("unexpected status {status}")));
        }

        let body: ViaCepResponse = resp
            .json()
            .await
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        let address = body.into_address();
        if address.is_none() {
            debug!(cep = %digits, "Postal code not found");
        }
        Ok(address)
    }
}
