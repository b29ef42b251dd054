//! ViaCEP directory client.
//!
//! # Responsibility
//! - Issue one blocking request per lookup and decode the response.
//! - Translate the service's explicit "not found" marker into `Ok(None)`.

use super::{normalize_postal_code, Address, AddressLookup, LookupError, LookupResult};
use log::info;
use serde::Deserialize;
use std::time::Duration;

/// Public ViaCEP endpoint prefix.
pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP client for the ViaCEP directory.
pub struct ViaCepClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ViaCepClient {
    /// Creates a client against the public endpoint.
    pub fn new() -> LookupResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom endpoint (tests, proxies).
    pub fn with_base_url(base_url: &str) -> LookupResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl AddressLookup for ViaCepClient {
    fn by_postal_code(&self, code: &str) -> LookupResult<Option<Address>> {
        let Some(code) = normalize_postal_code(code) else {
            return Ok(None);
        };

        let url = format!("{}/{code}/json/", self.base_url);
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let payload: ViaCepPayload = response.json()?;
        if payload.is_not_found() {
            info!("event=postal_lookup module=lookup status=ok outcome=not_found code={code}");
            return Ok(None);
        }

        info!("event=postal_lookup module=lookup status=ok outcome=found code={code}");
        Ok(Some(payload.into_address()))
    }
}

/// Wire shape of a ViaCEP response.
///
/// The service signals unknown codes with an `erro` marker whose type has
/// varied across API revisions (boolean or the string `"true"`), so it is
/// decoded leniently.
#[derive(Debug, Deserialize)]
struct ViaCepPayload {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepPayload {
    fn is_not_found(&self) -> bool {
        match &self.erro {
            None => false,
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(text)) => text.eq_ignore_ascii_case("true"),
            Some(_) => true,
        }
    }

    fn into_address(self) -> Address {
        Address {
            street: self.logradouro,
            neighborhood: self.bairro,
            city: self.localidade,
            state: self.uf,
        }
    }
}
