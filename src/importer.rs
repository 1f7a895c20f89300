//! Deck URL import: provider dispatch, normalization and the two-tier
//! client fetch.
//!
//! [`DeckImporter::normalize`] is the server-side path: resolve the provider
//! and call its API directly. [`DeckImporter::import`] is the client path:
//! try the provider API through a CORS proxy first, then fall back to a
//! fetch-deck endpoint that runs `normalize` on the server.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::config;
use crate::error::{BoardStateError, Result};
use crate::models::DeckPayload;
use crate::providers::{DeckProvider, ProviderRegistry};

// ---------------------------------------------------------------------------
// DeckImporterBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring a [`DeckImporter`].
pub struct DeckImporterBuilder {
    timeout: Duration,
    cors_proxy: Option<String>,
    fallback_endpoint: Option<String>,
    registry: Option<ProviderRegistry>,
}

impl Default for DeckImporterBuilder {
    fn default() -> Self {
        Self {
            timeout: config::DEFAULT_TIMEOUT,
            cors_proxy: Some(config::DEFAULT_CORS_PROXY.to_string()),
            fallback_endpoint: None,
            registry: None,
        }
    }
}

impl DeckImporterBuilder {
    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the CORS proxy prefix used for the first import attempt, or
    /// `None` to skip straight to the fallback endpoint.
    ///
    /// The percent-encoded provider API URL is appended to the prefix.
    pub fn cors_proxy(mut self, proxy: Option<&str>) -> Self {
        self.cors_proxy = proxy.map(str::to_string);
        self
    }

    /// Set the fetch-deck endpoint used when the proxy attempt fails
    /// (e.g. `http://localhost:3000/api/fetch-deck`).
    pub fn fallback_endpoint(mut self, endpoint: Option<&str>) -> Self {
        self.fallback_endpoint = endpoint.map(str::to_string);
        self
    }

    /// Replace the provider set (defaults to Moxfield and Archidekt).
    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> DeckImporter {
        DeckImporter {
            timeout: self.timeout,
            cors_proxy: self.cors_proxy,
            fallback_endpoint: self.fallback_endpoint,
            registry: self.registry.unwrap_or_default(),
            client: OnceLock::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// DeckImporter
// ---------------------------------------------------------------------------

/// Fetches decks from hosting sites and normalizes them into
/// `"<qty> <name>\n"` lists.
pub struct DeckImporter {
    timeout: Duration,
    cors_proxy: Option<String>,
    fallback_endpoint: Option<String>,
    registry: ProviderRegistry,
    client: OnceLock<Client>,
}

impl Default for DeckImporter {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DeckImporter {
    pub fn builder() -> DeckImporterBuilder {
        DeckImporterBuilder::default()
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Resolve the provider for `url` and fetch the deck directly from its API.
    ///
    /// # Errors
    ///
    /// * [`BoardStateError::MissingParameter`] for a blank URL.
    /// * [`BoardStateError::UnsupportedProvider`] when no provider matches.
    /// * [`BoardStateError::InvalidUrlFormat`] when no deck ID can be extracted.
    /// * [`BoardStateError::Upstream`] for a non-success API status.
    pub fn normalize(&self, url: &str) -> Result<DeckPayload> {
        let url = url.trim();
        if url.is_empty() {
            return Err(BoardStateError::MissingParameter);
        }
        let provider = self.registry.resolve(url)?;
        // Reject malformed URLs before any client is built.
        provider.deck_id(url)?;
        provider.fetch(self.client()?, url)
    }

    /// Import a deck URL the way the board tracker does: CORS proxy first,
    /// fetch-deck endpoint second.
    ///
    /// A proxy attempt that errors or yields nothing usable is logged and
    /// discarded. The endpoint attempt is authoritative: its error is
    /// returned as-is and nothing is partially applied.
    pub fn import(&self, url: &str) -> Result<DeckPayload> {
        let url = url.trim();
        if url.is_empty() {
            return Err(BoardStateError::MissingParameter);
        }

        match self.try_proxy(url) {
            Ok(Some(payload)) => return Ok(payload),
            Ok(None) => {}
            Err(e) => log::warn!("Proxy fetch failed, falling back to server function: {}", e),
        }

        self.fetch_from_endpoint(url)
    }

    /// First tier. `Ok(None)` means the proxy was skipped or answered with
    /// a non-success status.
    fn try_proxy(&self, url: &str) -> Result<Option<DeckPayload>> {
        let Some(proxy) = self.cors_proxy.as_deref() else {
            return Ok(None);
        };
        let Ok(provider): Result<&dyn DeckProvider> = self.registry.resolve(url) else {
            return Ok(None);
        };
        let Ok(deck_id) = provider.deck_id(url) else {
            return Ok(None);
        };

        let api_url = provider.api_url(&deck_id);
        let proxy_url = format!("{}{}", proxy, urlencoding::encode(&api_url));
        log::debug!("Fetching {} through proxy {}", api_url, proxy);

        let resp = self.client()?.get(&proxy_url).send()?;
        if !resp.status().is_success() {
            log::debug!("Proxy answered {} for {}", resp.status(), api_url);
            return Ok(None);
        }

        let body: Value = resp.json()?;
        provider.normalize(&body).map(Some)
    }

    /// Second tier: `GET <endpoint>?url=<deck url>`.
    fn fetch_from_endpoint(&self, url: &str) -> Result<DeckPayload> {
        let endpoint = self
            .fallback_endpoint
            .as_deref()
            .ok_or(BoardStateError::LocalExecutionRestricted)?;

        let request_url = format!("{}?url={}", endpoint, urlencoding::encode(url));
        log::debug!("Fetching deck through endpoint {}", endpoint);

        let resp = self.client()?.get(&request_url).send()?;
        let status = resp.status();
        if !status.is_success() {
            let message = if status == reqwest::StatusCode::NOT_FOUND {
                "Fetch-deck function not found.".to_string()
            } else {
                resp.json::<Value>()
                    .ok()
                    .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                    .unwrap_or_else(|| format!("Server Error: {}", status.as_u16()))
            };
            return Err(BoardStateError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json::<DeckPayload>()?)
    }
}
