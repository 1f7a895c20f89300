//! Deck-hosting site adapters.
//!
//! Each provider knows how to recognize its own deck URLs, extract the deck
//! ID, build the API request and flatten the site-specific response into a
//! [`DeckPayload`]. The [`ProviderRegistry`] dispatches a URL to the first
//! provider that claims it.

pub mod archidekt;
pub mod moxfield;

pub use archidekt::Archidekt;
pub use moxfield::Moxfield;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, REFERER, USER_AGENT};
use serde_json::Value;

use crate::config;
use crate::error::{BoardStateError, Result};
use crate::models::DeckPayload;

// ---------------------------------------------------------------------------
// DeckProvider
// ---------------------------------------------------------------------------

/// A deck-hosting site whose decks can be fetched and normalized.
pub trait DeckProvider: Send + Sync {
    /// Display name used in error messages (e.g. `"Moxfield"`).
    fn name(&self) -> &'static str;

    /// Whether this provider handles the given deck URL.
    fn matches(&self, url: &str) -> bool;

    /// Extract the deck ID from a deck URL.
    fn deck_id(&self, url: &str) -> Result<String>;

    /// API endpoint for a deck ID.
    fn api_url(&self, deck_id: &str) -> String;

    /// `Referer` header sent with API requests.
    fn referer(&self) -> &str;

    /// Flatten a raw API response into a normalized payload.
    fn normalize(&self, body: &Value) -> Result<DeckPayload>;

    /// Attach the browser-like headers the deck sites require.
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(USER_AGENT, config::BROWSER_USER_AGENT)
            .header(REFERER, self.referer())
            .header(ACCEPT, "application/json")
    }

    /// Fetch a deck URL from the provider API and normalize the response.
    fn fetch(&self, client: &Client, url: &str) -> Result<DeckPayload> {
        let deck_id = self.deck_id(url)?;
        let api_url = self.api_url(&deck_id);
        log::debug!("Fetching {} deck {} from {}", self.name(), deck_id, api_url);

        let resp = self.decorate(client.get(&api_url)).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BoardStateError::Upstream {
                provider: self.name(),
                status: status.as_u16(),
            });
        }

        let body: Value = resp.json()?;
        self.normalize(&body)
    }
}

// ---------------------------------------------------------------------------
// ProviderRegistry
// ---------------------------------------------------------------------------

/// Ordered set of providers consulted by URL.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn DeckProvider>>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
            .with(Moxfield::default())
            .with(Archidekt::default())
    }
}

impl ProviderRegistry {
    /// An empty registry. Use [`ProviderRegistry::default`] for the built-in
    /// Moxfield and Archidekt adapters.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Register an additional provider.
    pub fn with<P: DeckProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Find the provider for a deck URL.
    pub fn resolve(&self, url: &str) -> Result<&dyn DeckProvider> {
        self.providers
            .iter()
            .find(|p| p.matches(url))
            .map(|p| p.as_ref())
            .ok_or_else(|| BoardStateError::UnsupportedProvider(url.to_string()))
    }

    /// Names of the registered providers, in dispatch order.
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

/// Capture group 1 of `re` in `url`, or an `InvalidUrlFormat` error.
pub(crate) fn capture_id(re: &regex::Regex, url: &str, provider: &'static str) -> Result<String> {
    re.captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(BoardStateError::InvalidUrlFormat { provider })
}

pub(crate) fn trim_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
