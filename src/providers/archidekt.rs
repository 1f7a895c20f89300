//! Archidekt adapter.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{capture_id, trim_base, DeckProvider};
use crate::config;
use crate::error::Result;
use crate::models::{ArchidektDeck, DeckEntry, DeckPayload};

static DECK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"archidekt\.com/decks/(\d+)").unwrap());

/// Archidekt decks, served by `GET <api>/api/decks/<id>/`.
#[derive(Debug, Clone)]
pub struct Archidekt {
    api_base: String,
}

impl Default for Archidekt {
    fn default() -> Self {
        Self::with_api_base(config::ARCHIDEKT_API_BASE)
    }
}

impl Archidekt {
    /// Point the adapter at a different API host.
    pub fn with_api_base(base: &str) -> Self {
        Self {
            api_base: trim_base(base),
        }
    }
}

impl DeckProvider for Archidekt {
    fn name(&self) -> &'static str {
        "Archidekt"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("archidekt.com")
    }

    fn deck_id(&self, url: &str) -> Result<String> {
        capture_id(&DECK_ID, url, self.name())
    }

    fn api_url(&self, deck_id: &str) -> String {
        format!("{}/api/decks/{}/", self.api_base, deck_id)
    }

    fn referer(&self) -> &str {
        config::ARCHIDEKT_REFERER
    }

    /// Uses the oracle name, so user-renamed printings come out under their
    /// canonical card name.
    fn normalize(&self, body: &Value) -> Result<DeckPayload> {
        let deck: ArchidektDeck = serde_json::from_value(body.clone())?;

        let entries: Vec<DeckEntry> = deck
            .cards
            .iter()
            .flatten()
            .filter(|c| c.is_playable())
            .map(|c| DeckEntry::new(c.card.oracle_card.name.as_str(), c.quantity))
            .collect();

        Ok(DeckPayload::from_entries(
            deck.name.unwrap_or_default(),
            &entries,
        ))
    }
}
