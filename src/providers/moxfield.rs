//! Moxfield adapter.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{capture_id, trim_base, DeckProvider};
use crate::config;
use crate::error::Result;
use crate::models::{DeckEntry, DeckPayload, MoxfieldCard, MoxfieldDeck};

static DECK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"moxfield\.com/decks/([a-zA-Z0-9\-_]+)").unwrap());

/// Moxfield decks, served by `GET <api>/v2/decks/all/<id>`.
#[derive(Debug, Clone)]
pub struct Moxfield {
    api_base: String,
}

impl Default for Moxfield {
    fn default() -> Self {
        Self::with_api_base(config::MOXFIELD_API_BASE)
    }
}

impl Moxfield {
    /// Point the adapter at a different API host.
    pub fn with_api_base(base: &str) -> Self {
        Self {
            api_base: trim_base(base),
        }
    }

    fn board_entries(board: Option<&serde_json::Map<String, Value>>) -> Result<Vec<DeckEntry>> {
        board
            .into_iter()
            .flatten()
            .map(|(name, details)| {
                let card: MoxfieldCard = serde_json::from_value(details.clone())?;
                Ok(DeckEntry::new(name.as_str(), card.quantity))
            })
            .collect()
    }
}

impl DeckProvider for Moxfield {
    fn name(&self) -> &'static str {
        "Moxfield"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("moxfield.com")
    }

    fn deck_id(&self, url: &str) -> Result<String> {
        capture_id(&DECK_ID, url, self.name())
    }

    fn api_url(&self, deck_id: &str) -> String {
        format!("{}/v2/decks/all/{}", self.api_base, deck_id)
    }

    fn referer(&self) -> &str {
        config::MOXFIELD_REFERER
    }

    /// Mainboard entries followed by commanders. A card present in both
    /// boards yields two lines.
    fn normalize(&self, body: &Value) -> Result<DeckPayload> {
        let deck: MoxfieldDeck = serde_json::from_value(body.clone())?;

        let mut entries = Self::board_entries(deck.mainboard.as_ref())?;
        entries.extend(Self::board_entries(deck.commanders.as_ref())?);

        Ok(DeckPayload::from_entries(
            deck.name.unwrap_or_default(),
            &entries,
        ))
    }
}
