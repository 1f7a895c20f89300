use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DeckEntry: One normalized decklist line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub name: String,
    pub quantity: u32,
}

impl DeckEntry {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

impl fmt::Display for DeckEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.name)
    }
}

// ---------------------------------------------------------------------------
// DeckPayload: Normalized import result (the `{name, list}` wire shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub list: String,
}

impl DeckPayload {
    /// Build a payload from entries in encounter order, one
    /// `"<qty> <name>\n"` line per entry.
    pub fn from_entries<'a, I>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = &'a DeckEntry>,
    {
        let mut list = String::new();
        for entry in entries {
            list.push_str(&entry.to_string());
            list.push('\n');
        }
        Self {
            name: name.into(),
            list,
        }
    }
}

// ---------------------------------------------------------------------------
// Moxfield: `GET /v2/decks/all/<id>`
// ---------------------------------------------------------------------------

/// Board maps are keyed by card name; `serde_json` is built with
/// `preserve_order` so iteration follows the provider's order. A board may
/// be absent or `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoxfieldDeck {
    pub name: Option<String>,
    #[serde(default)]
    pub mainboard: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub commanders: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoxfieldCard {
    #[serde(default)]
    pub quantity: u32,
}

// ---------------------------------------------------------------------------
// Archidekt: `GET /api/decks/<id>/`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ArchidektDeck {
    pub name: Option<String>,
    #[serde(default)]
    pub cards: Option<Vec<ArchidektCardEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchidektCardEntry {
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    pub card: ArchidektCard,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchidektCard {
    pub oracle_card: ArchidektOracleCard,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchidektOracleCard {
    pub name: String,
}

impl ArchidektCardEntry {
    /// Sideboard and Maybeboard are the only categories excluded from the
    /// playable list; Archidekt lets users name everything else freely.
    pub fn is_playable(&self) -> bool {
        let category = self
            .categories
            .as_ref()
            .and_then(|c| c.first())
            .map(String::as_str)
            .unwrap_or("");
        !matches!(category, "Sideboard" | "Maybeboard")
    }
}
