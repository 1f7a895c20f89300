//! Plain-text decklist parsing.
//!
//! Accepts the usual pasted formats (`4 Lightning Bolt`, `1x Sol Ring`,
//! `Counterspell`, `1 Arcane Signet (CMM) 378`). Parsing is lenient: a line
//! without a readable quantity counts as one copy.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

static CARD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\d+)[x\s]*)?([^(\n\r]+)").unwrap());

/// True when the input should be fetched rather than parsed.
pub fn is_url(text: &str) -> bool {
    let text = text.trim();
    text.starts_with("http://") || text.starts_with("https://")
}

/// Parse one decklist line into `(quantity, name)`.
///
/// Returns `None` for blank lines, `//` comments and `Sideboard` headers.
/// Anything from the first `(` onward is dropped.
pub fn parse_line(line: &str) -> Option<(u32, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") || line.to_lowercase().starts_with("sideboard") {
        return None;
    }

    let caps = CARD_LINE.captures(line)?;
    let quantity = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|&q| q > 0)
        .unwrap_or(1);
    let name = caps.get(2)?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    Some((quantity, name.to_string()))
}

/// Parse a full decklist.
pub fn parse(text: &str) -> DeckSummary {
    let mut summary = DeckSummary::default();
    for (quantity, name) in text.lines().filter_map(parse_line) {
        summary.add(name, quantity);
    }
    summary
}

// ---------------------------------------------------------------------------
// DeckSummary
// ---------------------------------------------------------------------------

/// Card totals for a parsed decklist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckSummary {
    /// Sum of all quantities, saturating at `u32::MAX`.
    pub total: u32,
    counts: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl DeckSummary {
    fn add(&mut self, name: String, quantity: u32) {
        self.total = self.total.saturating_add(quantity);
        match self.index.get(&name) {
            Some(&i) => self.counts[i].1 = self.counts[i].1.saturating_add(quantity),
            None => {
                self.index.insert(name.clone(), self.counts.len());
                self.counts.push((name, quantity));
            }
        }
    }

    /// Number of distinct card names.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// Per-name totals in first-seen order.
    pub fn counts(&self) -> &[(String, u32)] {
        &self.counts
    }

    /// Total copies of one card name.
    pub fn count_of(&self, name: &str) -> u32 {
        self.index.get(name).map(|&i| self.counts[i].1).unwrap_or(0)
    }

    /// Distinct card names, sorted, for completion.
    pub fn card_names(&self) -> BTreeSet<String> {
        self.counts.iter().map(|(name, _)| name.clone()).collect()
    }

    /// `"4x Lightning Bolt, 2x Island"` for every card with more than one copy.
    pub fn duplicates_summary(&self) -> String {
        self.counts
            .iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, count)| format!("{}x {}", count, name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `"<unique> Unique"` followed by the duplicates summary when present.
    pub fn details(&self) -> String {
        let duplicates = self.duplicates_summary();
        if duplicates.is_empty() {
            format!("{} Unique", self.unique())
        } else {
            format!("{} Unique, {}", self.unique(), duplicates)
        }
    }
}
