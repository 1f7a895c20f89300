//! Card-name completion over the loaded deck.

/// Candidates starting with `query` (case-insensitive), sorted.
///
/// An empty query suggests nothing.
pub fn suggest<'a, I>(query: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let query = query.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let mut matches: Vec<String> = candidates
        .into_iter()
        .filter(|c| c.to_lowercase().starts_with(&query))
        .cloned()
        .collect();
    matches.sort();
    matches
}

/// Tab-key cycling through completions for one input.
///
/// The first [`next`](TabCycle::next) captures the matches for the typed
/// query; later calls step through them, wrapping around. Typing resets
/// the cycle.
#[derive(Debug, Clone, Default)]
pub struct TabCycle {
    matches: Vec<String>,
    index: usize,
}

impl TabCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next completion, or `None` when the query has no matches (the key
    /// press should then fall through to normal focus movement).
    pub fn next<'a, I>(&mut self, query: &str, candidates: I) -> Option<&str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        if self.matches.is_empty() {
            self.matches = suggest(query, candidates);
            self.index = 0;
        } else {
            self.index = (self.index + 1) % self.matches.len();
        }
        self.matches.get(self.index).map(String::as_str)
    }

    /// Forget the current cycle.
    pub fn reset(&mut self) {
        self.matches.clear();
        self.index = 0;
    }

    pub fn is_active(&self) -> bool {
        !self.matches.is_empty()
    }
}
