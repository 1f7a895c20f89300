//! Magic: The Gathering board-state tracker.
//!
//! Records life, floating mana, commanders, zones, tokens and the opponent's
//! board, and renders them as a plain-text report (optionally followed by an
//! analysis request). Decklists can be pasted as text or imported from
//! Moxfield and Archidekt URLs, and are saved locally by name.
//!
//! # Quick start
//!
//! ```no_run
//! use mtg_board_state::{Action, BoardTracker, RenderOptions, Zone};
//!
//! let mut tracker = BoardTracker::builder().build().unwrap();
//!
//! tracker.import_deck("Burn", "4 Lightning Bolt\n20 Mountain").unwrap();
//! tracker.dispatch(Action::AddCard { zone: Zone::Hand, name: "Lightning Bolt".into() });
//! tracker.dispatch(Action::AddCard { zone: Zone::Lands, name: "Mountain".into() });
//!
//! println!("{}", tracker.render(&RenderOptions::default()));
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod completion;
pub mod config;
pub mod decklist;
pub mod error;
pub mod importer;
pub mod models;
pub mod providers;
pub mod render;
pub mod state;
pub mod storage;

#[cfg(feature = "async")]
pub use async_client::AsyncDeckImporter;
pub use completion::TabCycle;
pub use decklist::DeckSummary;
pub use error::{BoardStateError, Result};
pub use importer::DeckImporter;
pub use models::{Color, DeckEntry, DeckPayload, Zone};
pub use providers::{DeckProvider, ProviderRegistry};
pub use render::{render, RenderOptions};
pub use state::{Action, BoardState};
pub use storage::DeckStore;

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// BoardTrackerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`BoardTracker`].
///
/// Use [`BoardTracker::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](BoardTrackerBuilder::build).
pub struct BoardTrackerBuilder {
    storage_dir: Option<PathBuf>,
    timeout: Duration,
    cors_proxy: Option<String>,
    fallback_endpoint: Option<String>,
    registry: Option<ProviderRegistry>,
}

impl Default for BoardTrackerBuilder {
    fn default() -> Self {
        Self {
            storage_dir: None,
            timeout: config::DEFAULT_TIMEOUT,
            cors_proxy: Some(config::DEFAULT_CORS_PROXY.to_string()),
            fallback_endpoint: None,
            registry: None,
        }
    }
}

impl BoardTrackerBuilder {
    /// Set the directory for saved decks.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/mtg-board-state` on Linux).
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP timeout for deck imports. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the CORS proxy prefix for the first import attempt, or `None` to
    /// disable that tier.
    pub fn cors_proxy(mut self, proxy: Option<&str>) -> Self {
        self.cors_proxy = proxy.map(str::to_string);
        self
    }

    /// Set the fetch-deck endpoint for the second import attempt.
    ///
    /// Without one, a URL import whose proxy attempt fails reports
    /// [`BoardStateError::LocalExecutionRestricted`].
    pub fn fallback_endpoint(mut self, endpoint: Option<&str>) -> Self {
        self.fallback_endpoint = endpoint.map(str::to_string);
        self
    }

    /// Replace the provider set used by the importer.
    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the tracker, opening (or creating) the saved-deck store.
    pub fn build(self) -> Result<BoardTracker> {
        let store = DeckStore::new(self.storage_dir)?;
        let mut importer = DeckImporter::builder()
            .timeout(self.timeout)
            .cors_proxy(self.cors_proxy.as_deref())
            .fallback_endpoint(self.fallback_endpoint.as_deref());
        if let Some(registry) = self.registry {
            importer = importer.registry(registry);
        }
        Ok(BoardTracker {
            state: BoardState::default(),
            deck_cards: BTreeSet::new(),
            store,
            importer: importer.build(),
        })
    }
}

// ---------------------------------------------------------------------------
// ImportOutcome
// ---------------------------------------------------------------------------

/// Result of loading a deck into the tracker.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// Name the deck was saved under, if it was saved.
    pub saved_as: Option<String>,
    /// Whether the list came from a deck URL.
    pub fetched: bool,
    pub summary: DeckSummary,
}

impl ImportOutcome {
    /// Human-readable status line, e.g.
    /// `Saved as "Burn" - Imported 24 cards (2 Unique, 4x Lightning Bolt, 20x Mountain).`
    pub fn message(&self) -> String {
        let total = self.summary.total;
        let details = self.summary.details();
        match (&self.saved_as, self.fetched) {
            (Some(name), true) => format!(
                "Fetched & saved as \"{}\" - Imported {} cards ({}).",
                name, total, details
            ),
            (Some(name), false) => format!(
                "Saved as \"{}\" - Imported {} cards ({}).",
                name, total, details
            ),
            (None, true) => format!("Fetched {} cards ({}).", total, details),
            (None, false) => format!("Imported {} cards ({}).", total, details),
        }
    }
}

// ---------------------------------------------------------------------------
// BoardTracker
// ---------------------------------------------------------------------------

/// The main entry point: owns the board state, the loaded deck's card
/// names, the saved-deck store and the deck importer.
///
/// Created via [`BoardTracker::builder()`].
pub struct BoardTracker {
    state: BoardState,
    deck_cards: BTreeSet<String>,
    store: DeckStore,
    importer: DeckImporter,
}

impl BoardTracker {
    /// Create a new builder for configuring the tracker.
    pub fn builder() -> BoardTrackerBuilder {
        BoardTrackerBuilder::default()
    }

    // -- State -------------------------------------------------------------

    /// Current board snapshot.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Apply one state transition.
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch {:?}", action);
        self.state.apply(action);
    }

    /// Render the board report for the current state.
    pub fn render(&self, options: &RenderOptions) -> String {
        render::render(&self.state, options)
    }

    /// Reset the board, the loaded deck and its card names. Saved decks are
    /// kept.
    pub fn clear(&mut self) {
        self.deck_cards.clear();
        self.state.apply(Action::ClearAll);
    }

    // -- Decks -------------------------------------------------------------

    /// Load a deck from pasted text or a deck URL.
    ///
    /// URLs are fetched through the importer. The list is saved under `name`
    /// when given, otherwise under the fetched deck name (text lists without
    /// a name are loaded but not saved). Nothing changes when the fetch
    /// fails.
    pub fn import_deck(&mut self, name: &str, input: &str) -> Result<ImportOutcome> {
        let input = input.trim();
        if input.is_empty() {
            return Err(BoardStateError::MissingParameter);
        }

        let name = name.trim();
        let fetched = decklist::is_url(input);
        let (deck_name, list) = if fetched {
            let payload = self.importer.import(input)?;
            let deck_name = if name.is_empty() {
                payload.name.trim().to_string()
            } else {
                name.to_string()
            };
            (deck_name, payload.list)
        } else {
            (name.to_string(), input.to_string())
        };

        let saved_as = if deck_name.is_empty() {
            None
        } else {
            Some(self.store.save(&deck_name, &list)?)
        };

        let summary = self.load_list(saved_as.clone().unwrap_or(deck_name), list);
        Ok(ImportOutcome {
            saved_as,
            fetched,
            summary,
        })
    }

    /// Load a previously saved deck by name.
    pub fn load_saved(&mut self, name: &str) -> Result<DeckSummary> {
        let text = self
            .store
            .load(name)?
            .ok_or_else(|| BoardStateError::NotFound(format!("Saved deck \"{}\"", name)))?;
        Ok(self.load_list(name.to_string(), text))
    }

    /// Delete a saved deck. If it is the loaded deck, the deck fields are
    /// cleared too.
    pub fn delete_saved(&mut self, name: &str) -> Result<bool> {
        let deleted = self.store.delete(name)?;
        if deleted && self.state.deck_name == name {
            self.state.apply(Action::SetDecklist {
                name: String::new(),
                text: String::new(),
            });
        }
        Ok(deleted)
    }

    /// Names of all saved decks, sorted.
    pub fn saved_decks(&self) -> Result<Vec<String>> {
        self.store.names()
    }

    fn load_list(&mut self, name: String, text: String) -> DeckSummary {
        let summary = decklist::parse(&text);
        self.deck_cards = summary.card_names();
        self.state.apply(Action::SetDecklist { name, text });
        summary
    }

    // -- Completion --------------------------------------------------------

    /// Card names from the loaded deck.
    pub fn deck_cards(&self) -> &BTreeSet<String> {
        &self.deck_cards
    }

    /// Completions for a partially typed card name.
    pub fn suggest(&self, query: &str) -> Vec<String> {
        completion::suggest(query, &self.deck_cards)
    }

    // -- Components --------------------------------------------------------

    pub fn store(&self) -> &DeckStore {
        &self.store
    }

    pub fn importer(&self) -> &DeckImporter {
        &self.importer
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for BoardTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoardTracker(storage={}, deck={:?}, cards={}, providers=[{}])",
            self.store.path().display(),
            self.state.deck_name,
            self.state.total_cards(),
            self.importer.registry().names().join(", ")
        )
    }
}
