//! Board state and its reducer.
//!
//! All mutation goes through [`Action`]s applied by [`BoardState::apply`].
//! Actions that reference a missing row, entry or token leave the state
//! unchanged.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{Color, CommanderRow, ManaPool, Token, Zone, ZoneCardEntry};

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetLife(i64),
    SetMana(Color, u32),

    AddCommander,
    RemoveCommander(usize),
    SetCommanderName(usize, String),
    SetCommanderInPlay(usize, bool),
    SetCommanderTax(usize, u32),

    AddCard { zone: Zone, name: String },
    RemoveCard { zone: Zone, index: usize },
    /// Only applies to basic-land entries; a count of 0 removes the entry.
    SetCardCount { zone: Zone, index: usize, count: u32 },
    /// Moves a single unit of the entry at `index`.
    MoveCard { from: Zone, index: usize, to: Zone },
    ResetZones,

    AddToken { name: String, count: u32 },
    SetTokenCount { index: usize, count: u32 },
    RemoveToken(usize),

    SetOpponentBoard(String),
    SetDecklist { name: String, text: String },
    ClearAll,
}

// ---------------------------------------------------------------------------
// BoardState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub deck_name: String,
    pub decklist: String,
    pub life: i64,
    commanders: Vec<CommanderRow>,
    pub mana: ManaPool,
    zones: [Vec<ZoneCardEntry>; 6],
    tokens: Vec<Token>,
    pub opponent_board: String,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            deck_name: String::new(),
            decklist: String::new(),
            life: config::DEFAULT_LIFE,
            commanders: vec![CommanderRow::default()],
            mana: ManaPool::default(),
            zones: Default::default(),
            tokens: Vec::new(),
            opponent_board: String::new(),
        }
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Accessors ---------------------------------------------------------

    /// Commander rows; never empty.
    pub fn commanders(&self) -> &[CommanderRow] {
        &self.commanders
    }

    pub fn zone(&self, zone: Zone) -> &[ZoneCardEntry] {
        &self.zones[zone.index()]
    }

    /// Sum of entry counts in a zone, saturating at `u32::MAX`.
    pub fn zone_count(&self, zone: Zone) -> u32 {
        self.zone(zone)
            .iter()
            .fold(0u32, |acc, e| acc.saturating_add(e.count))
    }

    /// Sum of entry counts across every zone, saturating at `u32::MAX`.
    pub fn total_cards(&self) -> u32 {
        Zone::ALL
            .iter()
            .fold(0u32, |acc, &z| acc.saturating_add(self.zone_count(z)))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    // -- Reducer -----------------------------------------------------------

    /// By-value transition: `state × action → state'`.
    pub fn reduce(mut self, action: Action) -> Self {
        self.apply(action);
        self
    }

    /// Apply one action in place.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetLife(life) => self.life = life,
            Action::SetMana(color, amount) => self.mana.set(color, amount),

            Action::AddCommander => self.commanders.push(CommanderRow::default()),
            Action::RemoveCommander(index) => {
                // The first row is permanent.
                if index > 0 && index < self.commanders.len() {
                    self.commanders.remove(index);
                }
            }
            Action::SetCommanderName(index, name) => {
                if let Some(row) = self.commanders.get_mut(index) {
                    row.name = name;
                }
            }
            Action::SetCommanderInPlay(index, in_play) => {
                if let Some(row) = self.commanders.get_mut(index) {
                    row.in_play = in_play;
                }
            }
            Action::SetCommanderTax(index, tax) => {
                if let Some(row) = self.commanders.get_mut(index) {
                    row.tax = tax;
                }
            }

            Action::AddCard { zone, name } => {
                if !name.trim().is_empty() {
                    self.insert_unit(zone, &name);
                }
            }
            Action::RemoveCard { zone, index } => {
                let cards = &mut self.zones[zone.index()];
                if index < cards.len() {
                    cards.remove(index);
                }
            }
            Action::SetCardCount { zone, index, count } => self.set_count(zone, index, count),
            Action::MoveCard { from, index, to } => self.move_unit(from, index, to),
            Action::ResetZones => {
                for cards in self.zones.iter_mut() {
                    cards.clear();
                }
            }

            Action::AddToken { name, count } => {
                let name = name.trim();
                if !name.is_empty() {
                    self.tokens.push(Token {
                        name: name.to_string(),
                        count,
                    });
                }
            }
            Action::SetTokenCount { index, count } => {
                if let Some(token) = self.tokens.get_mut(index) {
                    token.count = count;
                }
            }
            Action::RemoveToken(index) => {
                if index < self.tokens.len() {
                    self.tokens.remove(index);
                }
            }

            Action::SetOpponentBoard(text) => self.opponent_board = text,
            Action::SetDecklist { name, text } => {
                self.deck_name = name;
                self.decklist = text;
            }
            Action::ClearAll => *self = Self::default(),
        }
    }

    /// Add one card to a zone. Basic lands join an existing entry of the
    /// same basic; everything else becomes its own entry.
    fn insert_unit(&mut self, zone: Zone, name: &str) {
        let unit = ZoneCardEntry::single(name);
        let cards = &mut self.zones[zone.index()];
        if unit.is_basic_land {
            if let Some(existing) = cards
                .iter_mut()
                .find(|e| e.is_basic_land && e.name == unit.name)
            {
                existing.count = existing.count.saturating_add(1);
                return;
            }
        }
        cards.push(unit);
    }

    fn set_count(&mut self, zone: Zone, index: usize, count: u32) {
        let cards = &mut self.zones[zone.index()];
        let Some(entry) = cards.get_mut(index) else {
            return;
        };
        if !entry.is_basic_land {
            return;
        }
        if count > 0 {
            entry.count = count;
        } else {
            cards.remove(index);
        }
    }

    fn move_unit(&mut self, from: Zone, index: usize, to: Zone) {
        if from == to {
            return;
        }
        let source = &mut self.zones[from.index()];
        let Some(entry) = source.get_mut(index) else {
            return;
        };

        let name = entry.name.clone();
        if entry.count > 1 {
            entry.count -= 1;
        } else {
            source.remove(index);
        }
        self.insert_unit(to, &name);
    }
}
