use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Hand,
    Lands,
    Battlefield,
    Graveyard,
    Exile,
    Stack,
}

impl Zone {
    /// Every zone, in storage order.
    pub const ALL: [Zone; 6] = [
        Zone::Hand,
        Zone::Lands,
        Zone::Battlefield,
        Zone::Graveyard,
        Zone::Exile,
        Zone::Stack,
    ];

    /// Zones in the order the board report lists them.
    pub const REPORT_ORDER: [Zone; 6] = [
        Zone::Hand,
        Zone::Battlefield,
        Zone::Lands,
        Zone::Graveyard,
        Zone::Exile,
        Zone::Stack,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Zone::Hand => "Hand",
            Zone::Lands => "Lands",
            Zone::Battlefield => "Battlefield",
            Zone::Graveyard => "Graveyard",
            Zone::Exile => "Exile",
            Zone::Stack => "Stack",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Zone::Hand => 0,
            Zone::Lands => 1,
            Zone::Battlefield => 2,
            Zone::Graveyard => 3,
            Zone::Exile => 4,
            Zone::Stack => 5,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ---------------------------------------------------------------------------
// Basic lands
// ---------------------------------------------------------------------------

const BASIC_LANDS: [&str; 11] = [
    "Plains",
    "Island",
    "Swamp",
    "Mountain",
    "Forest",
    "Wastes",
    "Snow-Covered Plains",
    "Snow-Covered Island",
    "Snow-Covered Swamp",
    "Snow-Covered Mountain",
    "Snow-Covered Forest",
];

/// Return the canonical spelling of a basic land name, matched
/// case-insensitively, or `None` for any other card.
pub fn canonical_basic_land(name: &str) -> Option<&'static str> {
    let name = name.trim();
    BASIC_LANDS
        .iter()
        .copied()
        .find(|basic| basic.eq_ignore_ascii_case(name))
}

// ---------------------------------------------------------------------------
// ZoneCardEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneCardEntry {
    pub name: String,
    pub count: u32,
    pub is_basic_land: bool,
}

impl ZoneCardEntry {
    /// A single card. Basic land names are canonicalized so later additions
    /// of the same basic coalesce into this entry.
    pub fn single(name: &str) -> Self {
        match canonical_basic_land(name) {
            Some(basic) => Self {
                name: basic.to_string(),
                count: 1,
                is_basic_land: true,
            },
            None => Self {
                name: name.trim().to_string(),
                count: 1,
                is_basic_land: false,
            },
        }
    }

    /// Report line: `- <name>` or `- <count>x <name>`.
    pub fn report_line(&self) -> String {
        if self.count == 1 {
            format!("- {}", self.name)
        } else {
            format!("- {}x {}", self.count, self.name)
        }
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    pub count: u32,
}

// ---------------------------------------------------------------------------
// CommanderRow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommanderRow {
    pub name: String,
    pub in_play: bool,
    /// Commander tax grows in steps of 2 per recast.
    pub tax: u32,
}

impl CommanderRow {
    pub fn location(&self) -> &'static str {
        if self.in_play {
            "In Play"
        } else {
            "Command Zone"
        }
    }
}

// ---------------------------------------------------------------------------
// Color / ManaPool
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    W,
    U,
    B,
    R,
    G,
    C,
}

impl Color {
    pub const ALL: [Color; 6] = [Color::W, Color::U, Color::B, Color::R, Color::G, Color::C];

    pub fn letter(self) -> char {
        match self {
            Color::W => 'W',
            Color::U => 'U',
            Color::B => 'B',
            Color::R => 'R',
            Color::G => 'G',
            Color::C => 'C',
        }
    }

    fn index(self) -> usize {
        match self {
            Color::W => 0,
            Color::U => 1,
            Color::B => 2,
            Color::R => 3,
            Color::G => 4,
            Color::C => 5,
        }
    }
}

/// Floating mana, one amount per color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPool {
    amounts: [u32; 6],
}

impl ManaPool {
    pub fn get(&self, color: Color) -> u32 {
        self.amounts[color.index()]
    }

    pub fn set(&mut self, color: Color, amount: u32) {
        self.amounts[color.index()] = amount;
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.iter().all(|&a| a == 0)
    }

    /// Colors with a positive amount, in `W U B R G C` order.
    pub fn floating(&self) -> impl Iterator<Item = (Color, u32)> + '_ {
        Color::ALL
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|&(_, amount)| amount > 0)
    }
}
