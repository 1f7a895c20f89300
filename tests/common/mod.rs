//! Shared test fixtures for the board-state integration tests.
//!
//! Provides sample Moxfield/Archidekt API responses, a tracker backed by a
//! temporary store directory, and logger setup.

#![allow(dead_code)]

use mtg_board_state::{BoardTracker, ProviderRegistry};
use mtg_board_state::providers::{Archidekt, Moxfield};
use serde_json::Value;
use std::time::Duration;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Moxfield `GET /v2/decks/all/<id>` response. Sol Ring appears in both
/// boards on purpose.
pub fn moxfield_deck() -> Value {
    serde_json::json!({
        "id": "gFV123abc",
        "name": "Atraxa Superfriends",
        "format": "commander",
        "mainboard": {
            "Sol Ring": { "quantity": 1, "boardType": "mainboard", "card": { "name": "Sol Ring" } },
            "Island": { "quantity": 12, "boardType": "mainboard", "card": { "name": "Island" } },
            "Doubling Season": { "quantity": 1, "boardType": "mainboard", "card": { "name": "Doubling Season" } },
            "Forest": { "quantity": 10, "boardType": "mainboard", "card": { "name": "Forest" } }
        },
        "sideboard": {
            "Pithing Needle": { "quantity": 1 }
        },
        "commanders": {
            "Atraxa, Praetors' Voice": { "quantity": 1, "boardType": "commanders" },
            "Sol Ring": { "quantity": 1, "boardType": "commanders" }
        }
    })
}

/// Archidekt `GET /api/decks/<id>/` response.
pub fn archidekt_deck() -> Value {
    serde_json::json!({
        "id": 123456,
        "name": "Krenko Goblins",
        "cards": [
            {
                "quantity": 1,
                "categories": ["Commander"],
                "card": { "oracleCard": { "name": "Krenko, Mob Boss" }, "displayName": null }
            },
            {
                "quantity": 4,
                "categories": ["Sideboard"],
                "card": { "oracleCard": { "name": "Pyroblast" } }
            },
            {
                "quantity": 30,
                "categories": ["Land", "Mainboard"],
                "card": { "oracleCard": { "name": "Mountain" } }
            },
            {
                "quantity": 2,
                "categories": ["Maybeboard"],
                "card": { "oracleCard": { "name": "Goblin Lackey" } }
            },
            {
                "quantity": 1,
                "categories": [],
                "card": { "oracleCard": { "name": "Skirk Prospector" }, "displayName": "Prospy" }
            },
            {
                "quantity": 1,
                "categories": ["Ramp", "Sideboard"],
                "card": { "oracleCard": { "name": "Sol Ring" } }
            }
        ]
    })
}

/// Providers pointed at a stub server.
pub fn stub_registry(base: &str) -> ProviderRegistry {
    ProviderRegistry::new()
        .with(Moxfield::with_api_base(base))
        .with(Archidekt::with_api_base(base))
}

/// A tracker whose store lives in a temp dir. Keep the `TempDir` alive for
/// the duration of the test.
pub fn setup_tracker() -> (BoardTracker, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let tracker = BoardTracker::builder()
        .storage_dir(tmp_dir.path())
        .cors_proxy(None)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    (tracker, tmp_dir)
}
