use std::path::PathBuf;
use std::time::Duration;

pub const MOXFIELD_API_BASE: &str = "https://api.moxfield.com";
pub const MOXFIELD_REFERER: &str = "https://www.moxfield.com/";
pub const ARCHIDEKT_API_BASE: &str = "https://archidekt.com";
pub const ARCHIDEKT_REFERER: &str = "https://archidekt.com/";

/// Both deck sites block non-browser clients, so requests go out with a
/// desktop Chrome User-Agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_CORS_PROXY: &str = "https://corsproxy.io/?";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const STORAGE_KEY_PREFIX: &str = "mtg_deck_";
pub const STORE_FILE_NAME: &str = "saved_decks.json";

pub const DEFAULT_LIFE: i64 = 40;

pub fn default_storage_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("mtg-board-state")
    } else {
        PathBuf::from(".mtg-board-state")
    }
}
