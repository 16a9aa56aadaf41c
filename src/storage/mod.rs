//! Persistence for high scores and preferences.
//!
//! Everything sits in one string-valued key/value store. Reads never fail:
//! missing or malformed values fall back to defaults. Writes that fail are
//! logged and the game carries on with what it has in memory.

pub mod kv;
pub mod prefs;
pub mod scores;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use prefs::{SKIN_KEY, load_skin, save_skin};
pub use scores::{MAX_ENTRIES, SCORES_KEY, ScoreEntry, ScoreStore, TopScores};
