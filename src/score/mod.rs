//! High score tracking over a persisted key-value store.

pub mod highscore;
pub mod store;

pub use highscore::{HighscoreReport, ScoreTracker};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
