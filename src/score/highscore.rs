//! Compares a finished run against the persisted best.

use super::store::KeyValueStore;
use crate::core::constants::HIGHSCORE_KEY;
use crate::error::StoreError;
use tracing::{info, warn};

/// Outcome of a finished run, handed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighscoreReport {
    /// Pipes passed this run.
    pub score: u32,
    /// Best score after this run was considered.
    pub highscore: u32,
    pub is_new_highscore: bool,
}

/// Owns the preference store holding the high score.
#[derive(Debug)]
pub struct ScoreTracker<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ScoreTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persisted best, zero if never written. Negative values read as zero.
    pub fn get_highscore(&self) -> u32 {
        u32::try_from(self.store.get_int(HIGHSCORE_KEY).max(0)).unwrap_or(u32::MAX)
    }

    /// Store `score` if it beats the current best. Returns whether it did.
    ///
    /// The write is flushed before returning.
    pub fn try_set_new_highscore(&mut self, score: u32) -> Result<bool, StoreError> {
        if score <= self.get_highscore() {
            return Ok(false);
        }
        self.store.set_int(HIGHSCORE_KEY, i64::from(score));
        self.store.flush()?;
        info!(score, "new high score");
        Ok(true)
    }

    pub fn reset_highscore(&mut self) -> Result<(), StoreError> {
        self.store.set_int(HIGHSCORE_KEY, 0);
        self.store.flush()
    }

    /// Death hook: record the run and report the result. Store failures are
    /// logged and the in-memory comparison is still reported.
    pub fn on_died(&mut self, pipes_passed: u32) -> HighscoreReport {
        // Read before the write: a failed flush still leaves the new value in the store.
        let previous = self.get_highscore();
        let is_new_highscore = match self.try_set_new_highscore(pipes_passed) {
            Ok(is_new) => is_new,
            Err(e) => {
                warn!(error = %e, "could not persist high score");
                pipes_passed > previous
            }
        };
        HighscoreReport {
            score: pipes_passed,
            highscore: previous.max(pipes_passed),
            is_new_highscore,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
