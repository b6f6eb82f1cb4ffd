//! Flappy - side-scrolling obstacle-avoidance game library.
//!
//! This crate exposes the simulation core (flyer, level, physics, scoring)
//! for the terminal front end and for tests. The terminal UI lives in the
//! binary only.

pub mod audio;
pub mod core;
pub mod error;
pub mod flyer;
pub mod level;
pub mod physics;
pub mod score;
pub mod utils;

pub use crate::audio::{AudioSink, CueRecorder, NullAudio, SoundCue};
pub use crate::core::config::GameConfig;
pub use crate::core::constants::*;
pub use crate::core::session::{Session, SessionEvent};
pub use crate::error::{ConfigError, StoreError};
pub use crate::flyer::{Flyer, FlyerEvent, FlyerInput, FlyerPhase};
pub use crate::level::{Difficulty, Level, LevelEvent, LevelPhase, ObstaclePair};
pub use crate::score::{HighscoreReport, JsonFileStore, KeyValueStore, MemoryStore, ScoreTracker};
