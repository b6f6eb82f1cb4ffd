//! The obstacle simulation: pipe pairs, difficulty progression, spawning,
//! background layers, and the per-step orchestration tying them together.

pub mod background;
pub mod difficulty;
pub mod logic;
pub mod pipe;
pub mod spawner;

pub use background::{CloudVariant, LoopingLayer, Segment, SegmentKind, SpawningLayer};
pub use difficulty::{difficulty_for, Difficulty, DifficultyState, DifficultyTable, TierSettings};
pub use logic::{Level, LevelEvent, LevelPhase};
pub use pipe::{ObstaclePair, PipeId, PipePiece};
pub use spawner::{gap_center_range, sample_gap_center, PipeSpawner};
