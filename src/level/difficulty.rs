//! Difficulty tiers and the progression state driven by pipes spawned.

use crate::core::constants::{HARD_THRESHOLD, IMPOSSIBLE_THRESHOLD, MEDIUM_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Named difficulty bucket, selected by cumulative spawn count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impossible,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Impossible => "Impossible",
        }
    }

    /// Tier for the given number of pipes spawned so far.
    pub fn for_pipes_spawned(pipes_spawned: u32) -> Self {
        if pipes_spawned >= IMPOSSIBLE_THRESHOLD {
            Self::Impossible
        } else if pipes_spawned >= HARD_THRESHOLD {
            Self::Hard
        } else if pipes_spawned >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Easy
        }
    }
}

/// Gap size and spawn cadence for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierSettings {
    /// Vertical clearance between the top and bottom pieces.
    pub gap_size: f64,
    /// Seconds between spawns.
    pub spawn_interval_max: f64,
}

impl TierSettings {
    pub const fn new(gap_size: f64, spawn_interval_max: f64) -> Self {
        Self {
            gap_size,
            spawn_interval_max,
        }
    }
}

/// Per-tier settings, overridable from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub easy: TierSettings,
    pub medium: TierSettings,
    pub hard: TierSettings,
    pub impossible: TierSettings,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: TierSettings::new(50.0, 2.0),
            medium: TierSettings::new(30.0, 1.9),
            hard: TierSettings::new(25.0, 1.8),
            impossible: TierSettings::new(20.0, 1.5),
        }
    }
}

impl DifficultyTable {
    pub fn settings(&self, tier: Difficulty) -> TierSettings {
        match tier {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Impossible => self.impossible,
        }
    }

    pub fn difficulty_for(&self, pipes_spawned: u32) -> TierSettings {
        self.settings(Difficulty::for_pipes_spawned(pipes_spawned))
    }

    /// True when each harder tier has a gap and interval no larger than the
    /// tier before it, and every value is positive.
    pub fn is_monotonic(&self) -> bool {
        let tiers = Difficulty::ALL.map(|t| self.settings(t));
        tiers
            .iter()
            .all(|s| s.gap_size > 0.0 && s.spawn_interval_max > 0.0)
            && tiers.windows(2).all(|w| {
                w[1].gap_size <= w[0].gap_size && w[1].spawn_interval_max <= w[0].spawn_interval_max
            })
    }
}

/// Difficulty lookup against the default tier table.
pub fn difficulty_for(pipes_spawned: u32) -> TierSettings {
    DifficultyTable::default().difficulty_for(pipes_spawned)
}

/// Running difficulty for one session. Only ever escalates.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyState {
    tier: Difficulty,
    settings: TierSettings,
    pipes_spawned: u32,
}

impl DifficultyState {
    pub fn new(table: &DifficultyTable) -> Self {
        Self {
            tier: Difficulty::Easy,
            settings: table.settings(Difficulty::Easy),
            pipes_spawned: 0,
        }
    }

    /// Count one spawn and re-derive the tier. Returns the new tier when it changed.
    pub fn record_spawn(&mut self, table: &DifficultyTable) -> Option<Difficulty> {
        self.pipes_spawned = self.pipes_spawned.saturating_add(1);
        let tier = Difficulty::for_pipes_spawned(self.pipes_spawned).max(self.tier);
        if tier == self.tier {
            return None;
        }
        self.tier = tier;
        self.settings = table.settings(tier);
        Some(tier)
    }

    pub fn tier(&self) -> Difficulty {
        self.tier
    }

    pub fn gap_size(&self) -> f64 {
        self.settings.gap_size
    }

    pub fn spawn_interval_max(&self) -> f64 {
        self.settings.spawn_interval_max
    }

    pub fn pipes_spawned(&self) -> u32 {
        self.pipes_spawned
    }
}
