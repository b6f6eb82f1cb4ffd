//! Timer-driven obstacle generation.

use super::difficulty::{Difficulty, DifficultyState, DifficultyTable};
use super::pipe::{ObstaclePair, PipeId};
use crate::core::config::WorldConfig;
use rand::Rng;
use tracing::{debug, info};

/// Valid range for the gap centre, measured up from the floor.
///
/// When the gap plus margins do not fit in the span the range collapses to
/// the span midpoint instead of inverting.
pub fn gap_center_range(gap_size: f64, edge_margin: f64, total_span: f64) -> (f64, f64) {
    let min = gap_size * 0.5 + edge_margin;
    let max = total_span - gap_size * 0.5 - edge_margin;
    if min > max {
        let mid = total_span * 0.5;
        (mid, mid)
    } else {
        (min, max)
    }
}

/// Uniformly sample a gap centre within [`gap_center_range`].
pub fn sample_gap_center<R: Rng>(
    rng: &mut R,
    gap_size: f64,
    edge_margin: f64,
    total_span: f64,
) -> f64 {
    let (min, max) = gap_center_range(gap_size, edge_margin, total_span);
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

/// A pair produced by one spawn, plus the tier it escalated to, if any.
#[derive(Debug, Clone)]
pub struct Spawned {
    pub pair: ObstaclePair,
    pub gap_center: f64,
    pub gap_size: f64,
    pub escalated_to: Option<Difficulty>,
}

/// Countdown spawner. Overshoot carries into the next interval.
#[derive(Debug, Clone)]
pub struct PipeSpawner {
    timer: f64,
    next_id: PipeId,
}

impl PipeSpawner {
    /// Seed the countdown with the first spawn interval.
    pub fn new(interval: f64) -> Self {
        Self {
            timer: interval,
            next_id: 0,
        }
    }

    /// Seconds until the next spawn.
    pub fn timer(&self) -> f64 {
        self.timer
    }

    /// Advance the countdown by `dt`, spawning once per interval crossed.
    ///
    /// The interval added back is the one in force when the timer expired;
    /// difficulty is re-derived after each spawn.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f64,
        difficulty: &mut DifficultyState,
        table: &DifficultyTable,
        world: &WorldConfig,
        rng: &mut R,
    ) -> Vec<Spawned> {
        let mut spawned = Vec::new();
        self.timer -= dt;
        // Reaching exactly zero counts as expired.
        while self.timer <= 0.0 {
            self.timer += difficulty.spawn_interval_max();
            spawned.push(self.spawn(difficulty, table, world, rng));
        }
        spawned
    }

    fn spawn<R: Rng>(
        &mut self,
        difficulty: &mut DifficultyState,
        table: &DifficultyTable,
        world: &WorldConfig,
        rng: &mut R,
    ) -> Spawned {
        let gap_size = difficulty.gap_size();
        let gap_center = sample_gap_center(
            rng,
            gap_size,
            world.gap_edge_margin,
            world.vertical_span,
        );

        let id = self.next_id;
        self.next_id += 1;
        let pair = ObstaclePair::new(id, world.pipe_spawn_x, gap_center, gap_size, world);
        debug!(id, gap_center, gap_size, "spawned pipe pair");

        let escalated_to = difficulty.record_spawn(table);
        if let Some(tier) = escalated_to {
            info!(tier = tier.name(), spawned = difficulty.pipes_spawned(), "difficulty increased");
        }

        Spawned {
            pair,
            gap_center,
            gap_size,
            escalated_to,
        }
    }
}
