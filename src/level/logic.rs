//! Level orchestration: pipe movement, pass detection, spawning and
//! background scrolling, advanced once per step while playing.

use super::background::{CloudVariant, LoopingLayer, SpawningLayer};
use super::difficulty::{Difficulty, DifficultyState};
use super::pipe::{ObstaclePair, PipeId};
use super::spawner::PipeSpawner;
use crate::audio::{AudioSink, SoundCue};
use crate::core::config::GameConfig;
use crate::physics::Aabb;
use rand::Rng;
use tracing::{debug, info};

/// Level phase, driven by flyer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPhase {
    WaitingToStart,
    Playing,
    BirdDead,
}

/// Observable changes, drained by the caller after each tick. A render
/// factory creates and destroys visuals from these.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelEvent {
    PipeSpawned {
        id: PipeId,
        x: f64,
        gap_center: f64,
        gap_size: f64,
    },
    PipeDestroyed {
        id: PipeId,
    },
    PipePassed {
        id: PipeId,
        total: u32,
    },
    DifficultyChanged {
        tier: Difficulty,
    },
    CloudSpawned {
        variant: CloudVariant,
    },
}

/// Owns every moving object and the score counters for one session.
#[derive(Debug, Clone)]
pub struct Level {
    config: GameConfig,
    phase: LevelPhase,
    pipes: Vec<ObstaclePair>,
    ground: LoopingLayer,
    clouds: SpawningLayer,
    spawner: PipeSpawner,
    difficulty: DifficultyState,
    pipes_passed: u32,
    events: Vec<LevelEvent>,
}

impl Level {
    /// Fresh level with the ground laid out and one cloud in the sky.
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let difficulty = DifficultyState::new(&config.difficulty);
        let mut clouds = SpawningLayer::clouds(&config.background);
        clouds.spawn_at(0.0, CloudVariant::random(rng));

        Self {
            config: *config,
            phase: LevelPhase::WaitingToStart,
            pipes: Vec::new(),
            ground: LoopingLayer::ground(&config.background, config.world.floor_y()),
            clouds,
            spawner: PipeSpawner::new(difficulty.spawn_interval_max()),
            difficulty,
            pipes_passed: 0,
            events: Vec::new(),
        }
    }

    pub fn on_started_playing(&mut self) {
        if self.phase == LevelPhase::WaitingToStart {
            self.phase = LevelPhase::Playing;
            info!("level started");
        }
    }

    /// Freeze the world. Further ticks do nothing.
    pub fn on_flyer_died(&mut self) {
        if self.phase != LevelPhase::BirdDead {
            self.phase = LevelPhase::BirdDead;
            info!(
                passed = self.pipes_passed,
                spawned = self.difficulty.pipes_spawned(),
                "level frozen"
            );
        }
    }

    /// Advance one step. Only runs while playing.
    pub fn tick<R: Rng, A: AudioSink>(&mut self, dt: f64, rng: &mut R, audio: &mut A) {
        if self.phase != LevelPhase::Playing {
            return;
        }
        self.handle_pipe_movement(dt, audio);
        self.handle_pipe_spawning(dt, rng);
        self.handle_background(dt, rng);
    }

    /// Move pairs, credit passes, then drop pairs past the destroy line.
    fn handle_pipe_movement<A: AudioSink>(&mut self, dt: f64, audio: &mut A) {
        let distance = self.config.world.pipe_move_speed * dt;
        let flyer_x = self.config.world.flyer_x;

        for pipe in &mut self.pipes {
            let was_right = pipe.is_right_of(flyer_x);
            pipe.advance(distance);
            let now_left = pipe.is_left_of_or_at(flyer_x);

            if was_right && now_left && pipe.scoring_piece().is_bottom && pipe.mark_passed() {
                self.pipes_passed += 1;
                self.events.push(LevelEvent::PipePassed {
                    id: pipe.id,
                    total: self.pipes_passed,
                });
                audio.play(SoundCue::Score);
                debug!(id = pipe.id, total = self.pipes_passed, "pipe passed");
            }
        }

        let destroy_x = self.config.world.pipe_destroy_x;
        let expired: Vec<PipeId> = self
            .pipes
            .iter()
            .filter(|p| p.is_past(destroy_x))
            .map(|p| p.id)
            .collect();
        if !expired.is_empty() {
            self.pipes.retain(|p| !p.is_past(destroy_x));
            self.events
                .extend(expired.into_iter().map(|id| LevelEvent::PipeDestroyed { id }));
        }
    }

    fn handle_pipe_spawning<R: Rng>(&mut self, dt: f64, rng: &mut R) {
        let spawned = self.spawner.tick(
            dt,
            &mut self.difficulty,
            &self.config.difficulty,
            &self.config.world,
            rng,
        );
        for s in spawned {
            self.events.push(LevelEvent::PipeSpawned {
                id: s.pair.id,
                x: s.pair.x(),
                gap_center: s.gap_center,
                gap_size: s.gap_size,
            });
            if let Some(tier) = s.escalated_to {
                self.events.push(LevelEvent::DifficultyChanged { tier });
            }
            self.pipes.push(s.pair);
        }
    }

    fn handle_background<R: Rng>(&mut self, dt: f64, rng: &mut R) {
        let speed = self.config.world.pipe_move_speed;
        self.ground.advance(speed, dt);
        let update = self.clouds.advance(speed, dt, rng);
        self.events.extend(
            update
                .spawned
                .into_iter()
                .map(|variant| LevelEvent::CloudSpawned { variant }),
        );
    }

    /// Body colliders of every active piece, tagged with their pair id.
    pub fn pipe_colliders(&self) -> impl Iterator<Item = (PipeId, Aabb)> + '_ {
        let world = &self.config.world;
        self.pipes.iter().flat_map(move |pair| {
            pair.pieces()
                .into_iter()
                .map(move |piece| (pair.id, pair.body_bounds(piece, world)))
        })
    }

    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn pipes(&self) -> &[ObstaclePair] {
        &self.pipes
    }

    /// Test and tooling hook: insert a pair directly.
    pub fn push_pipe(&mut self, pair: ObstaclePair) {
        self.pipes.push(pair);
    }

    pub fn ground(&self) -> &LoopingLayer {
        &self.ground
    }

    pub fn clouds(&self) -> &SpawningLayer {
        &self.clouds
    }

    pub fn difficulty(&self) -> &DifficultyState {
        &self.difficulty
    }

    pub fn pipes_passed_count(&self) -> u32 {
        self.pipes_passed
    }

    pub fn pipes_spawned(&self) -> u32 {
        self.difficulty.pipes_spawned()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueRecorder;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn playing_level() -> (Level, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut level = Level::new(&GameConfig::default(), &mut rng);
        level.on_started_playing();
        (level, rng)
    }

    fn pair_at(id: PipeId, x: f64) -> ObstaclePair {
        ObstaclePair::new(id, x, 50.0, 50.0, &GameConfig::default().world)
    }

    #[test]
    fn test_no_tick_while_waiting() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut level = Level::new(&GameConfig::default(), &mut rng);
        level.push_pipe(pair_at(100, 50.0));
        level.tick(1.0, &mut rng, &mut CueRecorder::new());
        assert!((level.pipes()[0].x() - 50.0).abs() < f64::EPSILON);
        assert_eq!(level.pipes_spawned(), 0);
    }

    #[test]
    fn test_pipes_move_left() {
        let (mut level, mut rng) = playing_level();
        level.push_pipe(pair_at(100, 50.0));
        level.tick(0.5, &mut rng, &mut CueRecorder::new());
        assert!((level.pipes()[0].x() - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pass_counted_once() {
        let (mut level, mut rng) = playing_level();
        let mut audio = CueRecorder::new();
        level.push_pipe(pair_at(100, 1.0));

        level.tick(0.05, &mut rng, &mut audio);
        assert_eq!(level.pipes_passed_count(), 1);
        assert!(level.pipes()[0].has_been_passed());

        for _ in 0..10 {
            level.tick(0.05, &mut rng, &mut audio);
        }
        assert_eq!(level.pipes_passed_count(), 1);
        assert_eq!(audio.count(SoundCue::Score), 1);
    }

    #[test]
    fn test_landing_exactly_on_flyer_counts() {
        let (mut level, mut rng) = playing_level();
        level.push_pipe(pair_at(100, 15.0));
        level.tick(0.5, &mut rng, &mut CueRecorder::new());
        assert_eq!(level.pipes_passed_count(), 1);
    }

    #[test]
    fn test_pipe_already_left_never_counts() {
        let (mut level, mut rng) = playing_level();
        level.push_pipe(pair_at(100, -1.0));
        level.tick(0.05, &mut rng, &mut CueRecorder::new());
        assert_eq!(level.pipes_passed_count(), 0);
    }

    #[test]
    fn test_expired_pipes_removed_without_skipping_neighbours() {
        let (mut level, mut rng) = playing_level();
        level.push_pipe(pair_at(1, -99.0));
        level.push_pipe(pair_at(2, -99.5));
        level.push_pipe(pair_at(3, 40.0));
        level.push_pipe(pair_at(4, 1.0));
        level.tick(0.1, &mut rng, &mut CueRecorder::new());

        let ids: Vec<PipeId> = level.pipes().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert!((level.pipes()[0].x() - 37.0).abs() < 1e-9);
        assert_eq!(level.pipes_passed_count(), 1);

        let destroyed: Vec<PipeId> = level
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                LevelEvent::PipeDestroyed { id } => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(destroyed, vec![1, 2]);
    }

    #[test]
    fn test_spawn_emits_event_at_spawn_x() {
        let (mut level, mut rng) = playing_level();
        level.tick(2.0, &mut rng, &mut CueRecorder::new());
        assert_eq!(level.pipes().len(), 1);
        let spawned = level
            .drain_events()
            .into_iter()
            .find_map(|e| match e {
                LevelEvent::PipeSpawned { x, .. } => Some(x),
                _ => None,
            });
        assert_eq!(spawned, Some(100.0));
    }

    #[test]
    fn test_just_spawned_pipe_not_pass_tested() {
        let mut config = GameConfig::default();
        // Spawn right on the flyer line; spawning happens after pass detection.
        config.world.pipe_spawn_x = 0.5;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut level = Level::new(&config, &mut rng);
        level.on_started_playing();
        level.tick(2.0, &mut rng, &mut CueRecorder::new());
        assert_eq!(level.pipes().len(), 1);
        assert_eq!(level.pipes_passed_count(), 0);

        level.tick(0.1, &mut rng, &mut CueRecorder::new());
        assert_eq!(level.pipes_passed_count(), 1);
    }

    #[test]
    fn test_frozen_after_death() {
        let (mut level, mut rng) = playing_level();
        level.push_pipe(pair_at(100, 50.0));
        level.on_flyer_died();
        level.tick(1.0, &mut rng, &mut CueRecorder::new());
        assert_eq!(level.phase(), LevelPhase::BirdDead);
        assert!((level.pipes()[0].x() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_colliders_cover_both_pieces() {
        let (mut level, _) = playing_level();
        level.push_pipe(pair_at(9, 0.0));
        let colliders: Vec<(PipeId, Aabb)> = level.pipe_colliders().collect();
        assert_eq!(colliders.len(), 2);
        assert!(colliders.iter().all(|(id, _)| *id == 9));
    }

    #[test]
    fn test_background_scrolls_while_playing() {
        let (mut level, mut rng) = playing_level();
        let ground_before = level.ground().segments()[1].x;
        let cloud_before = level.clouds().segments()[0].x;
        level.tick(1.0, &mut rng, &mut CueRecorder::new());
        assert!((level.ground().segments()[1].x - (ground_before - 30.0)).abs() < 1e-9);
        assert!(level.clouds().segments()[0].x < cloud_before);
        assert!(level.clouds().segments()[0].x > ground_before - 30.0 - 192.0);
    }
}
