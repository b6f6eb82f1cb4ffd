//! The per-session owner of flyer, level, physics and score tracking.
//!
//! Flyer events are drained once per step and fanned out to the level and
//! the score tracker here, so no component needs to look another up.

use super::config::GameConfig;
use crate::audio::{AudioSink, SoundCue};
use crate::flyer::{self, Flyer, FlyerEvent, FlyerInput};
use crate::level::{Difficulty, Level, LevelEvent};
use crate::physics::PhysicsWorld;
use crate::score::{HighscoreReport, KeyValueStore, ScoreTracker};
use rand::Rng;
use tracing::debug;

/// What happened during a step, for UI and scene collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    StartedPlaying,
    PipePassed { total: u32 },
    DifficultyChanged { tier: Difficulty },
    Died { report: HighscoreReport },
}

/// One play session plus the score tracker that outlives it.
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    config: GameConfig,
    flyer: Flyer,
    level: Level,
    physics: PhysicsWorld,
    score: ScoreTracker<S>,
    accumulator: f64,
    jump_queued: bool,
    last_report: Option<HighscoreReport>,
    level_events: Vec<LevelEvent>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new<R: Rng>(config: GameConfig, store: S, rng: &mut R) -> Self {
        Self {
            flyer: Flyer::new(&config.world, &config.flyer),
            level: Level::new(&config, rng),
            physics: PhysicsWorld::new(&config.world, &config.flyer),
            score: ScoreTracker::new(store),
            config,
            accumulator: 0.0,
            jump_queued: false,
            last_report: None,
            level_events: Vec::new(),
        }
    }

    /// Start over with a fresh flyer and level. The high score is kept.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.flyer = Flyer::new(&self.config.world, &self.config.flyer);
        self.level = Level::new(&self.config, rng);
        self.physics = PhysicsWorld::new(&self.config.world, &self.config.flyer);
        self.accumulator = 0.0;
        self.jump_queued = false;
        self.last_report = None;
        self.level_events.clear();
        debug!("session reset");
    }

    /// Run one fixed step of `dt` seconds.
    pub fn step<R: Rng, A: AudioSink>(
        &mut self,
        dt: f64,
        input: FlyerInput,
        rng: &mut R,
        audio: &mut A,
    ) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        flyer::process_input(&mut self.flyer, input, audio);
        self.dispatch_flyer_events(audio, &mut events);

        self.level.tick(dt, rng, audio);
        for event in self.level.drain_events() {
            match event {
                LevelEvent::PipePassed { total, .. } => {
                    events.push(SessionEvent::PipePassed { total })
                }
                LevelEvent::DifficultyChanged { tier } => {
                    events.push(SessionEvent::DifficultyChanged { tier })
                }
                _ => {}
            }
            self.level_events.push(event);
        }

        if !self.flyer.is_dead() {
            self.physics.integrate(&mut self.flyer.body, dt);
            if self.flyer.body.is_dynamic() {
                let contact = self
                    .physics
                    .trigger_enter(&self.flyer.body, self.level.pipe_colliders());
                if let Some(contact) = contact {
                    debug!(?contact, "flyer collision");
                    flyer::on_collision_trigger(&mut self.flyer);
                }
            }
        }
        self.dispatch_flyer_events(audio, &mut events);

        events
    }

    /// Feed a variable frame delta through fixed steps.
    ///
    /// The delta is clamped so a stall does not fast-forward the world; a
    /// jump is held until the next step runs.
    pub fn advance<R: Rng, A: AudioSink>(
        &mut self,
        frame_dt: f64,
        jump: bool,
        rng: &mut R,
        audio: &mut A,
    ) -> Vec<SessionEvent> {
        self.jump_queued |= jump;
        self.accumulator += frame_dt.clamp(0.0, self.config.session.max_frame_seconds);

        let step = self.config.session.step_seconds;
        let mut events = Vec::new();
        while self.accumulator >= step {
            self.accumulator -= step;
            let input = FlyerInput::from(std::mem::take(&mut self.jump_queued));
            events.extend(self.step(step, input, rng, audio));
        }
        events
    }

    fn dispatch_flyer_events<A: AudioSink>(&mut self, audio: &mut A, out: &mut Vec<SessionEvent>) {
        for event in self.flyer.drain_events() {
            match event {
                FlyerEvent::StartedPlaying => {
                    self.level.on_started_playing();
                    out.push(SessionEvent::StartedPlaying);
                }
                FlyerEvent::Died => {
                    self.level.on_flyer_died();
                    audio.play(SoundCue::Lose);
                    let report = self.score.on_died(self.level.pipes_passed_count());
                    self.last_report = Some(report);
                    out.push(SessionEvent::Died { report });
                }
            }
        }
    }

    /// Level events since the last call, for render factories.
    pub fn drain_level_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.level_events)
    }

    pub fn flyer(&self) -> &Flyer {
        &self.flyer
    }

    /// Mutable flyer access for tools and tests that place it directly.
    pub fn flyer_mut(&mut self) -> &mut Flyer {
        &mut self.flyer
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn score(&self) -> &ScoreTracker<S> {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut ScoreTracker<S> {
        &mut self.score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Result of the last finished run in this session, if any.
    pub fn last_report(&self) -> Option<HighscoreReport> {
        self.last_report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueRecorder;
    use crate::flyer::FlyerPhase;
    use crate::level::ObstaclePair;
    use crate::score::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn new_session() -> (Session<MemoryStore>, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let session = Session::new(GameConfig::default(), MemoryStore::new(), &mut rng);
        (session, rng)
    }

    #[test]
    fn test_jump_starts_session() {
        let (mut session, mut rng) = new_session();
        let events = session.step(0.01, FlyerInput::Jump, &mut rng, &mut CueRecorder::new());
        assert_eq!(events, vec![SessionEvent::StartedPlaying]);
        assert_eq!(session.flyer().phase, FlyerPhase::Playing);
        assert_eq!(session.level().phase(), crate::level::LevelPhase::Playing);
    }

    #[test]
    fn test_waiting_flyer_does_not_fall() {
        let (mut session, mut rng) = new_session();
        for _ in 0..100 {
            session.step(0.05, FlyerInput::None, &mut rng, &mut CueRecorder::new());
        }
        assert_eq!(session.flyer().position().y, 0.0);
        assert_eq!(session.flyer().phase, FlyerPhase::WaitingToStart);
    }

    #[test]
    fn test_falling_to_floor_ends_run() {
        let (mut session, mut rng) = new_session();
        let mut audio = CueRecorder::new();
        session.step(0.01, FlyerInput::Jump, &mut rng, &mut audio);

        let mut died = Vec::new();
        for _ in 0..600 {
            for event in session.step(0.01, FlyerInput::None, &mut rng, &mut audio) {
                if let SessionEvent::Died { report } = event {
                    died.push(report);
                }
            }
        }
        assert_eq!(died.len(), 1);
        assert!(session.flyer().is_dead());
        assert_eq!(audio.count(SoundCue::Lose), 1);
        assert_eq!(session.last_report(), Some(died[0]));
    }

    #[test]
    fn test_pipe_hit_freezes_world() {
        let (mut session, mut rng) = new_session();
        let mut audio = CueRecorder::new();
        session.step(0.01, FlyerInput::Jump, &mut rng, &mut audio);

        // Gap far above the flyer: the bottom piece covers y = 0.
        let world = session.config().world;
        session
            .level_mut()
            .push_pipe(ObstaclePair::new(500, 2.0, 85.0, 20.0, &world));
        let events = session.step(0.01, FlyerInput::None, &mut rng, &mut audio);
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::Died { .. })));

        let x_after_death = session.level().pipes()[0].x();
        session.step(0.5, FlyerInput::Jump, &mut rng, &mut audio);
        assert!((session.level().pipes()[0].x() - x_after_death).abs() < f64::EPSILON);
        assert_eq!(session.flyer().vertical_velocity(), 0.0);
    }

    #[test]
    fn test_advance_runs_fixed_steps_and_clamps() {
        let (mut session, mut rng) = new_session();
        let mut audio = CueRecorder::new();
        let events = session.advance(0.0, true, &mut rng, &mut audio);
        assert!(events.is_empty());
        assert_eq!(session.flyer().phase, FlyerPhase::WaitingToStart);

        // The queued jump applies on the first step that runs.
        let events = session.advance(0.05, false, &mut rng, &mut audio);
        assert_eq!(events.first(), Some(&SessionEvent::StartedPlaying));
        assert_eq!(audio.count(SoundCue::Jump), 1);

        // A ten-second stall only advances by the clamp (plus leftover accumulator).
        let step = session.config().session.step_seconds;
        let before = session.level().ground().segments()[1].x;
        session.advance(10.0, false, &mut rng, &mut audio);
        let moved = before - session.level().ground().segments()[1].x;
        assert!(moved > 0.0);
        assert!(moved <= 30.0 * (0.1 + step) + 1e-6);
    }

    #[test]
    fn test_reset_keeps_highscore() {
        let (mut session, mut rng) = new_session();
        session.score_mut().try_set_new_highscore(9).expect("store");
        session.step(0.01, FlyerInput::Jump, &mut rng, &mut CueRecorder::new());
        session.reset(&mut rng);
        assert_eq!(session.flyer().phase, FlyerPhase::WaitingToStart);
        assert_eq!(session.level().pipes_passed_count(), 0);
        assert_eq!(session.score().get_highscore(), 9);
        assert!(session.last_report().is_none());
    }

    #[test]
    fn test_level_events_collected_for_renderers() {
        let (mut session, mut rng) = new_session();
        let mut audio = CueRecorder::new();
        session.step(0.01, FlyerInput::Jump, &mut rng, &mut audio);
        session.step(2.0, FlyerInput::Jump, &mut rng, &mut audio);
        let events = session.drain_level_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, LevelEvent::PipeSpawned { .. })));
        assert!(session.drain_level_events().is_empty());
    }
}
