//! Integration test: spawn cadence does not depend on frame rate.
//!
//! Over a span T with a constant interval I the level spawns floor(T / I)
//! pairs whatever step size drives it.

use flappy::{CueRecorder, GameConfig, Level, LevelEvent, MemoryStore, Session};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn spawns_over(total_seconds: f64, dt: f64) -> u32 {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut level = Level::new(&GameConfig::default(), &mut rng);
    level.on_started_playing();
    let mut audio = CueRecorder::new();

    let steps = (total_seconds / dt).round() as usize;
    for _ in 0..steps {
        level.tick(dt, &mut rng, &mut audio);
    }
    level.pipes_spawned()
}

#[test]
fn test_spawn_count_is_floor_of_elapsed_over_interval() {
    // Easy interval is 2.0s; 15s stays inside the Easy tier.
    for dt in [1.0 / 60.0, 0.01, 0.1, 0.25, 0.5, 1.5] {
        assert_eq!(spawns_over(15.0, dt), 7, "dt = {}", dt);
    }
}

#[test]
fn test_single_large_tick_catches_up() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut level = Level::new(&GameConfig::default(), &mut rng);
    level.on_started_playing();
    level.tick(9.0, &mut rng, &mut CueRecorder::new());
    assert_eq!(level.pipes_spawned(), 4);

    let spawned = level
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, LevelEvent::PipeSpawned { .. }))
        .count();
    assert_eq!(spawned, 4);
}

#[test]
fn test_pipe_ids_are_unique() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut level = Level::new(&GameConfig::default(), &mut rng);
    level.on_started_playing();
    let mut audio = CueRecorder::new();

    let mut ids = Vec::new();
    for _ in 0..(60 * 30) {
        level.tick(1.0 / 60.0, &mut rng, &mut audio);
        for event in level.drain_events() {
            if let LevelEvent::PipeSpawned { id, .. } = event {
                ids.push(id);
            }
        }
    }
    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(ids.len(), deduped.len());
    assert!(ids.len() >= 14);
}

#[test]
fn test_spawned_gaps_respect_edge_margins() {
    let config = GameConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut level = Level::new(&config, &mut rng);
    level.on_started_playing();
    let mut audio = CueRecorder::new();

    let mut checked = 0;
    for _ in 0..(60 * 70) {
        level.tick(1.0 / 60.0, &mut rng, &mut audio);
        for event in level.drain_events() {
            if let LevelEvent::PipeSpawned {
                gap_center,
                gap_size,
                ..
            } = event
            {
                let margin = config.world.gap_edge_margin;
                assert!(gap_center - gap_size / 2.0 >= margin - 1e-9);
                assert!(gap_center + gap_size / 2.0 <= config.world.vertical_span - margin + 1e-9);
                checked += 1;
            }
        }
    }
    assert!(checked > 30);
}

#[test]
fn test_frame_rate_does_not_change_session_spawns() {
    let run = |frame_dt: f64| {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut session = Session::new(GameConfig::default(), MemoryStore::new(), &mut rng);
        let mut audio = CueRecorder::new();
        session.advance(0.0, true, &mut rng, &mut audio);
        // The first pair reaches the flyer just after five seconds.
        let frames = (4.5 / frame_dt).round() as usize;
        for _ in 0..frames {
            // Hold the flyer still so it outlives the window.
            session.flyer_mut().body.position.y = 0.0;
            session.flyer_mut().body.velocity.y = 0.0;
            session.advance(frame_dt, false, &mut rng, &mut audio);
        }
        session.level().pipes_spawned()
    };
    assert_eq!(run(1.0 / 30.0), 2);
    assert_eq!(run(1.0 / 144.0), 2);
}
