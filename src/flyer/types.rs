//! Flyer state and lifecycle events.

use crate::core::config::{FlyerConfig, WorldConfig};
use crate::physics::{Body, Vec2};

/// Lifecycle phase. Moves forward only; `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlyerPhase {
    WaitingToStart,
    Playing,
    Dead,
}

/// Events raised by the flyer, drained by the session once per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlyerEvent {
    StartedPlaying,
    Died,
}

/// The flyer's state. Its body starts static at the fixed x position.
#[derive(Debug, Clone)]
pub struct Flyer {
    pub phase: FlyerPhase,
    pub body: Body,
    pub jump_amount: f64,
    pub(crate) events: Vec<FlyerEvent>,
    pub(crate) started_emitted: bool,
    pub(crate) died_emitted: bool,
}

impl Flyer {
    pub fn new(world: &WorldConfig, config: &FlyerConfig) -> Self {
        Self {
            phase: FlyerPhase::WaitingToStart,
            body: Body::new_static(Vec2::new(world.flyer_x, 0.0)),
            jump_amount: config.jump_amount,
            events: Vec::new(),
            started_emitted: false,
            died_emitted: false,
        }
    }

    pub fn vertical_velocity(&self) -> f64 {
        self.body.velocity.y
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn is_dead(&self) -> bool {
        self.phase == FlyerPhase::Dead
    }

    /// Take the events raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<FlyerEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: FlyerEvent) {
        let already = match event {
            FlyerEvent::StartedPlaying => &mut self.started_emitted,
            FlyerEvent::Died => &mut self.died_emitted,
        };
        if !*already {
            *already = true;
            self.events.push(event);
        }
    }
}
