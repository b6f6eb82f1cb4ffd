//! Flyer input handling and collision response.

use super::types::{Flyer, FlyerEvent, FlyerPhase};
use crate::audio::{AudioSink, SoundCue};
use crate::physics::{BodyMode, Vec2};
use tracing::{debug, info};

/// Input actions for the flyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlyerInput {
    /// A jump press edge (Space, W, Up, left click).
    Jump,
    /// No jump this step.
    None,
}

impl From<bool> for FlyerInput {
    fn from(jump: bool) -> Self {
        if jump {
            Self::Jump
        } else {
            Self::None
        }
    }
}

/// Process one step's input.
pub fn process_input<A: AudioSink>(flyer: &mut Flyer, input: FlyerInput, audio: &mut A) {
    if input != FlyerInput::Jump {
        return;
    }

    match flyer.phase {
        FlyerPhase::WaitingToStart => {
            flyer.phase = FlyerPhase::Playing;
            flyer.body.set_mode(BodyMode::Dynamic);
            jump(flyer, audio);
            info!("flyer started playing");
            flyer.emit(FlyerEvent::StartedPlaying);
        }
        FlyerPhase::Playing => jump(flyer, audio),
        FlyerPhase::Dead => {}
    }
}

/// Replace (never add to) the vertical velocity with the jump impulse.
fn jump<A: AudioSink>(flyer: &mut Flyer, audio: &mut A) {
    flyer.body.set_velocity(Vec2::new(0.0, flyer.jump_amount));
    audio.play(SoundCue::Jump);
}

/// Collision-trigger callback from the physics collaborator.
///
/// Freezes the body and raises `Died`. Repeated calls are no-ops.
pub fn on_collision_trigger(flyer: &mut Flyer) {
    if flyer.phase == FlyerPhase::Dead {
        debug!("collision after death ignored");
        return;
    }
    flyer.body.set_mode(BodyMode::Static);
    flyer.phase = FlyerPhase::Dead;
    info!(y = flyer.body.position.y, "flyer died");
    flyer.emit(FlyerEvent::Died);
}
