//! Fire-and-forget sound cues. The simulation never waits on playback.

/// Sounds the simulation can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Score,
    Lose,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Score => "score",
            Self::Lose => "lose",
        }
    }
}

/// Receives sound requests from the simulation.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Keeps every requested cue in order. Useful for tests and for UIs that
/// display cues instead of playing them.
#[derive(Debug, Default, Clone)]
pub struct CueRecorder {
    pub cues: Vec<SoundCue>,
}

impl CueRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }

    pub fn last(&self) -> Option<SoundCue> {
        self.cues.last().copied()
    }

    pub fn clear(&mut self) {
        self.cues.clear();
    }
}

impl AudioSink for CueRecorder {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_counts_cues() {
        let mut recorder = CueRecorder::new();
        recorder.play(SoundCue::Jump);
        recorder.play(SoundCue::Score);
        recorder.play(SoundCue::Jump);
        assert_eq!(recorder.count(SoundCue::Jump), 2);
        assert_eq!(recorder.count(SoundCue::Lose), 0);
        assert_eq!(recorder.last(), Some(SoundCue::Jump));
        recorder.clear();
        assert_eq!(recorder.last(), None);
    }
}
