pub mod game_common;
pub mod game_over;
pub mod level_scene;

use flappy::{AudioSink, KeyValueStore, Session, SoundCue};
use ratatui::Frame;

/// Front-end state that lives next to the session: transient notices and
/// the last sound cue, shown in place of playing audio.
#[derive(Debug, Default)]
pub struct HudState {
    pub last_cue: Option<SoundCue>,
    pub notice: Option<String>,
    notice_ttl: f64,
}

impl HudState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text` in the status bar for `seconds`.
    pub fn flash(&mut self, text: impl Into<String>, seconds: f64) {
        self.notice = Some(text.into());
        self.notice_ttl = seconds;
    }

    /// Age the current notice by one frame.
    pub fn tick(&mut self, dt: f64) {
        if self.notice.is_some() {
            self.notice_ttl -= dt;
            if self.notice_ttl <= 0.0 {
                self.notice = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.last_cue = None;
        self.notice = None;
        self.notice_ttl = 0.0;
    }
}

impl AudioSink for HudState {
    fn play(&mut self, cue: SoundCue) {
        self.last_cue = Some(cue);
    }
}

/// Draw one frame: the level, plus the game-over window once a run ends.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, session: &Session<S>, hud: &HudState) {
    let area = frame.size();
    level_scene::render_level(frame, area, session, hud);
    if let Some(report) = session.last_report() {
        game_over::render_game_over(frame, area, &report);
    }
}
