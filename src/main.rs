mod input;
mod ui;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::utils::build_info::version_line;
use flappy::utils::persistence::{data_dir, data_path};
use flappy::{
    FlyerPhase, GameConfig, JsonFileStore, ScoreTracker, Session, SessionEvent, CONFIG_FILE_NAME,
    LOG_FILE_NAME,
};
use input::{map_event, Action};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use ui::HudState;

/// Target frame time for drawing and input polling.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", version_line());
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Flappy - terminal side-scroller\n");
                println!("Usage: flappy [command]\n");
                println!("Commands:");
                println!("  highscore        Print the saved high score");
                println!("  reset-highscore  Reset the saved high score to zero");
                println!("  --version        Show version information");
                println!("  --help           Show this help message");
                println!("\nControls: Space/W/Up/click to jump, R to retry, Q/Esc to quit");
                return Ok(());
            }
            "highscore" => {
                let tracker = ScoreTracker::new(open_store()?);
                println!("{}", tracker.get_highscore());
                return Ok(());
            }
            "reset-highscore" => {
                let mut tracker = ScoreTracker::new(open_store()?);
                tracker
                    .reset_highscore()
                    .context("failed to reset high score")?;
                println!("High score reset.");
                return Ok(());
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'flappy --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let _log_guard = init_logging();
    info!(version = %version_line(), "starting");

    let config = load_config();
    let store = open_store()?;

    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    let result = run(&mut terminal, config, store);
    restore_terminal(&mut terminal).context("failed to restore terminal")?;
    result
}

fn open_store() -> Result<JsonFileStore> {
    JsonFileStore::open_default().context("failed to open preferences")
}

/// Log to `~/.flappy/flappy.log`; stdout belongs to the TUI. Logging is
/// skipped if the data directory is unavailable.
fn init_logging() -> Option<WorkerGuard> {
    let dir = data_dir().ok()?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("FLAPPY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn load_config() -> GameConfig {
    let path = match data_path(CONFIG_FILE_NAME) {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "no data directory, using default config");
            return GameConfig::default();
        }
    };
    match GameConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            GameConfig::default()
        }
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: GameConfig,
    store: JsonFileStore,
) -> Result<()> {
    let mut rng = StdRng::from_entropy();
    let mut session = Session::new(config, store, &mut rng);
    let mut hud = HudState::new();
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, &session, &hud))?;

        let mut jump = false;
        let deadline = last_frame + FRAME;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match map_event(&event::read()?) {
                Action::Jump => jump = true,
                Action::Retry if session.flyer().phase == FlyerPhase::Dead => {
                    session.reset(&mut rng);
                    hud.clear();
                }
                Action::Quit => {
                    info!("quit");
                    return Ok(());
                }
                Action::Retry | Action::None => {}
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        hud.tick(dt);
        for event in session.advance(dt, jump, &mut rng, &mut hud) {
            match event {
                SessionEvent::DifficultyChanged { tier } => {
                    hud.flash(format!("Difficulty: {}", tier.name()), 2.0);
                }
                SessionEvent::Died { report } => {
                    info!(
                        score = report.score,
                        highscore = report.highscore,
                        new_highscore = report.is_new_highscore,
                        "run over"
                    );
                }
                SessionEvent::StartedPlaying | SessionEvent::PipePassed { .. } => {}
            }
        }
        // The scene redraws from state; level events are unused here.
        session.drain_level_events();
    }
}
