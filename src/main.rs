/// Entry point and frame loop.

mod config;
mod domain;
mod logging;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{debug, error, info};

use config::GameConfig;
use sim::event::GameEvent;
use sim::report::{self, FileReportSink};
use sim::step;
use sim::world::{Phase, SessionState};
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::{self, SoundEngine};

/// Longest step taken on the first frame after a resize pause.
const MAX_RESUME_DT: f64 = 0.1;
/// Poll interval while the terminal is too small to play.
const RESIZE_POLL: Duration = Duration::from_millis(300);

const FATAL_MESSAGE: &str = "An unexpected error occurred. See voyage_error.log if available. Exiting.";

#[derive(Parser, Debug)]
#[command(author, version, about = "Voyager: Galactic Odyssey, a terminal starfield flight and survey game", long_about = None)]
struct Cli {
    /// Flight speed at launch (clamped to the configured range).
    #[arg(long)]
    speed: Option<f64>,
    /// Number of stars in the parallax field (at least 30).
    #[arg(long)]
    density: Option<usize>,
    /// Seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,
    /// Config file to use instead of searching for config.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

enum Outcome {
    Finished { score: u64 },
    Interrupted,
}

fn main() {
    let cli = Cli::parse();
    logging::init(Path::new(logging::LOG_FILE));
    logging::install_panic_hook();

    let mut config = GameConfig::load(cli.config.as_deref());
    if let Some(speed) = cli.speed {
        config.tuning.flight.default_speed = config.tuning.flight.clamp_speed(speed);
    }
    if let Some(density) = cli.density {
        config.tuning.flight.star_density = config.tuning.flight.clamp_density(density);
    }
    let seed = cli.seed.or(config.seed).unwrap_or_else(rand::random);
    info!(seed, "session start");

    let error_log = config.report.dir.join(&config.report.error_log);
    let mut renderer = Renderer::new();
    let result = panic::catch_unwind(AssertUnwindSafe(|| run(&mut renderer, &config, seed)));

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    let failure = match result {
        Ok(Ok(Outcome::Finished { score })) => {
            println!("Thanks for flying with Earth Command. Final score: {score}");
            None
        }
        Ok(Ok(Outcome::Interrupted)) => {
            println!("Exited safely 🖖");
            None
        }
        Ok(Err(e)) => Some(e.to_string()),
        Err(payload) => Some(logging::panic_message(&*payload)),
    };

    if let Some(msg) = failure {
        error!("fatal: {msg}");
        if let Err(e) = write_error_log(&error_log, &msg) {
            error!("could not write {}: {e}", error_log.display());
        }
        eprintln!("{FATAL_MESSAGE}");
        std::process::exit(1);
    }
}

fn run(
    renderer: &mut Renderer,
    config: &GameConfig,
    seed: u64,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    renderer.init()?;

    let (w, h) = Renderer::size();
    let mut state = SessionState::new(config.tuning.clone(), seed, w, h);
    let sound = SoundEngine::new();
    let sink = FileReportSink::from_config(&config.report);
    let mut input = InputState::new();

    let frame = Duration::from_secs_f64(1.0 / config.tuning.flight.fps.max(1.0));
    let mut last_frame = Instant::now();
    let mut paused = false;

    loop {
        let frame_start = Instant::now();
        let dt = frame_dt(frame_start.duration_since(last_frame), paused);
        last_frame = frame_start;

        input.drain_events();
        if input.ctrl_c_pressed() {
            info!("interrupted at t={:.1}s", state.clock);
            return Ok(Outcome::Interrupted);
        }

        match state.phase {
            Phase::Briefing => {
                if input.any_key() {
                    state.launch();
                    info!("mission accepted in {}", state.galaxy().name);
                }
            }
            Phase::Playing => {
                let events = step::tick(&mut state, input.action(), dt);
                log_events(&events);
                sound::play_events(sound.as_ref(), &events);
                if state.phase == Phase::Debrief {
                    report::finalize(&mut state, &sink);
                }
            }
            Phase::Debrief => {
                if input.any_key() {
                    return Ok(Outcome::Finished { score: state.ship.score });
                }
            }
        }

        renderer.render(&mut state)?;

        paused = state.phase == Phase::Playing && state.is_too_small();
        let budget = if paused { RESIZE_POLL } else { frame };
        if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

/// Simulated seconds for this frame. Wall time passes through unchanged so
/// pack lifetimes and fuel drain track the real clock; only the frame that
/// resumes from a resize pause is capped.
fn frame_dt(elapsed: Duration, resuming: bool) -> f64 {
    let dt = elapsed.as_secs_f64();
    if resuming { dt.min(MAX_RESUME_DT) } else { dt }
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::PowerPackSpawned { x, y } => debug!(x, y, "power pack spawned"),
            GameEvent::PowerPackExpired { x, y } => debug!(x, y, "power pack expired"),
            GameEvent::PowerPackCollected { x, y } => info!(x, y, "power pack collected"),
            GameEvent::TaskCompleted { system, task, reward } => {
                info!(%system, task, reward, "task completed")
            }
            GameEvent::SystemScanned { system } => info!(%system, "system scanned"),
            GameEvent::NothingToScan => debug!("scan found nothing in range"),
            GameEvent::ScanRefused => info!("scan refused: low fuel"),
            GameEvent::WarpEngaged { galaxy } => info!(galaxy, "warp engaged"),
            GameEvent::WarpRefused => info!("warp refused: low fuel"),
            GameEvent::WarpFinished { galaxy } => debug!(galaxy, "warp finished"),
            GameEvent::MissionComplete { galaxy } => info!(galaxy, "mission complete"),
        }
    }
}

fn write_error_log(path: &Path, msg: &str) -> std::io::Result<()> {
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(f, "[{}] {msg}", report::timestamp_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_frames_keep_wall_time() {
        let dt = frame_dt(Duration::from_millis(750), false);
        assert!((dt - 0.75).abs() < 1e-9);
    }

    #[test]
    fn resume_from_pause_is_capped() {
        let dt = frame_dt(Duration::from_millis(750), true);
        assert!((dt - MAX_RESUME_DT).abs() < 1e-9);
        let dt = frame_dt(Duration::from_millis(40), true);
        assert!((dt - 0.04).abs() < 1e-9);
    }
}
