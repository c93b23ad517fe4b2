/// SessionState: the complete snapshot of a running voyage.
///
/// ## Clock
///
/// `clock` is session time in seconds, advanced by `dt` every tick. Pack
/// expiry, star drift, copilot freshness and banners all read it, so a
/// session driven with a fixed `dt` is fully reproducible.
///
/// ## Canvas
///
/// `width`/`height` mirror the terminal. The renderer updates them each frame;
/// the simulation only reads them for placement and movement clamps.
///
/// ## Randomness
///
/// Every random draw goes through `rng`. `SessionState::new` takes the seed.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::Tuning;
use crate::domain::catalog::{self, GalaxyInfo};
use crate::domain::entity::Ship;
use crate::domain::mission::{self, Mission, VisitedReport};
use crate::domain::star::Viewport;

use super::field::ParallaxField;
use super::report::MissionReport;
use super::resources::PowerPackPool;

/// Below this canvas size the game pauses and asks for a resize.
pub const MIN_WIDTH: i32 = 70;
pub const MIN_HEIGHT: i32 = 20;

const OPENING_MESSAGE: &str = "AI: Systems online. Earth Command standing by.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Briefing,
    Playing,
    Debrief,
}

/// The copilot's current line. A message is "fresh" for a few seconds after
/// it was set; fresh messages go on the status bar.
#[derive(Clone, Debug)]
pub struct Copilot {
    pub message: String,
    pub set_at: f64,
    pub last_hint: f64,
}

impl Copilot {
    fn new(message: &str) -> Self {
        Copilot {
            message: message.to_string(),
            set_at: f64::NEG_INFINITY,
            last_hint: 0.0,
        }
    }

    pub fn is_fresh(&self, now: f64, secs: f64) -> bool {
        now - self.set_at < secs
    }
}

/// Centred full-screen text shown until `until` (session clock).
#[derive(Clone, Debug)]
pub struct Banner {
    pub text: String,
    pub until: f64,
}

pub struct SessionState {
    pub tuning: Tuning,
    pub rng: StdRng,
    pub phase: Phase,

    pub width: i32,
    pub height: i32,
    pub clock: f64,
    pub speed: f64,

    pub ship: Ship,
    pub field: ParallaxField,
    pub packs: PowerPackPool,

    pub galaxy_idx: usize,
    pub mission: Mission,
    /// Missions left behind, oldest first.
    pub archive: Vec<Mission>,
    pub visited: VisitedReport,

    pub copilot: Copilot,
    pub crew_log: Vec<String>,
    pub banner: Option<Banner>,
    /// Seconds left in the warp cinematic. Zero when not warping.
    pub warp_remaining: f64,

    pub show_ai: bool,
    pub show_map: bool,
    pub show_log: bool,

    pub report: Option<MissionReport>,
    /// Files the report was written to. Empty when export failed.
    pub report_paths: Vec<PathBuf>,
}

impl SessionState {
    /// Fresh session: random starting galaxy, full tank, ship centred near
    /// the bottom.
    pub fn new(tuning: Tuning, seed: u64, width: i32, height: i32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let view = Viewport::new(width, height);

        let density = tuning.flight.clamp_density(tuning.flight.star_density);
        let field = ParallaxField::new(&mut rng, density, view, tuning.flight.z_max);

        let art = catalog::SHIP_VARIANTS
            .choose(&mut rng)
            .copied()
            .unwrap_or(catalog::SHIP_VARIANTS[0]);
        let mut ship = Ship::new(0, 0, art, tuning.fuel.max);
        let (art_w, art_h) = ship.footprint();
        ship.x = (width / 2 - art_w / 2).max(2);
        ship.y = (height - art_h - 4).max(2);

        let galaxy_idx = rng.gen_range(0..catalog::GALAXIES.len());
        let mission = mission::generate(
            &mut rng,
            catalog::galaxy(galaxy_idx).name,
            width,
            height,
            tuning.mission.task_reward,
        );
        let speed = tuning.flight.clamp_speed(tuning.flight.default_speed);

        SessionState {
            tuning,
            rng,
            phase: Phase::Briefing,
            width,
            height,
            clock: 0.0,
            speed,
            ship,
            field,
            packs: PowerPackPool::new(),
            galaxy_idx,
            mission,
            archive: Vec::new(),
            visited: VisitedReport::new(),
            copilot: Copilot::new(OPENING_MESSAGE),
            crew_log: catalog::OPENING_CREW_LOG.iter().map(|s| s.to_string()).collect(),
            banner: None,
            warp_remaining: 0.0,
            show_ai: false,
            show_map: false,
            show_log: false,
            report: None,
            report_paths: Vec::new(),
        }
    }

    pub fn galaxy(&self) -> &'static GalaxyInfo {
        catalog::galaxy(self.galaxy_idx)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Star motion speed: the flight speed capped for readability.
    pub fn visual_speed(&self) -> f64 {
        self.speed.min(self.tuning.flight.visual_speed_cap)
    }

    pub fn is_warping(&self) -> bool {
        self.warp_remaining > 0.0
    }

    pub fn is_too_small(&self) -> bool {
        self.width < MIN_WIDTH || self.height < MIN_HEIGHT
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn say(&mut self, message: impl Into<String>) {
        self.copilot.message = message.into();
        self.copilot.set_at = self.clock;
    }

    pub fn copilot_is_fresh(&self) -> bool {
        self.copilot.is_fresh(self.clock, self.tuning.mission.copilot_secs)
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.crew_log.push(line.into());
    }

    /// Last `n` crew log lines, oldest first.
    pub fn recent_log(&self, n: usize) -> &[String] {
        let start = self.crew_log.len().saturating_sub(n);
        &self.crew_log[start..]
    }

    pub fn show_banner(&mut self, text: impl Into<String>, secs: f64) {
        self.banner = Some(Banner { text: text.into(), until: self.clock + secs });
    }

    /// Briefing accepted: start flying and announce the first galaxy.
    pub fn launch(&mut self) {
        self.phase = Phase::Playing;
        let signoff = catalog::ARRIVAL_SIGNOFFS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("");
        let text = format!("Entering {}... {}", self.galaxy().name, signoff);
        self.show_banner(text, 1.0);
    }

    /// Archive the current mission and generate one for the next galaxy.
    /// Shared by warp and automatic mission completion.
    pub fn advance_galaxy(&mut self) -> &'static str {
        self.galaxy_idx = catalog::next_galaxy(self.galaxy_idx);
        let galaxy = self.galaxy().name;
        let fresh = mission::generate(
            &mut self.rng,
            galaxy,
            self.width,
            self.height,
            self.tuning.mission.task_reward,
        );
        let old = std::mem::replace(&mut self.mission, fresh);
        self.archive.push(old);
        galaxy
    }

    /// Per-tick Bernoulli draw in `[0, 1)`.
    pub fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
