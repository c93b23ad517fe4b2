/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD), or from an
/// explicit `--config` path. Every key has a default, so a missing file or a
/// partial file still yields a complete configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

// ── Public Config Structs ──

#[derive(Clone, Debug, Default)]
pub struct GameConfig {
    pub tuning: Tuning,
    pub report: ReportConfig,
    pub seed: Option<u64>,
}

/// Everything the simulation reads each tick.
#[derive(Clone, Debug, Default)]
pub struct Tuning {
    pub flight: FlightConfig,
    pub fuel: FuelConfig,
    pub spawn: SpawnConfig,
    pub mission: MissionConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FlightConfig {
    #[serde(default = "default_speed")]
    pub default_speed: f64,
    #[serde(default = "default_min_speed")]
    pub min_speed: f64,
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
    #[serde(default = "default_speed_step")]
    pub speed_step: f64,
    #[serde(default = "default_visual_cap")]
    pub visual_speed_cap: f64,   // stars never move faster than this
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default = "default_z_max")]
    pub z_max: f64,
    #[serde(default = "default_star_density")]
    pub star_density: usize,
    #[serde(default = "default_min_star_density")]
    pub min_star_density: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FuelConfig {
    #[serde(default = "default_fuel_max")]
    pub max: f64,
    #[serde(default = "default_fuel_move")]
    pub move_per_sec: f64,
    #[serde(default = "default_fuel_scan")]
    pub scan_cost: f64,
    #[serde(default = "default_fuel_pick")]
    pub pickup_energy: f64,      // charged to energy only, not to fuel
    #[serde(default = "default_warp_mult")]
    pub warp_multiplier: f64,
    #[serde(default = "default_pack_refill")]
    pub pack_refill: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SpawnConfig {
    #[serde(default = "default_power_chance")]
    pub power_chance: f64,
    #[serde(default = "default_power_life")]
    pub power_life_secs: f64,
    #[serde(default = "default_collect_radius")]
    pub collect_radius: i32,
    #[serde(default = "default_power_score")]
    pub power_score: u64,
    #[serde(default = "default_galaxy_chance")]
    pub galaxy_chance: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MissionConfig {
    #[serde(default = "default_task_reward")]
    pub task_reward: u64,
    #[serde(default = "default_discovery_reward")]
    pub discovery_reward: u64,
    #[serde(default = "default_scan_radius")]
    pub scan_radius: f64,
    #[serde(default = "default_warp_duration")]
    pub warp_duration_secs: f64,
    #[serde(default = "default_copilot_secs")]
    pub copilot_secs: f64,
    #[serde(default = "default_hint_interval")]
    pub hint_interval_secs: f64,
    #[serde(default = "default_hint_chance")]
    pub hint_chance: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_json_file")]
    pub json_file: String,
    #[serde(default = "default_text_file")]
    pub text_file: String,
    #[serde(default = "default_error_log")]
    pub error_log: String,
}

impl FuelConfig {
    /// Fuel charged for one warp jump.
    pub fn warp_cost(&self) -> f64 {
        self.move_per_sec * self.warp_multiplier * 4.0
    }
}

impl FlightConfig {
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        speed.max(self.min_speed).min(self.max_speed)
    }

    pub fn clamp_density(&self, density: usize) -> usize {
        density.max(self.min_star_density)
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    flight: FlightConfig,
    #[serde(default)]
    fuel: FuelConfig,
    #[serde(default)]
    spawn: SpawnConfig,
    #[serde(default)]
    mission: MissionConfig,
    #[serde(default)]
    report: ReportConfig,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("parse error in {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

// ── Defaults ──

fn default_speed() -> f64 { 1.0 }
fn default_min_speed() -> f64 { 0.3 }
fn default_max_speed() -> f64 { 4.0 }
fn default_speed_step() -> f64 { 0.2 }
fn default_visual_cap() -> f64 { 2.0 }
fn default_fps() -> f64 { 28.0 }
fn default_z_max() -> f64 { 8.0 }
fn default_star_density() -> usize { 160 }
fn default_min_star_density() -> usize { 30 }

fn default_fuel_max() -> f64 { 1000.0 }
fn default_fuel_move() -> f64 { 0.08 }
fn default_fuel_scan() -> f64 { 5.0 }
fn default_fuel_pick() -> f64 { 2.0 }
fn default_warp_mult() -> f64 { 3.5 }
fn default_pack_refill() -> f64 { 60.0 }

fn default_power_chance() -> f64 { 0.0015 }
fn default_power_life() -> f64 { 12.0 }
fn default_collect_radius() -> i32 { 2 }
fn default_power_score() -> u64 { 100 }
fn default_galaxy_chance() -> f64 { 0.0009 }

fn default_task_reward() -> u64 { 200 }
fn default_discovery_reward() -> u64 { 20 }
fn default_scan_radius() -> f64 { 3.0 }
fn default_warp_duration() -> f64 { 3.5 }
fn default_copilot_secs() -> f64 { 6.0 }
fn default_hint_interval() -> f64 { 4.0 }
fn default_hint_chance() -> f64 { 0.06 }

fn default_report_dir() -> PathBuf { PathBuf::from(".") }
fn default_json_file() -> String { "mission_report.json".into() }
fn default_text_file() -> String { "mission_report.txt".into() }
fn default_error_log() -> String { "voyage_error.log".into() }

impl Default for FlightConfig {
    fn default() -> Self {
        FlightConfig {
            default_speed: default_speed(),
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
            speed_step: default_speed_step(),
            visual_speed_cap: default_visual_cap(),
            fps: default_fps(),
            z_max: default_z_max(),
            star_density: default_star_density(),
            min_star_density: default_min_star_density(),
        }
    }
}

impl Default for FuelConfig {
    fn default() -> Self {
        FuelConfig {
            max: default_fuel_max(),
            move_per_sec: default_fuel_move(),
            scan_cost: default_fuel_scan(),
            pickup_energy: default_fuel_pick(),
            warp_multiplier: default_warp_mult(),
            pack_refill: default_pack_refill(),
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            power_chance: default_power_chance(),
            power_life_secs: default_power_life(),
            collect_radius: default_collect_radius(),
            power_score: default_power_score(),
            galaxy_chance: default_galaxy_chance(),
        }
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        MissionConfig {
            task_reward: default_task_reward(),
            discovery_reward: default_discovery_reward(),
            scan_radius: default_scan_radius(),
            warp_duration_secs: default_warp_duration(),
            copilot_secs: default_copilot_secs(),
            hint_interval_secs: default_hint_interval(),
            hint_chance: default_hint_chance(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            dir: default_report_dir(),
            json_file: default_json_file(),
            text_file: default_text_file(),
            error_log: default_error_log(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from an explicit path, or search for `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/voyager`.
    pub fn load(explicit: Option<&Path>) -> Self {
        let toml_cfg = match explicit {
            Some(path) => read_toml(path).unwrap_or_else(|e| {
                warn!("{e}; using default settings");
                TomlConfig::default()
            }),
            None => load_toml(&candidate_dirs()),
        };
        GameConfig::from_toml(toml_cfg)
    }

    /// Parse config text directly (used for tests and explicit files).
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from_toml)
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        GameConfig {
            tuning: Tuning {
                flight: cfg.flight,
                fuel: cfg.fuel,
                spawn: cfg.spawn,
                mission: cfg.mission,
            },
            report: cfg.report,
            seed: cfg.general.seed,
        }
    }
}

/// Candidate directories to search: exe dir + CWD + XDG data dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/voyager");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn read_toml(path: &Path) -> Result<TomlConfig, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    toml::from_str::<TomlConfig>(&text)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match read_toml(&path) {
            Ok(cfg) => {
                info!("loaded {}", path.display());
                return cfg;
            }
            Err(e @ ConfigError::Parse { .. }) => {
                warn!("{e}; using default settings");
                return TomlConfig::default();
            }
            Err(e) => warn!("{e}"),
        }
    }
    TomlConfig::default()
}
