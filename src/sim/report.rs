/// End-of-session mission report: composition and export.
///
/// The report is written twice: once as pretty JSON and once as a readable
/// text file. Export failures are reported to the caller, which logs them and
/// carries on; a failed write never aborts shutdown.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ReportConfig;
use crate::domain::mission::{Task, VisitedReport};

use super::world::SessionState;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, Serialize)]
pub struct MissionReport {
    pub missions_completed_count: usize,
    pub current_mission: String,
    pub tasks_status: Vec<Task>,
    pub visited_report: VisitedReport,
    pub score: u64,
    #[serde(rename = "distance_traveled_AU")]
    pub distance_traveled_au: f64,
    pub energy_consumed: f64,
    pub fuel_remaining: f64,
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("could not encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Local wall-clock time in report format.
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Snapshot the session into a report.
pub fn compose(state: &SessionState, timestamp: String) -> MissionReport {
    MissionReport {
        missions_completed_count: state.archive.len(),
        current_mission: state.mission.galaxy.to_string(),
        tasks_status: state.mission.tasks.clone(),
        visited_report: state.visited.clone(),
        score: state.ship.score,
        distance_traveled_au: round_to(state.ship.distance, 4),
        energy_consumed: round_to(state.ship.energy, 2),
        fuel_remaining: round_to(state.ship.fuel, 2),
        timestamp,
    }
}

/// Human-readable rendering of a report.
pub fn render_text(report: &MissionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "MISSION REPORT");
    let _ = writeln!(out, "==============");
    let _ = writeln!(out, "Timestamp:          {}", report.timestamp);
    let _ = writeln!(out, "Current galaxy:     {}", report.current_mission);
    let _ = writeln!(out, "Missions completed: {}", report.missions_completed_count);
    let _ = writeln!(out, "Score:              {}", report.score);
    let _ = writeln!(out, "Distance (AU):      {:.4}", report.distance_traveled_au);
    let _ = writeln!(out, "Energy consumed:    {:.2}", report.energy_consumed);
    let _ = writeln!(out, "Fuel remaining:     {:.2}", report.fuel_remaining);

    let _ = writeln!(out);
    let _ = writeln!(out, "Current tasks:");
    for t in &report.tasks_status {
        let mark = if t.done { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {} @ {} (reward {})", t.task, t.system, t.reward);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Visited systems:");
    for (galaxy, visits) in report.visited_report.iter() {
        if visits.systems.is_empty() { continue; }
        let _ = writeln!(out, "  {galaxy} ({})", visits.kind);
        for v in &visits.systems {
            let _ = writeln!(out, "    - {}: {}", v.system, v.task);
        }
    }
    out
}

/// Destination for finished reports.
pub trait ReportSink {
    /// Write every form of the report. Each form succeeds or fails on its
    /// own; the result holds one outcome per form.
    fn export(&self, report: &MissionReport) -> Vec<Result<PathBuf, ReportError>>;
}

/// Writes `mission_report.json` and `mission_report.txt` (names configurable).
pub struct FileReportSink {
    pub json_path: PathBuf,
    pub text_path: PathBuf,
}

impl FileReportSink {
    pub fn from_config(cfg: &ReportConfig) -> Self {
        FileReportSink {
            json_path: cfg.dir.join(&cfg.json_file),
            text_path: cfg.dir.join(&cfg.text_file),
        }
    }

    fn write_json(&self, report: &MissionReport) -> Result<PathBuf, ReportError> {
        let json = serde_json::to_string_pretty(report)?;
        write_file(&self.json_path, &json)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<PathBuf, ReportError> {
    fs::write(path, contents)
        .map_err(|source| ReportError::Write { path: path.to_path_buf(), source })?;
    Ok(path.to_path_buf())
}

impl ReportSink for FileReportSink {
    fn export(&self, report: &MissionReport) -> Vec<Result<PathBuf, ReportError>> {
        vec![
            self.write_json(report),
            write_file(&self.text_path, &render_text(report)),
        ]
    }
}

/// Compose the final report, hand it to `sink`, and remember which files
/// were written for the debrief screen. Export faults are logged, not raised.
pub fn finalize(state: &mut SessionState, sink: &dyn ReportSink) {
    let report = compose(state, timestamp_now());
    let mut written = Vec::new();
    for outcome in sink.export(&report) {
        match outcome {
            Ok(path) => {
                info!("report written to {}", path.display());
                written.push(path);
            }
            Err(e) => warn!("report export failed: {e}"),
        }
    }
    state.report_paths = written;
    state.report = Some(report);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::sim::world::Phase;

    fn sample_state() -> SessionState {
        let mut s = SessionState::new(Tuning::default(), 5, 100, 30);
        s.phase = Phase::Playing;
        s.ship.distance = 1.234_567;
        s.ship.energy = 12.345_6;
        s.ship.fuel = 987.654_3;
        s.ship.score = 420;
        let galaxy = s.mission.galaxy;
        let system = s.mission.tasks[0].system.clone();
        s.mission.tasks[0].done = true;
        s.visited.record(galaxy, &system, s.mission.tasks[0].task);
        s
    }

    #[test]
    fn compose_rounds_and_counts() {
        let s = sample_state();
        let r = compose(&s, "2024-01-02 03:04:05".into());
        assert_eq!(r.missions_completed_count, 0);
        assert_eq!(r.current_mission, s.mission.galaxy);
        assert_eq!(r.score, 420);
        assert_eq!(r.distance_traveled_au, 1.2346);
        assert_eq!(r.energy_consumed, 12.35);
        assert_eq!(r.fuel_remaining, 987.65);
        assert_eq!(r.tasks_status.len(), s.mission.tasks.len());
    }

    #[test]
    fn json_uses_report_keys() {
        let s = sample_state();
        let r = compose(&s, "2024-01-02 03:04:05".into());
        let v = serde_json::to_value(&r).unwrap();
        for key in [
            "missions_completed_count",
            "current_mission",
            "tasks_status",
            "visited_report",
            "score",
            "distance_traveled_AU",
            "energy_consumed",
            "fuel_remaining",
            "timestamp",
        ] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(v["tasks_status"][0]["done"], true);
        assert_eq!(v["visited_report"][s.mission.galaxy]["systems"][0]["system"],
                   s.mission.tasks[0].system.as_str());
    }

    #[test]
    fn text_lists_tasks_and_visits() {
        let s = sample_state();
        let r = compose(&s, "2024-01-02 03:04:05".into());
        let text = render_text(&r);
        assert!(text.starts_with("MISSION REPORT\n"));
        assert!(text.contains("Score:              420"));
        assert!(text.contains(&format!("[x] {} @ {}", s.mission.tasks[0].task, s.mission.tasks[0].system)));
        assert!(text.contains(&format!("  {} (", s.mission.galaxy)));
    }

    #[test]
    fn timestamp_has_expected_shape() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }

    #[test]
    fn file_sink_writes_both_files() {
        let dir = std::env::temp_dir().join(format!("voyager-report-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let cfg = ReportConfig { dir: dir.clone(), ..ReportConfig::default() };
        let sink = FileReportSink::from_config(&cfg);
        let r = compose(&sample_state(), "2024-01-02 03:04:05".into());

        let written: Vec<PathBuf> = sink.export(&r).into_iter().map(|o| o.unwrap()).collect();
        assert_eq!(written.len(), 2);
        let json = fs::read_to_string(dir.join("mission_report.json")).unwrap();
        assert!(json.contains("\"distance_traveled_AU\""));
        let text = fs::read_to_string(dir.join("mission_report.txt")).unwrap();
        assert!(text.starts_with("MISSION REPORT"));
        let _ = fs::remove_dir_all(&dir);
    }

    struct FailingSink;

    impl ReportSink for FailingSink {
        fn export(&self, _: &MissionReport) -> Vec<Result<PathBuf, ReportError>> {
            vec![Err(ReportError::Write {
                path: PathBuf::from("/dev/null/report.json"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })]
        }
    }

    #[test]
    fn finalize_survives_export_failure() {
        let mut s = sample_state();
        finalize(&mut s, &FailingSink);
        assert!(s.report.is_some());
        assert!(s.report_paths.is_empty());
        assert_eq!(s.report.as_ref().map(|r| r.score), Some(420));
    }

    #[test]
    fn file_sink_reports_unwritable_path() {
        let dir = std::env::temp_dir().join("voyager-no-such-dir").join("nested");
        let cfg = ReportConfig { dir, ..ReportConfig::default() };
        let sink = FileReportSink::from_config(&cfg);
        let r = compose(&sample_state(), "2024-01-02 03:04:05".into());
        let outcomes = sink.export(&r);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| matches!(o, Err(ReportError::Write { .. }))));
    }

    #[test]
    fn text_form_is_written_when_json_path_fails() {
        let dir = std::env::temp_dir().join(format!("voyager-partial-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let sink = FileReportSink {
            json_path: dir.join("missing").join("mission_report.json"),
            text_path: dir.join("mission_report.txt"),
        };
        let mut s = sample_state();
        finalize(&mut s, &sink);

        assert_eq!(s.report_paths, vec![dir.join("mission_report.txt")]);
        let text = fs::read_to_string(dir.join("mission_report.txt")).unwrap();
        assert!(text.starts_with("MISSION REPORT"));
        assert!(!dir.join("missing").exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
