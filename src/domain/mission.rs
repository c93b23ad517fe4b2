/// Missions: procedurally generated star systems and the tasks that target them.
///
/// Tasks refer to their system by name. A task's system name always matches
/// exactly one system of the same mission, and a mission always has between
/// 2 and `systems.len()` tasks.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::catalog;

/// Immutable planet descriptor.
#[derive(Clone, Debug)]
pub struct Planet {
    pub name: String,
    pub kind: &'static str,
    pub atmosphere: &'static str,
    pub life: &'static str,
    pub description: &'static str,
    pub art: &'static [&'static str],
}

#[derive(Clone, Debug)]
pub struct StarSystem {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub planets: Vec<Planet>,
    pub history: String,
    pub threat: Option<&'static str>,
}

impl StarSystem {
    pub fn distance_to(&self, x: i32, y: i32) -> f64 {
        let dx = (self.x - x) as f64;
        let dy = (self.y - y) as f64;
        dx.hypot(dy)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Task {
    pub system: String,
    pub task: &'static str,
    pub done: bool,
    pub reward: u64,
}

#[derive(Clone, Debug)]
pub struct Mission {
    pub galaxy: &'static str,
    pub systems: Vec<StarSystem>,
    pub tasks: Vec<Task>,
    pub assigned_by: &'static str,
}

impl Mission {
    /// First task that is still open, in list order.
    pub fn next_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| !t.done)
    }

    pub fn is_complete(&self) -> bool {
        self.tasks.iter().all(|t| t.done)
    }

    /// First system (in list order) within `radius` of `(x, y)`.
    /// List order wins over distance.
    pub fn system_in_range(&self, x: i32, y: i32, radius: f64) -> Option<usize> {
        self.systems.iter().position(|s| s.distance_to(x, y) <= radius)
    }

    /// Open task targeting the named system, if any.
    pub fn open_task_for(&mut self, system: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.system == system && !t.done)
    }
}

// ── Visited report ──

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisitRecord {
    pub system: String,
    pub task: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct GalaxyVisits {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub systems: Vec<VisitRecord>,
}

/// Galaxy name → completed scans there. Append-only for the whole session.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct VisitedReport(BTreeMap<String, GalaxyVisits>);

impl VisitedReport {
    /// One empty entry per catalog galaxy.
    pub fn new() -> Self {
        let map = catalog::GALAXIES
            .iter()
            .map(|g| (g.name.to_string(), GalaxyVisits { kind: g.kind, systems: vec![] }))
            .collect();
        VisitedReport(map)
    }

    pub fn record(&mut self, galaxy: &str, system: &str, task: &str) {
        let entry = self.0.entry(galaxy.to_string()).or_insert_with(|| GalaxyVisits {
            kind: catalog::galaxy_by_name(galaxy).map(|g| g.kind).unwrap_or("Unknown"),
            systems: vec![],
        });
        entry.systems.push(VisitRecord { system: system.to_string(), task: task.to_string() });
    }

    pub fn visits(&self, galaxy: &str) -> &[VisitRecord] {
        self.0.get(galaxy).map(|g| g.systems.as_slice()).unwrap_or(&[])
    }

    pub fn has_visits(&self, galaxy: &str) -> bool {
        !self.visits(galaxy).is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &GalaxyVisits)> {
        self.0.iter()
    }
}

impl Default for VisitedReport {
    fn default() -> Self {
        VisitedReport::new()
    }
}

// ── Generation ──

fn pick(rng: &mut impl Rng, pool: &'static [&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or("")
}

fn make_planet(rng: &mut impl Rng, idx: usize) -> Planet {
    let art = catalog::PLANET_ARTS.choose(rng).copied().unwrap_or(&[]);
    Planet {
        name: format!("Planet-{}", (b'A' + (idx % 26) as u8) as char),
        kind: pick(rng, catalog::PLANET_TYPES),
        atmosphere: pick(rng, catalog::ATMOSPHERES),
        life: pick(rng, catalog::LIFE_SIGNS),
        description: pick(rng, catalog::PLANET_DESCRIPTIONS),
        art,
    }
}

/// Systems are placed in `[6, w-8] × [4, h-6]` (collapsed on tiny canvases).
pub fn make_star_system(rng: &mut impl Rng, index: usize, w: i32, h: i32) -> StarSystem {
    let x = rng.gen_range(6..=(w - 8).max(6));
    let y = rng.gen_range(4..=(h - 6).max(4));
    let prefix = pick(rng, catalog::SYSTEM_PREFIXES);
    let name = format!("Sys-{}-{}", prefix, index);
    let planet_count = rng.gen_range(1..=4);
    let planets = (0..planet_count).map(|j| make_planet(rng, j)).collect();
    let history = catalog::SYSTEM_HISTORIES
        .choose(rng)
        .map(|t| t.replace("{}", &name))
        .unwrap_or_default();
    let threat = catalog::THREATS.choose(rng).copied().flatten();
    StarSystem { name, x, y, planets, history, threat }
}

/// Build a mission for `galaxy`: 4–6 systems, at least half of them (and at
/// least two) targeted.
pub fn generate(rng: &mut impl Rng, galaxy: &'static str, w: i32, h: i32, reward: u64) -> Mission {
    let n = rng.gen_range(4..=6);
    let systems: Vec<StarSystem> = (1..=n).map(|i| make_star_system(rng, i, w, h)).collect();

    let k = n.div_ceil(2).max(2);
    let tasks = systems
        .choose_multiple(rng, k)
        .map(|s| Task {
            system: s.name.clone(),
            task: pick(rng, catalog::TASK_TYPES),
            done: false,
            reward,
        })
        .collect();

    Mission { galaxy, systems, tasks, assigned_by: catalog::ASSIGNING_AUTHORITY }
}
