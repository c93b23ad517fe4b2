/// The step function: advances the session by one tick.
///
/// Processing order:
///   1. Clock advance, one-frame crew-log popup cleared
///   2. Player action (at most one per tick)
///   3. Fuel drain and distance
///   4. Parallax field and galaxy sprites
///   5. Power packs: spawn, expire
///   6. Warp cinematic timer
///   7. Mission effects (all tasks done → next galaxy)
///   8. Copilot idle hints
///
/// While the warp cinematic runs only Quit is honoured and no packs spawn.
/// Fuel and distance keep accruing and the field moves in warp mode.
///
/// A canvas below the minimum size pauses the session entirely: the clock
/// stands still and only Quit is honoured.

use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::domain::catalog;
use crate::domain::entity::Action;
use super::event::GameEvent;
use super::resources;
use super::world::{Phase, SessionState};

const ARRIVAL_BANNER_SECS: f64 = 0.9;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn tick(state: &mut SessionState, action: Option<Action>, dt: f64) -> Vec<GameEvent> {
    if state.phase != Phase::Playing { return vec![]; }

    let mut events: Vec<GameEvent> = Vec::new();
    if state.is_too_small() {
        if action == Some(Action::Quit) {
            info!("quit requested while paused for resize");
            state.phase = Phase::Debrief;
        }
        return events;
    }

    state.clock += dt;
    state.show_log = false;
    if state.banner.as_ref().is_some_and(|b| state.clock >= b.until) {
        state.banner = None;
    }

    if let Some(action) = action {
        if action == Action::Quit {
            info!("quit requested at t={:.1}s", state.clock);
            state.phase = Phase::Debrief;
            return events;
        }
        if !state.is_warping() {
            apply_action(state, action, &mut events);
        }
    }

    resources::consume(&mut state.ship, &state.tuning.fuel, state.speed, dt);
    resolve_field(state, dt);
    resolve_power_packs(state, &mut events);
    resolve_warp_timer(state, dt, &mut events);
    resolve_mission(state, &mut events);
    resolve_copilot(state);

    events
}

// ══════════════════════════════════════════════════════════════
// Actions
// ══════════════════════════════════════════════════════════════

fn apply_action(state: &mut SessionState, action: Action, events: &mut Vec<GameEvent>) {
    match action {
        Action::Move(dir) => {
            let (w, h) = (state.width, state.height);
            state.ship.nudge(dir, w, h);
        }
        Action::SpeedUp => {
            let flight = &state.tuning.flight;
            state.speed = flight.clamp_speed(state.speed + flight.speed_step);
        }
        Action::SpeedDown => {
            let flight = &state.tuning.flight;
            state.speed = flight.clamp_speed(state.speed - flight.speed_step);
        }
        Action::ToggleAi => state.show_ai = !state.show_ai,
        Action::ToggleMap => state.show_map = !state.show_map,
        Action::ShowLog => state.show_log = true,
        Action::Pickup => pickup(state, events),
        Action::Scan => scan(state, events),
        Action::Warp => warp(state, events),
        Action::Quit => {}
    }
}

/// Collect the first live pack within the pickup radius, if any.
pub fn pickup(state: &mut SessionState, events: &mut Vec<GameEvent>) {
    let tuning = &state.tuning;
    let Some(pack) = resources::collect(&mut state.ship, &mut state.packs, &tuning.spawn, &tuning.fuel)
    else {
        return;
    };
    state.say("ANDROID AI: Power cache secured. Energy redistributed.");
    events.push(GameEvent::PowerPackCollected { x: pack.x, y: pack.y });
}

/// Scan the first system (in list order) within the scan radius.
///
/// An open task there is completed and rewarded; otherwise the scan is a
/// plain discovery. Either way the scan cost is charged first. Without
/// enough fuel nothing changes but the copilot message.
pub fn scan(state: &mut SessionState, events: &mut Vec<GameEvent>) {
    let radius = state.tuning.mission.scan_radius;
    let Some(idx) = state.mission.system_in_range(state.ship.x, state.ship.y, radius) else {
        state.say("ANDROID AI: No nearby system to scan. Move closer to a star-system marker.");
        events.push(GameEvent::NothingToScan);
        return;
    };

    if !state.ship.try_spend(state.tuning.fuel.scan_cost) {
        state.say("ANDROID AI: Insufficient fuel to scan.");
        events.push(GameEvent::ScanRefused);
        return;
    }

    let system = state.mission.systems[idx].name.clone();
    let galaxy = state.mission.galaxy;

    if let Some(task) = state.mission.open_task_for(&system) {
        task.done = true;
        let (kind, reward) = (task.task, task.reward);
        state.ship.score += reward;
        state.visited.record(galaxy, &system, kind);
        state.say(format!(
            "ANDROID AI: Task '{kind}' completed at {system}. +{reward} pts."
        ));
        state.log(format!("Science: {kind} complete at {system}."));
        debug!("task '{kind}' done at {system} ({galaxy})");
        events.push(GameEvent::TaskCompleted { system, task: kind, reward });
    } else {
        state.ship.score += state.tuning.mission.discovery_reward;
        let scanned = &state.mission.systems[idx];
        let history = scanned.history.clone();
        let survey = scanned.planets.first().map(|p| {
            format!(
                "Science: {} at {system}: {}, {}, atmosphere {}, life {}.",
                p.name, p.description, p.kind, p.atmosphere, p.life
            )
        });
        state.say(format!("ANDROID AI: Scanned {system}. {history}"));
        if let Some(line) = survey {
            state.log(line);
        }
        events.push(GameEvent::SystemScanned { system });
    }
}

/// Jump to the next galaxy in catalog order. Refused without side effects
/// when the tank cannot cover the warp cost.
pub fn warp(state: &mut SessionState, events: &mut Vec<GameEvent>) {
    let cost = state.tuning.fuel.warp_cost();
    if !state.ship.try_spend(cost) {
        state.say("ANDROID AI: Not enough fuel for warp.");
        events.push(GameEvent::WarpRefused);
        return;
    }

    let from = state.galaxy().name;
    let galaxy = state.advance_galaxy();
    state.warp_remaining = state.tuning.mission.warp_duration_secs;
    state.field.warp_mode = true;
    state.say("ANDROID AI: Initiating warp jump. Hold on!");
    state.log(format!("Navigator: Warp from {from} to {galaxy}."));
    info!("warp {from} -> {galaxy}, fuel left {:.2}", state.ship.fuel);
    events.push(GameEvent::WarpEngaged { galaxy });
}

// ══════════════════════════════════════════════════════════════
// Per-tick resolution
// ══════════════════════════════════════════════════════════════

fn resolve_field(state: &mut SessionState, dt: f64) {
    let view = state.viewport();
    let visual = state.visual_speed();
    let clock = state.clock;
    state.field.advance(&mut state.rng, dt, visual, clock, view);

    let chance = state.tuning.spawn.galaxy_chance;
    let galaxy = state.galaxy();
    state.field.maybe_spawn_sprite(&mut state.rng, chance, galaxy, view);
}

fn resolve_power_packs(state: &mut SessionState, events: &mut Vec<GameEvent>) {
    let spawn = &state.tuning.spawn;
    for pack in state.packs.expire(state.clock, spawn.power_life_secs) {
        events.push(GameEvent::PowerPackExpired { x: pack.x, y: pack.y });
    }
    if state.is_warping() { return; }

    let chance = state.tuning.spawn.power_chance;
    if let Some((x, y)) = state.packs.maybe_spawn(&mut state.rng, chance, state.clock, state.width, state.height) {
        events.push(GameEvent::PowerPackSpawned { x, y });
    }
}

fn resolve_warp_timer(state: &mut SessionState, dt: f64, events: &mut Vec<GameEvent>) {
    if !state.is_warping() { return; }
    state.warp_remaining -= dt;
    if state.warp_remaining > 0.0 { return; }

    state.warp_remaining = 0.0;
    state.field.warp_mode = false;
    let galaxy = state.galaxy().name;
    state.show_banner(format!("Entering {galaxy}..."), ARRIVAL_BANNER_SECS);
    events.push(GameEvent::WarpFinished { galaxy });
}

/// A mission whose tasks are all done is archived and the ship moves on to
/// the next galaxy at no fuel cost.
fn resolve_mission(state: &mut SessionState, events: &mut Vec<GameEvent>) {
    if !state.mission.is_complete() { return; }

    let done = state.mission.galaxy;
    let reward_line = format!("Earth Command: All objectives in {done} complete.");
    let next = state.advance_galaxy();
    state.say(format!("ANDROID AI: Mission in {done} complete. Plotting course to {next}."));
    state.log(reward_line);
    state.show_banner(format!("Entering {next}..."), ARRIVAL_BANNER_SECS);
    info!("mission in {done} complete; next galaxy {next}");
    events.push(GameEvent::MissionComplete { galaxy: done });
}

/// Occasional idle chatter while the AI panel is open.
fn resolve_copilot(state: &mut SessionState) {
    if !state.show_ai || state.copilot_is_fresh() { return; }
    let mission = &state.tuning.mission;
    if state.clock - state.copilot.last_hint <= mission.hint_interval_secs { return; }
    let chance = mission.hint_chance;
    if state.roll() >= chance { return; }

    let pool: Vec<&str> = catalog::COPILOT_PERSONA
        .iter()
        .chain(catalog::AI_HINTS.iter())
        .copied()
        .collect();
    if let Some(hint) = pool.choose(&mut state.rng).copied() {
        state.say(hint);
    }
    state.copilot.last_hint = state.clock;
}
