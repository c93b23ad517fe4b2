/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Compose the next frame into the `front` canvas, layer by layer
///   2. Compare each cell with the `back` canvas (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Composition is a pure function of the session (`compose`), so screens can
/// be inspected in tests without a terminal. Cosmetic warp streaks are the one
/// exception: they come from `thread_rng`.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use rand::Rng;

use crate::domain::catalog;
use crate::domain::star::{DepthTier, WARP_STREAK};
use crate::sim::world::{Phase, SessionState, MIN_HEIGHT, MIN_WIDTH};
use super::canvas::{text_width, truncate, Canvas, Cell};

/// Explicit background for every cell, so cleared areas and drawn areas match.
const BASE_BG: Color = Color::Rgb { r: 6, g: 6, b: 18 };

const FUEL_BAR_CELLS: usize = 24;
const HUD_RIGHT_WIDTH: i32 = 36;
const MISSION_PANEL_TOP: i32 = 3;
const MISSION_PANEL_H: i32 = 8;
const WARP_STREAKS: usize = 80;
const HELP_LINE: &str =
    "(Arrows/WASD move, +/- speed, X=scan, Z=warp, P=pickup, G=GALAXY MAP, I=AI Hints, L=log, Q=quit)";

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: Canvas,
    back: Canvas,
    last_phase: Option<Phase>,
    active: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: Canvas::new(0, 0),
            back: Canvas::new(0, 0),
            last_phase: None,
            active: false,
        }
    }

    /// Current terminal size, with a conventional fallback.
    pub fn size() -> (i32, i32) {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        (w as i32, h as i32)
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BASE_BG),
            Clear(ClearType::All)
        )?;

        let (w, h) = Self::size();
        self.front.resize(w, h);
        self.back.resize(w, h);
        // Force full repaint on first frame.
        self.back.fill(Cell::INVALID);
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.writer,
            SetAttribute(Attribute::Reset),
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, state: &mut SessionState) -> io::Result<()> {
        let (w, h) = Self::size();
        if w != self.front.width() || h != self.front.height() {
            self.front.resize(w, h);
            self.back.resize(w, h);
            self.back.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
        }
        state.resize(w, h);

        if self.last_phase != Some(state.phase) {
            self.back.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
            self.last_phase = Some(state.phase);
        }

        self.front.clear();
        compose(&mut self.front, state);

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bold = false;
        let mut need_move = true;
        let mut last_x: i32 = 0;
        let mut last_y: i32 = 0;

        queue!(
            self.writer,
            SetAttribute(Attribute::NormalIntensity),
            SetForegroundColor(Color::White),
            SetBackgroundColor(BASE_BG),
        )?;

        for y in 0..self.front.height() {
            let mut x = 0;
            while x < self.front.width() {
                let cell = self.front.get(x, y);
                let prev = self.back.get(x, y);

                if cell.cont {
                    if cell != prev { need_move = true; }
                    x += 1;
                    continue;
                }

                let cont_changed = cell.wide && self.front.get(x + 1, y) != self.back.get(x + 1, y);
                if cell == prev && !cont_changed {
                    need_move = true;
                    x += 1;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bold != last_bold {
                    let attr = if cell.bold { Attribute::Bold } else { Attribute::NormalIntensity };
                    queue!(self.writer, SetAttribute(attr))?;
                    last_bold = cell.bold;
                }

                queue!(self.writer, Print(cell.ch))?;

                if cell.wide {
                    last_x = x + 1;
                    x += 2;
                } else {
                    last_x = x;
                    x += 1;
                }
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

// ── Compose: build a frame from the session ──

pub fn compose(c: &mut Canvas, s: &SessionState) {
    match s.phase {
        Phase::Briefing => compose_briefing(c, s),
        Phase::Playing if s.is_too_small() => compose_too_small(c),
        Phase::Playing => compose_flight(c, s),
        Phase::Debrief => compose_debrief(c, s),
    }
}

fn compose_too_small(c: &mut Canvas) {
    let msg = format!("Terminal too small — resize to at least {MIN_WIDTH}x{MIN_HEIGHT}");
    c.put_str(0, 0, &msg, Color::Red, true);
    c.put_str(0, 1, "Press Q to quit.", Color::White, false);
}

fn compose_flight(c: &mut Canvas, s: &SessionState) {
    compose_stars(c, s);
    compose_galaxy_sprites(c, s);
    compose_systems(c, s);
    compose_power_packs(c, s);
    compose_ship(c, s);
    compose_hud(c, s);
    compose_crew_log(c, s);
    compose_mission_panel(c, s);
    if s.show_ai {
        compose_ai_panel(c, s);
    }
    if s.show_map {
        compose_map_panel(c, s);
    }
    if s.copilot_is_fresh() {
        let msg = truncate(&s.copilot.message, (c.width() - 4).max(0) as usize);
        c.put_str(2, c.height() - 2, &msg, Color::Yellow, true);
    }
    c.put_str(2, c.height() - 1, HELP_LINE, Color::DarkGrey, false);
    if s.show_log {
        compose_log_popup(c, s);
    }
    if s.is_warping() {
        compose_warp_overlay(c);
    }
    if let Some(banner) = &s.banner {
        let y = c.height() / 2;
        let x = (c.width() - text_width(&banner.text)) / 2;
        c.clear_rect(x - 2, y, text_width(&banner.text) + 4, 1);
        c.put_centered(y, &banner.text, Color::Cyan, true);
    }
}

fn compose_stars(c: &mut Canvas, s: &SessionState) {
    let view = s.viewport();
    for star in &s.field.stars {
        let (sx, sy) = view.project(star.x, star.y, star.z);
        if !view.contains(sx, sy) { continue; }
        if s.field.warp_mode {
            c.put_char(sx, sy, WARP_STREAK, Color::Cyan, false);
            continue;
        }
        let tier = star.tier(s.field.z_max);
        let (fg, bold) = match tier {
            DepthTier::Near => (Color::White, true),
            DepthTier::Mid => (Color::Grey, false),
            DepthTier::Far => (Color::DarkGrey, false),
        };
        c.put_char(sx, sy, tier.glyph(), fg, bold);
    }
}

fn compose_galaxy_sprites(c: &mut Canvas, s: &SessionState) {
    let view = s.viewport();
    for sprite in &s.field.sprites {
        // Projected point is the art's top-left corner.
        let (sx, sy) = view.project(sprite.x, sprite.y, sprite.z);
        for (i, line) in sprite.art.iter().enumerate() {
            c.put_str(sx, sy + i as i32, line, Color::Blue, false);
        }
        c.put_str(sx, sy + sprite.art.len() as i32, sprite.name, Color::DarkGrey, false);
    }
}

fn compose_systems(c: &mut Canvas, s: &SessionState) {
    for sys in &s.mission.systems {
        let fg = if sys.threat.is_some() { Color::Red } else { Color::Yellow };
        c.put_char(sys.x, sys.y, '◎', fg, true);
        c.put_str(sys.x - 4, sys.y + 1, &truncate(&sys.name, 12), Color::White, false);
        if let Some(planet) = sys.planets.first() {
            for (i, line) in planet.art.iter().enumerate() {
                let x = sys.x - text_width(line) / 2;
                c.put_str(x, sys.y + 2 + i as i32, line, Color::Green, false);
            }
        }
    }
}

fn compose_power_packs(c: &mut Canvas, s: &SessionState) {
    let glyph = if (s.clock * 2.0) as i64 % 2 == 0 { '⚡' } else { '*' };
    for pack in &s.packs.packs {
        c.put_char(pack.x, pack.y, glyph, Color::Yellow, true);
    }
}

fn compose_ship(c: &mut Canvas, s: &SessionState) {
    for (i, line) in s.ship.art.iter().enumerate() {
        c.put_str(s.ship.x, s.ship.y + i as i32, line, Color::Magenta, true);
    }
}

fn fuel_bar(fuel: f64, max: f64) -> String {
    let ratio = if max > 0.0 { (fuel / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * FUEL_BAR_CELLS as f64).round() as usize;
    format!(
        "[{}{}] {:.0}",
        "█".repeat(filled),
        " ".repeat(FUEL_BAR_CELLS - filled),
        fuel
    )
}

fn compose_hud(c: &mut Canvas, s: &SessionState) {
    let target = s
        .mission
        .next_task()
        .map(|t| t.system.clone())
        .unwrap_or_else(|| "-".to_string());
    c.put_str(2, 0, &format!("Galaxy: {}", s.galaxy().name), Color::Cyan, true);
    c.put_str(28, 0, &format!("Target: {target}"), Color::White, false);

    let fuel = &s.tuning.fuel;
    let fuel_fg = if s.ship.fuel > fuel.max * 0.25 { Color::Green } else { Color::Red };
    c.put_str(2, 1, "Fuel: ", Color::White, false);
    c.put_str(8, 1, &fuel_bar(s.ship.fuel, fuel.max), fuel_fg, false);
    c.put_str(2, 2, &format!("Speed: {:.1}x", s.speed), Color::White, false);

    let rx = c.width() - HUD_RIGHT_WIDTH;
    c.put_str(rx, 0, &format!("Score: {}", s.ship.score), Color::White, true);
    c.put_str(rx, 1, &format!("Distance: {:.3} AU", s.ship.distance), Color::White, false);
    c.put_str(rx, 2, &format!("Energy used: {:.1}", s.ship.energy), Color::White, false);
}

fn compose_crew_log(c: &mut Canvas, s: &SessionState) {
    let max_len = (c.width() / 2 - 4).clamp(20, 48) as usize;
    for (i, line) in s.recent_log(3).iter().enumerate() {
        c.put_str(2, 3 + i as i32, &truncate(line, max_len), Color::DarkGrey, false);
    }
}

fn compose_mission_panel(c: &mut Canvas, s: &SessionState) {
    let panel_w = (c.width() / 3).clamp(28, 42);
    let left = c.width() - panel_w - 2;
    let top = MISSION_PANEL_TOP;
    c.draw_box(left, top, panel_w, MISSION_PANEL_H, Some("MISSION"), Color::Cyan);

    let room = (panel_w - 4).max(0) as usize;
    let x = left + 2;
    c.put_str(x, top + 1, &truncate(&format!("Galaxy: {}", s.mission.galaxy), room), Color::White, false);
    c.put_str(x, top + 2, &truncate(&format!("Assigned by: {}", s.mission.assigned_by), room), Color::White, false);
    for (i, t) in s.mission.tasks.iter().take(3).enumerate() {
        let mark = if t.done { '✓' } else { ' ' };
        let line = format!("[{mark}] {} @ {}", t.task, t.system);
        let fg = if t.done { Color::Green } else { Color::White };
        c.put_str(x, top + 3 + i as i32, &truncate(&line, room), fg, false);
    }
    if s.mission.tasks.len() > 3 {
        let more = format!("... +{} more", s.mission.tasks.len() - 3);
        c.put_str(x, top + 6, &more, Color::DarkGrey, false);
    }
}

fn compose_ai_panel(c: &mut Canvas, s: &SessionState) {
    let top = MISSION_PANEL_TOP + MISSION_PANEL_H + 1;
    let w = (c.width() - 8).min(48);
    c.draw_box(2, top, w, 4, Some("AI"), Color::Magenta);

    let room = (w - 4).max(1) as usize;
    let chars: Vec<char> = s.copilot.message.chars().collect();
    for (i, chunk) in chars.chunks(room).take(2).enumerate() {
        let line: String = chunk.iter().collect();
        c.put_str(4, top + 1 + i as i32, &line, Color::White, false);
    }
}

fn compose_map_panel(c: &mut Canvas, s: &SessionState) {
    let w = (c.width() / 4).clamp(26, 36);
    let h = catalog::GALAXIES.len() as i32 + 2;
    let top = c.height() - h - 2;
    c.draw_box(2, top, w, h, Some("GALAXY MAP"), Color::Blue);

    for (i, g) in catalog::GALAXIES.iter().enumerate() {
        let cursor = if i == s.galaxy_idx { '▶' } else { ' ' };
        let y = top + 1 + i as i32;
        let end = c.put_str(4, y, &format!("{cursor} {}", g.name), Color::White, i == s.galaxy_idx);
        if s.visited.has_visits(g.name) {
            c.put_str(end + 1, y, "✅", Color::Green, false);
        }
    }
}

fn compose_log_popup(c: &mut Canvas, s: &SessionState) {
    let w = (c.width() - 4).min(64);
    let h = 6;
    let left = (c.width() - w) / 2;
    let top = (c.height() - h) / 2;
    c.draw_box(left, top, w, h, Some("CREW LOG"), Color::White);
    let room = (w - 4).max(0) as usize;
    for (i, line) in s.recent_log(4).iter().enumerate() {
        c.put_str(left + 2, top + 1 + i as i32, &truncate(line, room), Color::White, false);
    }
}

fn compose_warp_overlay(c: &mut Canvas) {
    if c.width() < 2 || c.height() < 2 {
        return;
    }
    let mut rng = rand::thread_rng();
    const GLYPHS: [char; 4] = ['/', '\\', '|', '-'];
    for _ in 0..WARP_STREAKS {
        let x = rng.gen_range(0..c.width());
        let y = rng.gen_range(0..c.height());
        let g = GLYPHS[rng.gen_range(0..GLYPHS.len())];
        c.put_char(x, y, g, Color::Cyan, false);
    }
    c.put_centered(c.height() / 2, "🚀 WARP ENGAGED 🚀", Color::White, true);
}

fn compose_briefing(c: &mut Canvas, s: &SessionState) {
    let title = "VOYAGER - Galactic Odyssey";
    let box_w = text_width(title) + 6;
    let left = (c.width() - box_w) / 2;
    c.draw_box(left, 1, box_w, 3, None, Color::Cyan);
    c.put_str(left + 3, 2, title, Color::Cyan, true);

    let g = s.galaxy();
    let x = 4;
    c.put_str(x, 5, "EARTH COMMAND - MISSION BRIEF", Color::Yellow, true);
    c.put_str(x, 7, "Hello! Commander of the Voyager", Color::White, false);
    c.put_str(x, 8, "Here is your next mission....", Color::White, false);
    c.put_str(x, 10, &format!("Galaxy: {} ({}, {}, {})", g.name, g.kind, g.distance, g.faction), Color::White, true);
    c.put_str(x, 12, "Objectives:", Color::White, true);
    let mut y = 13;
    for t in &s.mission.tasks {
        let line = format!(" - {} @ {} (Reward: {})", t.task, t.system, t.reward);
        c.put_str(x, y, &line, Color::White, false);
        y += 1;
    }
    c.put_str(x, y + 1, "Press any key to accept mission and commence launch...", Color::Blue, true);
}

fn compose_debrief(c: &mut Canvas, s: &SessionState) {
    let x = 4;
    c.put_str(x, 1, "🖖 MISSION REPORT - EARTH COMMAND 🖖", Color::Cyan, true);

    let (galaxy, score, distance, energy) = match &s.report {
        Some(r) => (r.current_mission.clone(), r.score, r.distance_traveled_au, r.energy_consumed),
        None => (s.mission.galaxy.to_string(), s.ship.score, s.ship.distance, s.ship.energy),
    };
    c.put_str(x, 3, &format!("Galaxy: {galaxy}"), Color::White, false);
    c.put_str(x, 4, &format!("Score: {score}"), Color::White, false);
    c.put_str(x, 5, &format!("Distance (AU): {distance:.3}"), Color::White, false);
    c.put_str(x, 6, &format!("Energy consumed: {energy:.2}"), Color::White, false);
    c.put_str(x, 7, &format!("Missions completed: {}", s.archive.len()), Color::White, false);

    if s.report_paths.is_empty() {
        c.put_str(x, 9, "Report could not be saved (see voyager.log).", Color::Red, false);
    } else {
        let names: Vec<String> = s
            .report_paths
            .iter()
            .map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default())
            .collect();
        c.put_str(x, 9, &format!("Saved {}", names.join(" / ")), Color::Green, false);
    }
    c.put_str(x, 11, "Press any key to exit.", Color::Blue, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::domain::entity::PowerPack;
    use crate::domain::star::GalaxySprite;
    use std::path::PathBuf;

    fn state(phase: Phase, w: i32, h: i32) -> SessionState {
        let mut s = SessionState::new(Tuning::default(), 17, w, h);
        s.phase = phase;
        s
    }

    fn screen(s: &SessionState) -> Canvas {
        let mut c = Canvas::new(s.width, s.height);
        compose(&mut c, s);
        c
    }

    fn all_text(c: &Canvas) -> String {
        (0..c.height()).map(|y| c.row_text(y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn too_small_canvas_prompts_for_resize() {
        let s = state(Phase::Playing, 60, 15);
        let c = screen(&s);
        assert!(c.row_text(0).starts_with("Terminal too small"));
        assert!(c.row_text(0).contains("70x20"));
        assert!(c.row_text(1).starts_with("Press Q to quit."));
    }

    #[test]
    fn hud_shows_galaxy_and_full_fuel_bar() {
        let s = state(Phase::Playing, 120, 40);
        let c = screen(&s);
        assert!(c.row_text(0).contains(&format!("Galaxy: {}", s.galaxy().name)));
        let fuel_row = c.row_text(1);
        assert!(fuel_row.contains(&format!("[{}] 1000", "█".repeat(24))));
        assert!(c.row_text(0).contains("Score: 0"));
        assert!(c.row_text(1).contains("Distance: 0.000 AU"));
    }

    #[test]
    fn fuel_bar_rounds_to_cells() {
        assert_eq!(fuel_bar(500.0, 1000.0), format!("[{}{}] 500", "█".repeat(12), " ".repeat(12)));
        assert_eq!(fuel_bar(0.0, 1000.0), format!("[{}] 0", " ".repeat(24)));
    }

    #[test]
    fn system_marker_label_and_ship_are_drawn() {
        let mut s = state(Phase::Playing, 120, 40);
        s.mission.systems[0].x = 20;
        s.mission.systems[0].y = 24;
        s.mission.systems[0].threat = None;
        for other in s.mission.systems.iter_mut().skip(1) {
            other.x = 100;
            other.y = 5;
        }
        s.ship.x = 60;
        s.ship.y = 30;
        let c = screen(&s);
        assert_eq!(c.char_at(20, 24), '◎');
        assert_eq!(c.get(20, 24).fg, Color::Yellow);
        let label = truncate(&s.mission.systems[0].name, 12);
        assert!(c.row_text(25).contains(&label));
        assert!(c.row_text(30).contains(s.ship.art[0].trim()));
    }

    #[test]
    fn galaxy_sprite_art_hangs_from_its_projected_corner() {
        const ART: &[&str] = &["ABCDEFGH", "IJKLMNOP", "QRSTUVWX"];
        let mut s = state(Phase::Playing, 120, 40);
        for sys in &mut s.mission.systems {
            sys.x = -100;
        }
        s.ship.x = 110;
        s.ship.y = 38;
        s.field.stars.clear();
        let view = s.viewport();
        let mut sprite = GalaxySprite::new("Whirlpool", ART, &mut s.rng, view, 8.0);
        sprite.x = 0.5;
        sprite.y = 0.25;
        sprite.z = 2.0;
        let (sx, sy) = view.project(sprite.x, sprite.y, sprite.z);
        s.field.sprites.push_back(sprite);

        let c = screen(&s);
        assert_eq!(c.char_at(sx, sy), 'A');
        assert_eq!(c.char_at(sx, sy + 1), 'I');
        assert_eq!(c.char_at(sx + 7, sy + 2), 'X');
        assert_eq!(c.char_at(sx, sy + 3), 'W');
        assert_eq!(c.char_at(sx + 8, sy + 3), 'l');
    }

    #[test]
    fn power_pack_blinks() {
        let mut s = state(Phase::Playing, 120, 40);
        s.packs.packs.push(PowerPack::new(30, 20, 0.0));
        s.clock = 0.1;
        assert_eq!(screen(&s).char_at(30, 20), '⚡');
        s.clock = 0.6;
        assert_eq!(screen(&s).char_at(30, 20), '*');
    }

    #[test]
    fn panels_follow_toggles() {
        let mut s = state(Phase::Playing, 120, 40);
        s.show_ai = false;
        s.show_map = false;
        let text = all_text(&screen(&s));
        assert!(text.contains("[ MISSION ]"));
        assert!(!text.contains("[ AI ]"));
        assert!(!text.contains("[ GALAXY MAP ]"));

        s.show_ai = true;
        s.show_map = true;
        let galaxy = s.galaxy().name;
        s.visited.record(galaxy, "Sys-Tau-1", "Collect sample");
        let text = all_text(&screen(&s));
        assert!(text.contains("[ AI ]"));
        assert!(text.contains("[ GALAXY MAP ]"));
        assert!(text.contains(&format!("▶ {galaxy} ✅")));
    }

    #[test]
    fn fresh_copilot_message_goes_on_status_bar() {
        let mut s = state(Phase::Playing, 120, 40);
        s.say("ANDROID AI: Not enough fuel for warp.");
        let c = screen(&s);
        assert!(c.row_text(38).contains("Not enough fuel for warp."));
        assert!(c.row_text(39).contains("X=scan"));
    }

    #[test]
    fn crew_log_popup_and_warp_overlay() {
        let mut s = state(Phase::Playing, 120, 40);
        s.show_log = true;
        let text = all_text(&screen(&s));
        assert!(text.contains("[ CREW LOG ]"));

        s.show_log = false;
        s.warp_remaining = 1.0;
        s.field.warp_mode = true;
        let c = screen(&s);
        assert!(c.row_text(20).contains("WARP ENGAGED"));
    }

    #[test]
    fn briefing_lists_objectives() {
        let s = state(Phase::Briefing, 120, 40);
        let text = all_text(&screen(&s));
        assert!(text.contains("VOYAGER - Galactic Odyssey"));
        assert!(text.contains("EARTH COMMAND - MISSION BRIEF"));
        for t in &s.mission.tasks {
            assert!(text.contains(&format!(" - {} @ {} (Reward: 200)", t.task, t.system)));
        }
        assert!(text.contains("Press any key to accept mission"));
    }

    #[test]
    fn debrief_reports_save_outcome() {
        let mut s = state(Phase::Debrief, 120, 40);
        let text = all_text(&screen(&s));
        assert!(text.contains("MISSION REPORT - EARTH COMMAND"));
        assert!(text.contains("could not be saved"));

        s.report_paths = vec![PathBuf::from("out/mission_report.json"), PathBuf::from("out/mission_report.txt")];
        let text = all_text(&screen(&s));
        assert!(text.contains("Saved mission_report.json / mission_report.txt"));
        assert!(text.contains("Press any key to exit."));
    }
}
