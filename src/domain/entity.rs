/// Entities: the player's ship, power packs, and the player's actions.

/// Movement direction (one cell per key press).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Left,
    Right,
    Up,
    Down,
}

/// One decoded player command. At most one is consumed per tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Move(MoveDir),
    SpeedUp,
    SpeedDown,
    ToggleAi,
    ToggleMap,
    ShowLog,
    Pickup,
    Scan,
    Warp,
    Quit,
}

/// The player's ship. `(x, y)` is the top-left cell of its art.
#[derive(Clone, Debug)]
pub struct Ship {
    pub x: i32,
    pub y: i32,
    pub art: &'static [&'static str],
    pub fuel: f64,
    pub score: u64,
    pub distance: f64,   // AU
    pub energy: f64,     // cumulative, never refunded
}

impl Ship {
    pub fn new(x: i32, y: i32, art: &'static [&'static str], fuel: f64) -> Self {
        Ship { x, y, art, fuel, score: 0, distance: 0.0, energy: 0.0 }
    }

    /// Footprint of the ship art: (columns, rows).
    pub fn footprint(&self) -> (i32, i32) {
        let w = self.art.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        (w as i32, self.art.len() as i32)
    }

    /// Move one cell, staying inside the canvas interior.
    /// Left/top margin is 2; right margin is 2 and bottom margin 3 past the art.
    pub fn nudge(&mut self, dir: MoveDir, canvas_w: i32, canvas_h: i32) {
        let (art_w, art_h) = self.footprint();
        let max_x = (canvas_w - art_w - 2).max(2);
        let max_y = (canvas_h - art_h - 3).max(2);
        match dir {
            MoveDir::Left => self.x = (self.x - 1).max(2),
            MoveDir::Right => self.x = (self.x + 1).min(max_x),
            MoveDir::Up => self.y = (self.y - 1).max(2),
            MoveDir::Down => self.y = (self.y + 1).min(max_y),
        }
    }

    /// Spend fuel if enough is available. Returns false (and changes
    /// nothing) when the tank holds less than `amount`.
    pub fn try_spend(&mut self, amount: f64) -> bool {
        if self.fuel < amount {
            return false;
        }
        self.fuel -= amount;
        self.energy += amount;
        true
    }

    /// Continuous drain; floors at zero. Energy counts what was requested.
    pub fn drain(&mut self, amount: f64) {
        self.fuel = (self.fuel - amount).max(0.0);
        self.energy += amount;
    }

    pub fn refuel(&mut self, amount: f64, fuel_max: f64) {
        self.fuel = (self.fuel + amount).min(fuel_max);
    }
}

/// A collectible fuel cache. `created` is session-clock seconds.
#[derive(Clone, Debug)]
pub struct PowerPack {
    pub x: i32,
    pub y: i32,
    pub created: f64,
}

impl PowerPack {
    pub fn new(x: i32, y: i32, created: f64) -> Self {
        PowerPack { x, y, created }
    }

    pub fn is_alive(&self, now: f64, life: f64) -> bool {
        now - self.created < life
    }

    /// Chebyshev (box) distance check against a point.
    pub fn within(&self, x: i32, y: i32, radius: i32) -> bool {
        (self.x - x).abs() <= radius && (self.y - y).abs() <= radius
    }
}
