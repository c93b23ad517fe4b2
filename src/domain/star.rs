/// Parallax sprites: point stars and extended galaxy sprites.
///
/// Both live in a ship-relative plane `(x, y)` centred on the canvas, at a
/// depth `z` that shrinks over time. The screen position is the perspective
/// projection `centre + (x / z) * scale`, where the vertical scale is half of
/// the horizontal one so the field looks flattened.
///
/// A star's depth never leaves `(STAR_LIVENESS, z_max]`: a step that would
/// take it to or below the liveness threshold respawns it at `z_max` instead.

use rand::Rng;

/// A star respawns once its depth would drop to or below this.
pub const STAR_LIVENESS: f64 = 0.1;
/// Initial stars are scattered between this depth and `z_max`.
pub const STAR_INIT_MIN_DEPTH: f64 = 0.5;
/// Galaxy sprites are dropped once their depth falls to or below this.
pub const GALAXY_LIVENESS: f64 = 0.12;

const DRIFT_FREQ: f64 = 0.3;
const DRIFT_AMPLITUDE: f64 = 0.08;
const MIN_DEPTH_RATE: f64 = 0.15;
const DEPTH_DAMPING: f64 = 0.12;
const GALAXY_DEPTH_RATE: f64 = 0.22;
const GALAXY_SPREAD: f64 = 0.6;

/// Depth tier: decides a star's glyph and colour.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DepthTier {
    Near,  // z < 30% of z_max
    Mid,   // z < 60% of z_max
    Far,
}

impl DepthTier {
    pub fn from_depth(z: f64, z_max: f64) -> Self {
        let depth = z / z_max;
        if depth < 0.3 {
            DepthTier::Near
        } else if depth < 0.6 {
            DepthTier::Mid
        } else {
            DepthTier::Far
        }
    }

    pub fn glyph(self) -> char {
        match self {
            DepthTier::Near => '✦',
            DepthTier::Mid => '+',
            DepthTier::Far => '.',
        }
    }
}

/// Glyph every star takes while the field is in warp mode.
pub const WARP_STREAK: char = '|';

/// Canvas geometry used for projection.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Viewport { width, height }
    }

    /// Perspective projection to a screen cell (may be off-canvas).
    pub fn project(&self, x: f64, y: f64, z: f64) -> (i32, i32) {
        let scale_x = self.width.min(self.height) as f64 / 2.0;
        let scale_y = scale_x / 2.0;
        let sx = (self.width / 2) as f64 + (x / z) * scale_x;
        let sy = (self.height / 2) as f64 + (y / z) * scale_y;
        (sx as i32, sy as i32)
    }

    pub fn contains(&self, sx: i32, sy: i32) -> bool {
        sx >= 0 && sx < self.width && sy >= 0 && sy < self.height
    }
}

#[derive(Clone, Debug)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Star {
    /// Fresh star at a random depth in `[STAR_INIT_MIN_DEPTH, z_max]`.
    pub fn scattered(rng: &mut impl Rng, view: Viewport, z_max: f64) -> Self {
        let mut star = Star { x: 0.0, y: 0.0, z: z_max };
        star.respawn(rng, view, z_max);
        star.z = rng.gen_range(STAR_INIT_MIN_DEPTH..=z_max);
        star
    }

    /// Back to the far plane with a fresh lateral position.
    pub fn respawn(&mut self, rng: &mut impl Rng, view: Viewport, z_max: f64) {
        self.x = (rng.gen::<f64>() - 0.5) * view.width as f64;
        self.y = (rng.gen::<f64>() - 0.5) * view.height as f64;
        self.z = z_max;
    }

    /// Advance one tick. Returns false when the star should respawn;
    /// in that case `z` is left untouched.
    pub fn step(&mut self, visual_speed: f64, dt: f64, clock: f64) -> bool {
        let next_z = self.z - dt * MIN_DEPTH_RATE.max(visual_speed / (1.0 + self.z * DEPTH_DAMPING));
        if next_z <= STAR_LIVENESS {
            return false;
        }
        self.x += (clock * DRIFT_FREQ + self.z).sin() * DRIFT_AMPLITUDE * dt;
        self.z = next_z;
        true
    }

    pub fn tier(&self, z_max: f64) -> DepthTier {
        DepthTier::from_depth(self.z, z_max)
    }
}

/// A multi-line galaxy picture drifting towards the viewer.
#[derive(Clone, Debug)]
pub struct GalaxySprite {
    pub name: &'static str,
    pub art: &'static [&'static str],
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GalaxySprite {
    pub fn new(
        name: &'static str,
        art: &'static [&'static str],
        rng: &mut impl Rng,
        view: Viewport,
        z_max: f64,
    ) -> Self {
        GalaxySprite {
            name,
            art,
            x: (rng.gen::<f64>() - 0.5) * view.width as f64 * GALAXY_SPREAD,
            y: (rng.gen::<f64>() - 0.5) * view.height as f64 * GALAXY_SPREAD,
            z: z_max,
        }
    }

    /// Advance one tick. Returns false once the sprite has passed the viewer.
    pub fn step(&mut self, visual_speed: f64, dt: f64) -> bool {
        self.z -= dt * visual_speed * GALAXY_DEPTH_RATE;
        self.z > GALAXY_LIVENESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const Z_MAX: f64 = 8.0;

    #[test]
    fn tier_cut_points() {
        assert_eq!(DepthTier::from_depth(2.39, Z_MAX), DepthTier::Near);
        assert_eq!(DepthTier::from_depth(2.5, Z_MAX), DepthTier::Mid);
        assert_eq!(DepthTier::from_depth(4.79, Z_MAX), DepthTier::Mid);
        assert_eq!(DepthTier::from_depth(4.9, Z_MAX), DepthTier::Far);
        assert_eq!(DepthTier::from_depth(Z_MAX, Z_MAX), DepthTier::Far);
        assert_eq!(DepthTier::Near.glyph(), '✦');
        assert_eq!(DepthTier::Mid.glyph(), '+');
        assert_eq!(DepthTier::Far.glyph(), '.');
    }

    #[test]
    fn projection_flattens_vertical_axis() {
        let view = Viewport::new(100, 40);
        // scale_x = 20, scale_y = 10
        assert_eq!(view.project(0.0, 0.0, 1.0), (50, 20));
        assert_eq!(view.project(1.0, 1.0, 1.0), (70, 30));
        assert_eq!(view.project(2.0, -2.0, 2.0), (70, 10));
    }

    #[test]
    fn scattered_stars_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let view = Viewport::new(80, 24);
        for _ in 0..500 {
            let s = Star::scattered(&mut rng, view, Z_MAX);
            assert!(s.z >= STAR_INIT_MIN_DEPTH && s.z <= Z_MAX);
            assert!(s.x >= -40.0 && s.x < 40.0);
            assert!(s.y >= -12.0 && s.y < 12.0);
        }
    }

    #[test]
    fn star_step_refuses_to_cross_liveness() {
        let mut s = Star { x: 1.0, y: 1.0, z: 0.12 };
        assert!(!s.step(2.0, 0.1, 0.0));
        assert!((s.z - 0.12).abs() < 1e-12);
    }

    #[test]
    fn star_depth_decreases_at_minimum_rate() {
        let mut s = Star { x: 0.0, y: 0.0, z: 4.0 };
        // visual speed 0 → rate floors at 0.15
        assert!(s.step(0.0, 1.0, 0.0));
        assert!((s.z - 3.85).abs() < 1e-9);
    }

    #[test]
    fn galaxy_sprite_lifecycle() {
        let mut rng = StdRng::seed_from_u64(3);
        let g = &GALAXIES_FOR_TEST;
        let mut sprite = GalaxySprite::new(g.0, g.1, &mut rng, Viewport::new(80, 24), Z_MAX);
        assert!((sprite.z - Z_MAX).abs() < 1e-12);
        assert!(sprite.x.abs() <= 80.0 * 0.3);
        let mut ticks = 0;
        while sprite.step(2.0, 0.5) {
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert!(sprite.z <= GALAXY_LIVENESS);
    }

    const GALAXIES_FOR_TEST: (&str, &[&str]) = ("Test", &["(*)"]);
}
