/// ParallaxField: the fixed-size star pool plus the queue of galaxy sprites.
///
/// Stars are never removed. A star that reaches the liveness threshold is
/// recycled at the far plane with a fresh lateral position, so the pool size
/// stays exactly what it was built with. Galaxy sprites are a FIFO queue: new
/// ones join the back, expired ones are dropped as the queue is cycled.

use std::collections::VecDeque;

use rand::Rng;

use crate::domain::catalog::GalaxyInfo;
use crate::domain::star::{GalaxySprite, Star, Viewport};

pub struct ParallaxField {
    pub stars: Vec<Star>,
    pub sprites: VecDeque<GalaxySprite>,
    /// While set, every star renders as a warp streak.
    pub warp_mode: bool,
    pub z_max: f64,
}

impl ParallaxField {
    pub fn new(rng: &mut impl Rng, density: usize, view: Viewport, z_max: f64) -> Self {
        ParallaxField {
            stars: (0..density).map(|_| Star::scattered(rng, view, z_max)).collect(),
            sprites: VecDeque::new(),
            warp_mode: false,
            z_max,
        }
    }

    /// Advance every star and sprite by `dt` seconds.
    pub fn advance(&mut self, rng: &mut impl Rng, dt: f64, visual_speed: f64, clock: f64, view: Viewport) {
        for star in &mut self.stars {
            if !star.step(visual_speed, dt, clock) {
                star.respawn(rng, view, self.z_max);
            }
        }

        for _ in 0..self.sprites.len() {
            if let Some(mut sprite) = self.sprites.pop_front() {
                if sprite.step(visual_speed, dt) {
                    self.sprites.push_back(sprite);
                }
            }
        }
    }

    /// Per-tick Bernoulli trial for a new sprite of the current galaxy.
    pub fn maybe_spawn_sprite(
        &mut self,
        rng: &mut impl Rng,
        chance: f64,
        galaxy: &'static GalaxyInfo,
        view: Viewport,
    ) -> bool {
        if rng.gen::<f64>() >= chance {
            return false;
        }
        self.sprites.push_back(GalaxySprite::new(galaxy.name, galaxy.art, rng, view, self.z_max));
        true
    }
}
