/// Resource bookkeeping: fuel drain, distance, and the power-pack pool.

use rand::Rng;

use crate::config::{FuelConfig, SpawnConfig};
use crate::domain::entity::{PowerPack, Ship};

/// AU credited per unit of speed per second.
const DISTANCE_SCALE: f64 = 0.08;

/// Ambient drain for one tick: base rate plus a surcharge above speed 1.0.
pub fn ambient_drain(fuel: &FuelConfig, speed: f64, dt: f64) -> f64 {
    fuel.move_per_sec * dt * (1.0 + (speed - 1.0).max(0.0))
}

/// Per-tick fuel and distance bookkeeping. Runs whether or not the ship moved.
pub fn consume(ship: &mut Ship, fuel: &FuelConfig, speed: f64, dt: f64) {
    ship.drain(ambient_drain(fuel, speed, dt));
    ship.distance += speed * dt * DISTANCE_SCALE;
}

/// Live power packs, in spawn order.
#[derive(Default)]
pub struct PowerPackPool {
    pub packs: Vec<PowerPack>,
}

impl PowerPackPool {
    pub fn new() -> Self {
        PowerPackPool { packs: Vec::new() }
    }

    /// Per-tick Bernoulli trial. New packs land in `[6, w-8] × [4, h-6]`.
    pub fn maybe_spawn(&mut self, rng: &mut impl Rng, chance: f64, now: f64, w: i32, h: i32) -> Option<(i32, i32)> {
        if rng.gen::<f64>() >= chance {
            return None;
        }
        let x = rng.gen_range(6..=(w - 8).max(6));
        let y = rng.gen_range(4..=(h - 6).max(4));
        self.packs.push(PowerPack::new(x, y, now));
        Some((x, y))
    }

    /// Remove and return every pack older than `life` seconds.
    pub fn expire(&mut self, now: f64, life: f64) -> Vec<PowerPack> {
        let (alive, dead): (Vec<_>, Vec<_>) =
            self.packs.drain(..).partition(|p| p.is_alive(now, life));
        self.packs = alive;
        dead
    }

    /// Remove and return the first pack (in spawn order) within `radius`.
    pub fn take_near(&mut self, x: i32, y: i32, radius: i32) -> Option<PowerPack> {
        let idx = self.packs.iter().position(|p| p.within(x, y, radius))?;
        Some(self.packs.remove(idx))
    }
}

/// Try to collect a pack near the ship. Credits score, refuels (capped) and
/// charges the pickup energy. Returns the collected pack.
pub fn collect(
    ship: &mut Ship,
    pool: &mut PowerPackPool,
    spawn: &SpawnConfig,
    fuel: &FuelConfig,
) -> Option<PowerPack> {
    let pack = pool.take_near(ship.x, ship.y, spawn.collect_radius)?;
    ship.score += spawn.power_score;
    ship.refuel(fuel.pack_refill, fuel.max);
    ship.energy += fuel.pickup_energy;
    Some(pack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ART: &[&str] = &["<=>"];

    fn ship_at(x: i32, y: i32, fuel: f64) -> Ship {
        Ship::new(x, y, ART, fuel)
    }

    #[test]
    fn drain_has_speed_surcharge() {
        let fuel = FuelConfig::default();
        assert!((ambient_drain(&fuel, 1.0, 1.0) - 0.08).abs() < 1e-12);
        assert!((ambient_drain(&fuel, 0.5, 1.0) - 0.08).abs() < 1e-12);
        assert!((ambient_drain(&fuel, 3.0, 2.0) - 0.08 * 2.0 * 3.0).abs() < 1e-12);
    }

    #[test]
    fn consume_tracks_distance_and_energy() {
        let fuel = FuelConfig::default();
        let mut ship = ship_at(0, 0, 1000.0);
        consume(&mut ship, &fuel, 2.0, 0.5);
        assert!((ship.distance - 2.0 * 0.5 * 0.08).abs() < 1e-12);
        assert!((ship.fuel - (1000.0 - 0.08 * 0.5 * 2.0)).abs() < 1e-9);
        assert!((ship.energy - 0.08).abs() < 1e-12);
    }

    #[test]
    fn consume_never_goes_negative() {
        let fuel = FuelConfig::default();
        let mut ship = ship_at(0, 0, 0.01);
        consume(&mut ship, &fuel, 4.0, 10.0);
        assert_eq!(ship.fuel, 0.0);
    }

    #[test]
    fn spawn_respects_chance_and_margins() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut pool = PowerPackPool::new();
        assert!(pool.maybe_spawn(&mut rng, 0.0, 0.0, 80, 24).is_none());
        for _ in 0..100 {
            let (x, y) = pool.maybe_spawn(&mut rng, 1.0, 0.0, 80, 24).unwrap();
            assert!((6..=72).contains(&x));
            assert!((4..=18).contains(&y));
        }
        assert_eq!(pool.packs.len(), 100);
    }

    #[test]
    fn expire_removes_only_old_packs() {
        let mut pool = PowerPackPool::new();
        pool.packs.push(PowerPack::new(10, 10, 0.0));
        pool.packs.push(PowerPack::new(20, 10, 5.0));
        let gone = pool.expire(12.0, 12.0);
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].x, 10);
        assert_eq!(pool.packs.len(), 1);
        assert_eq!(pool.packs[0].x, 20);
    }

    #[test]
    fn collect_takes_first_in_range() {
        let spawn = SpawnConfig::default();
        let fuel = FuelConfig::default();
        let mut pool = PowerPackPool::new();
        pool.packs.push(PowerPack::new(50, 50, 0.0));
        pool.packs.push(PowerPack::new(12, 11, 0.0));
        pool.packs.push(PowerPack::new(10, 10, 0.0));
        let mut ship = ship_at(10, 10, 500.0);
        let got = collect(&mut ship, &mut pool, &spawn, &fuel).unwrap();
        assert_eq!((got.x, got.y), (12, 11));
        assert_eq!(ship.score, 100);
        assert!((ship.fuel - 560.0).abs() < 1e-9);
        assert!((ship.energy - 2.0).abs() < 1e-9);
        assert_eq!(pool.packs.len(), 2);
    }

    #[test]
    fn repeated_pickups_cap_fuel_exactly() {
        let spawn = SpawnConfig::default();
        let fuel = FuelConfig::default();
        let mut pool = PowerPackPool::new();
        for _ in 0..3 {
            pool.packs.push(PowerPack::new(5, 5, 0.0));
        }
        let mut ship = ship_at(5, 5, 990.0);
        while collect(&mut ship, &mut pool, &spawn, &fuel).is_some() {
            assert!(ship.fuel <= fuel.max);
        }
        assert_eq!(ship.fuel, fuel.max);
        assert_eq!(ship.score, 300);
    }

    #[test]
    fn collect_out_of_range_changes_nothing() {
        let spawn = SpawnConfig::default();
        let fuel = FuelConfig::default();
        let mut pool = PowerPackPool::new();
        pool.packs.push(PowerPack::new(30, 30, 0.0));
        let mut ship = ship_at(10, 10, 500.0);
        assert!(collect(&mut ship, &mut pool, &spawn, &fuel).is_none());
        assert_eq!(ship.score, 0);
        assert_eq!(pool.packs.len(), 1);
    }
}
