//! Seeded entity spawning

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snake_engine::foundation::math::Vec3;

use super::{EntityKind, Motion, QuadraticBezier};
use crate::config::{ArenaConfig, SpawnConfig};

/// Everything needed to place a new entity
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPlan {
    /// Prize or bomb
    pub kind: EntityKind,
    /// Starting position
    pub position: Vec3,
    /// Motion from that position
    pub motion: Motion,
}

/// Picks spawn points, targets and speeds from a session RNG
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: StdRng,
    spawn: SpawnConfig,
    half_width: f32,
    half_height: f32,
    plane_z: f32,
}

impl Spawner {
    /// Create a spawner over the arena, placing entities on the plane `z = plane_z`
    pub fn new(spawn: &SpawnConfig, arena: &ArenaConfig, plane_z: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(spawn.seed),
            half_width: arena.horizontal_border - spawn.spawn_margin,
            half_height: arena.vertical_border - spawn.spawn_margin,
            spawn: spawn.clone(),
            plane_z,
        }
    }

    /// Restart the random sequence from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn roll(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..=max)
        } else {
            min
        }
    }

    /// Uniform point inside the spawn rectangle
    pub fn random_point_in_box(&mut self) -> Vec3 {
        let x = self.roll(-self.half_width, self.half_width);
        let y = self.roll(-self.half_height, self.half_height);
        Vec3::new(x, y, self.plane_z)
    }

    /// Point on one of the four edges of the spawn rectangle
    pub fn random_spawn_point(&mut self) -> Vec3 {
        let along = self.rng.gen_range(-1.0_f32..=1.0);
        let (x, y) = match self.rng.gen_range(0..4_u8) {
            0 => (-self.half_width, along * self.half_height),
            1 => (self.half_width, along * self.half_height),
            2 => (along * self.half_width, -self.half_height),
            _ => (along * self.half_width, self.half_height),
        };
        Vec3::new(x, y, self.plane_z)
    }

    /// Entity speed drawn from the configured range
    pub fn random_speed(&mut self) -> f32 {
        self.roll(self.spawn.min_speed, self.spawn.max_speed)
    }

    /// Straight mover from a border point toward an interior point
    pub fn straight_plan(&mut self, kind: EntityKind) -> SpawnPlan {
        let position = self.random_spawn_point();
        let target = self.random_point_in_box();
        let speed = self.random_speed();
        SpawnPlan {
            kind,
            position,
            motion: Motion::straight(target - position, speed),
        }
    }

    /// Curve mover between two border points through an interior control point
    pub fn curve_plan(&mut self, kind: EntityKind) -> SpawnPlan {
        let start = self.random_spawn_point();
        let control = self.random_point_in_box();
        let end = self.random_spawn_point();
        let speed = self.random_speed();
        SpawnPlan {
            kind,
            position: start,
            motion: Motion::curve(QuadraticBezier::new(start, control, end), speed),
        }
    }

    /// Random kind and motion per the configured probabilities
    pub fn next_plan(&mut self) -> SpawnPlan {
        let kind = if self.rng.gen_bool(self.spawn.bomb_probability) {
            EntityKind::Bomb
        } else {
            EntityKind::Prize
        };
        if self.rng.gen_bool(self.spawn.bezier_probability) {
            self.curve_plan(kind)
        } else {
            self.straight_plan(kind)
        }
    }
}
