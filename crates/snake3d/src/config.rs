//! Game configuration
//!
//! Every tunable of the chain, arena, spawner and run rules lives here.
//! All sections default individually, so a config file only needs the
//! keys it overrides.

use serde::{Deserialize, Serialize};
use snake_engine::config::Config;
use snake_engine::foundation::math::Vec3;
use snake_engine::scheduler::FailurePolicy;

use crate::chain::StepOrder;

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Chain geometry and locomotion
    pub chain: ChainConfig,

    /// Play area
    pub arena: ArenaConfig,

    /// Moving entity spawning
    pub spawn: SpawnConfig,

    /// Executor cadence
    pub timing: TimingConfig,

    /// Scoring, health and end conditions
    pub rules: RulesConfig,

    /// Logging defaults
    pub logging: LoggingConfig,
}

impl Config for GameConfig {}

/// Chain geometry and locomotion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Canonical segment box (width, height, length) at unit scale
    pub segment_extents: Vec3,

    /// Spacing between consecutive segment centers
    pub segment_length: f32,

    /// Forward speed
    pub speed: f32,

    /// Multiplier turning speed into per-tick displacement
    pub delta_time_factor: f32,

    /// Radians per turn input
    pub turn_angle: f32,

    /// Pending rotation commands kept per segment
    pub max_queue_size: usize,

    /// Path length a tail travels before executing a received turn,
    /// defaulting to `segment_length`
    pub settle_distance: Option<f32>,

    /// Slack on the settle distance for accumulated float error
    pub arrival_epsilon: f32,

    /// Whether turns execute before or after the forward step
    pub step_order: StepOrder,

    /// Head position at the start of a run
    pub start_position: Vec3,

    /// Segments at the start of a run, head included
    pub initial_length: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            segment_extents: Vec3::new(0.75, 0.75, 1.5),
            segment_length: 1.5,
            speed: 1.5,
            delta_time_factor: 1.0 / 30.0,
            turn_angle: 0.1,
            max_queue_size: 10_000,
            settle_distance: None,
            arrival_epsilon: 1e-3,
            step_order: StepOrder::RotateThenTranslate,
            start_position: Vec3::new(-10.0, 0.0, -10.0),
            initial_length: 3,
        }
    }
}

impl ChainConfig {
    /// Distance every segment advances per tick
    pub fn step_distance(&self) -> f32 {
        self.speed * self.delta_time_factor
    }

    /// Effective settle distance
    pub fn settle_distance(&self) -> f32 {
        self.settle_distance.unwrap_or(self.segment_length)
    }
}

/// What happens when the head leaves the level volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// The run ends
    #[default]
    EndRun,
    /// A warning is logged and the run continues
    Warn,
}

/// Play area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Straight movers are culled once `|x|` reaches this
    pub horizontal_border: f32,

    /// Straight movers are culled once `|y|` reaches this
    pub vertical_border: f32,

    /// Half-size of the cubic level volume centered at the origin
    pub level_half_extent: f32,

    /// Head-out-of-level response
    pub boundary_policy: BoundaryPolicy,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            horizontal_border: 9.0,
            vertical_border: 9.0,
            level_half_extent: 30.0,
            boundary_policy: BoundaryPolicy::EndRun,
        }
    }
}

/// Moving entity spawning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Seed of the session RNG
    pub seed: u64,

    /// Slowest entity speed, units per second
    pub min_speed: f32,

    /// Fastest entity speed, units per second
    pub max_speed: f32,

    /// Entity sphere radius at unit scale
    pub entity_radius: f32,

    /// Chance that a spawned entity is a bomb
    pub bomb_probability: f64,

    /// Chance that a spawned entity follows a curve
    pub bezier_probability: f64,

    /// Entities alive at once
    pub max_entities: usize,

    /// Distance inside the border at which entities appear
    pub spawn_margin: f32,

    /// Milliseconds between spawn attempts
    pub interval_ms: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            min_speed: 2.0,
            max_speed: 8.0,
            entity_radius: 0.5,
            bomb_probability: 0.3,
            bezier_probability: 0.5,
            max_entities: 8,
            spawn_margin: 0.5,
            interval_ms: 1500,
        }
    }
}

/// Executor cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Milliseconds between game ticks
    pub tick_interval_ms: u64,

    /// Response to a failing tick
    pub failure_policy: FailurePolicy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 20,
            failure_policy: FailurePolicy::LogAndContinue,
        }
    }
}

impl TimingConfig {
    /// Tick interval in seconds
    #[allow(clippy::cast_precision_loss)]
    pub fn tick_seconds(&self) -> f32 {
        self.tick_interval_ms as f32 / 1000.0
    }
}

/// Scoring, health and end conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Score per collected prize
    pub points_per_prize: u32,

    /// Append a segment for each collected prize
    pub grow_on_prize: bool,

    /// Hits the player can take
    pub starting_health: u32,

    /// Score that wins the run, if any
    pub win_score: Option<u32>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            points_per_prize: 1,
            grow_on_prize: true,
            starting_health: 3,
            win_score: Some(20),
        }
    }
}

/// Logging defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        let chain = &self.chain;
        if chain.segment_length <= 0.0 {
            return Err("Segment length must be positive".to_string());
        }
        if chain.step_distance() <= 0.0 {
            return Err("Chain speed and delta time factor must give a positive step".to_string());
        }
        if chain.arrival_epsilon < 0.0 {
            return Err("Arrival epsilon cannot be negative".to_string());
        }
        if chain.settle_distance() <= chain.arrival_epsilon {
            return Err(format!(
                "Settle distance {} must exceed the arrival epsilon {}",
                chain.settle_distance(),
                chain.arrival_epsilon
            ));
        }
        if chain.segment_extents.iter().any(|e| *e <= 0.0) {
            return Err("Segment extents must be positive".to_string());
        }
        if chain.max_queue_size == 0 {
            return Err("Rotation queue must hold at least one command".to_string());
        }
        if chain.initial_length == 0 {
            return Err("Chain needs at least the head segment".to_string());
        }

        let arena = &self.arena;
        if arena.horizontal_border <= 0.0 || arena.vertical_border <= 0.0 {
            return Err("Arena borders must be positive".to_string());
        }
        if arena.level_half_extent <= 0.0 {
            return Err("Level half extent must be positive".to_string());
        }

        let spawn = &self.spawn;
        if spawn.min_speed < 0.0 || spawn.min_speed > spawn.max_speed {
            return Err(format!(
                "Invalid entity speed range {}..{}",
                spawn.min_speed, spawn.max_speed
            ));
        }
        if spawn.entity_radius <= 0.0 {
            return Err("Entity radius must be positive".to_string());
        }
        for (name, p) in [("Bomb", spawn.bomb_probability), ("Bezier", spawn.bezier_probability)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} probability must be within 0..=1"));
            }
        }
        if spawn.spawn_margin < 0.0
            || spawn.spawn_margin >= arena.horizontal_border.min(arena.vertical_border)
        {
            return Err("Spawn margin must lie inside the arena borders".to_string());
        }
        if spawn.interval_ms == 0 || self.timing.tick_interval_ms == 0 {
            return Err("Executor intervals must be positive".to_string());
        }
        Ok(())
    }
}
