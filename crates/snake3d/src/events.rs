//! Game events
//!
//! Everything a presentation layer (sound, HUD, camera) reacts to is
//! reported as a [`GameEvent`] instead of being triggered from game logic.

use snake_engine::foundation::math::Vec3;
use snake_engine::scene::NodeId;

use crate::entities::EntityKind;

/// Run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Waiting for the run to start
    Menu,
    /// Ticks advance the simulation
    Playing,
    /// Ticks are ignored until resumed
    Paused,
    /// The run ended in defeat
    Dead,
    /// The run ended in victory
    Won,
}

/// What caused a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitCause {
    /// The head touched a bomb
    Bomb,
    /// The head touched its own segment at this index
    SelfCollision {
        /// Index of the touched segment
        segment: usize,
    },
}

/// Why a run ended in defeat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathReason {
    /// Health reached zero
    HealthDepleted,
    /// A hit landed with only the head left
    ChainExhausted,
    /// The head left the level under the end-run policy
    OutOfBounds,
}

/// Something that happened during a tick or an input call
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The run state changed
    StateChanged {
        /// Previous state
        from: GameState,
        /// New state
        to: GameState,
    },
    /// A prize was consumed
    PrizeCollected {
        /// The consumed entity
        entity: NodeId,
        /// Score after collecting
        score: u32,
    },
    /// A bomb or self-collision cost health
    Hit {
        /// What was hit
        cause: HitCause,
        /// Health after the hit
        health: u32,
    },
    /// A segment was appended
    Grew {
        /// Chain length after growing
        length: usize,
    },
    /// A segment was removed
    Shrunk {
        /// Chain length after shrinking
        length: usize,
    },
    /// The head's box left the level volume
    OutOfBounds {
        /// Head position at detection
        head: Vec3,
    },
    /// An entity entered play
    Spawned {
        /// The new entity
        entity: NodeId,
        /// Its kind
        kind: EntityKind,
    },
    /// An entity left the arena or finished its path
    EntityExpired {
        /// The removed entity
        entity: NodeId,
    },
    /// The run was won
    Won {
        /// Final score
        score: u32,
    },
    /// The run was lost
    Died {
        /// Why
        reason: DeathReason,
    },
}
