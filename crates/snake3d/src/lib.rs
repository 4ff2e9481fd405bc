//! # snake3d
//!
//! A snake-style game on an articulated chain of rigid segments.
//!
//! Turns issued on the head travel down the chain one link at a time,
//! every segment moves forward every tick, and the head is tested against
//! its own body, moving prizes and bombs, and the level volume.
//!
//! ```rust,no_run
//! use snake3d::prelude::*;
//!
//! let mut game = Game::new(GameConfig::default())?;
//! game.start();
//! game.turn(TurnDirection::Left);
//! for event in game.tick()? {
//!     println!("{event:?}");
//! }
//! # Ok::<(), GameError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod chain;
pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod game;
pub mod runner;

#[cfg(test)]
mod tests;

/// Common imports for game users
pub mod prelude {
    pub use crate::{
        chain::{Chain, RotationAxis, RotationCommand, Segment, StepOrder, TurnDirection},
        config::{BoundaryPolicy, GameConfig},
        entities::{EntityKind, Motion, MovingEntity, SpawnPlan},
        error::GameError,
        events::{GameEvent, GameState},
        game::{Game, Snapshot},
        runner::{GameHandle, GameRunner},
    };
}
