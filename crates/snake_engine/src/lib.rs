//! # Snake Engine
//!
//! Engine-side building blocks for the articulated chain game.
//!
//! ## Features
//!
//! - **Math**: nalgebra-backed vectors, quaternions and TRS transforms
//! - **Bounding Volumes**: analytic and exact axis-aligned boxes per model
//! - **Scene Registration**: parent/child node bookkeeping for renderables
//! - **Scheduling**: periodic background executors with cooperative stop
//! - **Configuration**: TOML/RON backed configuration files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snake_engine::prelude::*;
//!
//! let model = BoundableModel::new(
//!     Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
//!     BoundingVolume::Segment { extents: Vec3::new(0.75, 0.75, 1.5) },
//! );
//! let bounds = model.bounding_box().expect("segment bounds are analytic");
//! assert!(bounds.contains_point(Vec3::new(1.0, 0.0, 0.0)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;
pub mod scene;
pub mod scheduler;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            math::{Axis, Mat4, Quat, Transform, Vec3},
            time::Stopwatch,
        },
        physics::{
            bounding_volume::{BoundableModel, BoundingVolume, GeometryError},
            bounds::{box_from_transform, distance, magnitude, Aabb},
            collision::models_collide,
        },
        scene::{NodeId, SceneGraph, SimpleSceneGraph},
        scheduler::{FailurePolicy, PeriodicExecutor, SchedulerError},
    };
}
