//! Physics module
//!
//! Axis-aligned bounding boxes, per-model bounding volumes and the
//! collision predicate built on top of them.

pub mod bounding_volume;
pub mod bounds;
pub mod collision;

pub use bounding_volume::{BoundableModel, BoundingVolume, GeometryError};
pub use bounds::Aabb;
pub use collision::models_collide;
