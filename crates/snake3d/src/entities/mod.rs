//! Moving entities: prizes and bombs
//!
//! Entities are plain data dispatched on [`EntityKind`] and [`Motion`];
//! collision responses match on the kind instead of inspecting types.

mod bezier;
mod spawner;

pub use bezier::QuadraticBezier;
pub use spawner::{SpawnPlan, Spawner};

use snake_engine::foundation::math::{Transform, Vec3};
use snake_engine::physics::{Aabb, BoundableModel, BoundingVolume, GeometryError};
use snake_engine::scene::NodeId;

use crate::config::ArenaConfig;

/// What touching an entity does to the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Collectible; scores and may grow the chain
    Prize,
    /// Hazard; costs health and a segment
    Bomb,
}

/// How an entity moves each tick
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// Constant velocity, culled at the arena border
    Straight {
        /// Unit direction of travel
        direction: Vec3,
        /// Units per second
        speed: f32,
    },
    /// Follows a curve from start to end, then expires
    Curve {
        /// Path to follow
        curve: QuadraticBezier,
        /// Curve parameter in `[0, 1]`
        progress: f32,
        /// Units per second along the curve
        speed: f32,
        /// Cached arc length
        length: f32,
    },
}

impl Motion {
    /// Straight-line motion; `direction` is normalized
    pub fn straight(direction: Vec3, speed: f32) -> Self {
        Self::Straight {
            direction: direction.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros),
            speed,
        }
    }

    /// Curve motion starting at the curve's first control point
    pub fn curve(curve: QuadraticBezier, speed: f32) -> Self {
        Self::Curve {
            curve,
            progress: 0.0,
            speed,
            length: curve.approximate_length(),
        }
    }

    /// Scalar speed
    pub const fn speed(&self) -> f32 {
        match self {
            Self::Straight { speed, .. } | Self::Curve { speed, .. } => *speed,
        }
    }
}

/// Result of advancing an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionStatus {
    /// Still in play
    Active,
    /// Left the arena or finished its curve
    Expired,
}

/// A non-chain object moving through the arena
#[derive(Debug, Clone)]
pub struct MovingEntity {
    kind: EntityKind,
    model: BoundableModel,
    motion: Motion,
    node: NodeId,
}

impl MovingEntity {
    /// Create an entity with a sphere bound of `radius`
    pub fn new(kind: EntityKind, position: Vec3, radius: f32, motion: Motion, node: NodeId) -> Self {
        Self {
            kind,
            model: BoundableModel::new(
                Transform::from_position(position),
                BoundingVolume::Sphere { radius },
            ),
            motion,
            node,
        }
    }

    /// Prize or bomb
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Scene node mirroring this entity
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Current motion state
    pub const fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Renderable transform
    pub const fn transform(&self) -> &Transform {
        &self.model.transform
    }

    /// Current position
    pub const fn position(&self) -> Vec3 {
        self.model.transform.position
    }

    /// Unit direction of travel, zero when stationary
    pub fn direction(&self) -> Vec3 {
        match &self.motion {
            Motion::Straight { direction, .. } => *direction,
            Motion::Curve { curve, progress, .. } => curve
                .tangent(*progress)
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(Vec3::zeros),
        }
    }

    /// Bounded model used for collision tests
    pub const fn model(&self) -> &BoundableModel {
        &self.model
    }

    /// World-space box for the current transform
    pub fn bounding_box(&self) -> Result<Aabb, GeometryError> {
        self.model.bounding_box()
    }

    /// Move by `dt` seconds of motion
    pub fn advance(&mut self, dt: f32, arena: &ArenaConfig) -> MotionStatus {
        match &mut self.motion {
            Motion::Straight { direction, speed } => {
                self.model.transform.translate(*direction * (*speed * dt));
                let p = self.model.transform.position;
                if p.x.abs() >= arena.horizontal_border || p.y.abs() >= arena.vertical_border {
                    MotionStatus::Expired
                } else {
                    MotionStatus::Active
                }
            }
            Motion::Curve { curve, progress, speed, length } => {
                *progress = if *length > f32::EPSILON {
                    (*progress + *speed * dt / *length).min(1.0)
                } else {
                    1.0
                };
                self.model.transform.position = curve.point(*progress);
                if *progress >= 1.0 {
                    MotionStatus::Expired
                } else {
                    MotionStatus::Active
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arena() -> ArenaConfig {
        ArenaConfig::default()
    }

    #[test]
    fn test_straight_mover_is_culled_at_border() {
        let mut entity = MovingEntity::new(
            EntityKind::Prize,
            Vec3::new(8.0, 0.0, 0.0),
            0.5,
            Motion::straight(Vec3::new(2.0, 0.0, 0.0), 10.0),
            NodeId::default(),
        );

        assert_eq!(entity.advance(0.05, &arena()), MotionStatus::Active);
        assert_relative_eq!(entity.position(), Vec3::new(8.5, 0.0, 0.0));
        assert_relative_eq!(entity.direction(), Vec3::x());
        assert_eq!(entity.advance(0.05, &arena()), MotionStatus::Expired);
    }

    #[test]
    fn test_stationary_entity_stays_put() {
        let mut entity = MovingEntity::new(
            EntityKind::Bomb,
            Vec3::new(1.0, 1.0, 0.0),
            0.5,
            Motion::straight(Vec3::zeros(), 0.0),
            NodeId::default(),
        );
        for _ in 0..10 {
            assert_eq!(entity.advance(0.02, &arena()), MotionStatus::Active);
        }
        assert_relative_eq!(entity.position(), Vec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(entity.direction(), Vec3::zeros());
    }

    #[test]
    fn test_curve_mover_finishes_at_end_point() {
        let curve = QuadraticBezier::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        );
        let mut entity = MovingEntity::new(
            EntityKind::Prize,
            curve.p0,
            0.5,
            Motion::curve(curve, 1.0),
            NodeId::default(),
        );

        let mut ticks = 0;
        while entity.advance(0.1, &arena()) == MotionStatus::Active {
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_relative_eq!(entity.position(), curve.p2, epsilon = 1e-5);
        assert!(ticks > 10);
    }

    #[test]
    fn test_entity_bounds_are_spheres() {
        let entity = MovingEntity::new(
            EntityKind::Bomb,
            Vec3::new(0.0, 2.0, 0.0),
            0.25,
            Motion::straight(Vec3::x(), 1.0),
            NodeId::default(),
        );
        let aabb = entity.bounding_box().unwrap();
        assert_relative_eq!(aabb.extents(), Vec3::new(0.25, 0.25, 0.25));
        assert_eq!(entity.kind(), EntityKind::Bomb);
        assert_relative_eq!(entity.motion().speed(), 1.0);
    }
}
