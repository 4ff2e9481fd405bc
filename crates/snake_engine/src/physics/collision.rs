//! Collision predicate between bounded models

use super::bounding_volume::{BoundableModel, GeometryError};

/// Whether the bounding boxes of two models overlap
///
/// Symmetric in its arguments; boxes touching on a face collide.
pub fn models_collide(a: &BoundableModel, b: &BoundableModel) -> Result<bool, GeometryError> {
    Ok(a.bounding_box()?.intersects(&b.bounding_box()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Transform, Vec3};
    use crate::physics::bounding_volume::BoundingVolume;

    fn segment_at(x: f32) -> BoundableModel {
        BoundableModel::new(
            Transform::from_position(Vec3::new(x, 0.0, 0.0)),
            BoundingVolume::Segment { extents: Vec3::new(1.0, 1.0, 1.0) },
        )
    }

    fn ball_at(x: f32) -> BoundableModel {
        BoundableModel::new(
            Transform::from_position(Vec3::new(x, 0.0, 0.0)),
            BoundingVolume::Sphere { radius: 0.5 },
        )
    }

    #[test]
    fn test_segment_and_ball_collide_symmetrically() {
        let segment = segment_at(0.0);
        for x in [0.0, 0.5, 1.0, 1.5] {
            let ball = ball_at(x);
            assert_eq!(
                models_collide(&segment, &ball).unwrap(),
                models_collide(&ball, &segment).unwrap()
            );
        }
        assert!(models_collide(&segment, &ball_at(1.0)).unwrap());
        assert!(!models_collide(&segment, &ball_at(1.5)).unwrap());
    }

    #[test]
    fn test_invalid_geometry_propagates() {
        let mut ball = ball_at(0.0);
        ball.transform.scale = Vec3::new(1.0, 3.0, 1.0);
        assert!(models_collide(&segment_at(0.0), &ball).is_err());
    }
}
