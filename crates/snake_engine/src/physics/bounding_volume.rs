//! Bounding volumes attached to renderable models
//!
//! A [`BoundableModel`] pairs a world transform with a [`BoundingVolume`]
//! that knows how to turn that transform into a world-space [`Aabb`].
//! Primitive shapes are resolved analytically from translation and scale;
//! only the mesh variant walks its vertices.

use std::sync::Arc;

use thiserror::Error;

use super::bounds::{box_from_transform, Aabb};
use crate::foundation::math::{Transform, Vec3};
use nalgebra::Point3;

/// Relative tolerance used when checking a sphere's scale for uniformity
const UNIFORM_SCALE_TOLERANCE: f32 = 1e-4;

/// Geometry errors raised while deriving bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A sphere volume was asked for bounds under a non-uniform scale
    #[error("Invalid geometry state: sphere requires uniform scale, got {scale:?}")]
    InvalidGeometryState {
        /// Per-axis scale factors of the offending transform
        scale: Vec3,
    },

    /// A mesh volume has no vertices to bound
    #[error("Mesh bounding volume has no vertices")]
    EmptyMesh,

    /// A constant volume was queried before `calculate_bb`
    #[error("Constant bounding volume queried before its bounds were calculated")]
    BoundsNotCalculated,
}

/// Shape used to derive a model's bounding box
#[derive(Debug, Clone)]
pub enum BoundingVolume {
    /// Exact bounds over model-space vertices, O(vertex count) per query
    Mesh {
        /// Model-space vertex positions
        vertices: Arc<[Vec3]>,
    },

    /// Box with canonical (width, height, length) extents
    Segment {
        /// Full extents at unit scale
        extents: Vec3,
    },

    /// Sphere of the given radius at unit scale
    Sphere {
        /// Radius at unit scale
        radius: f32,
    },

    /// Bounds computed once from `source` and then reused
    Constant {
        /// Volume used for the one-time calculation
        source: Box<BoundingVolume>,
        /// Memoized result, filled by [`BoundableModel::calculate_bb`]
        cached: Option<Aabb>,
    },
}

impl BoundingVolume {
    /// Wrap a volume so its bounds are calculated once and memoized
    pub fn constant(source: Self) -> Self {
        Self::Constant {
            source: Box::new(source),
            cached: None,
        }
    }

    /// Mesh volume from model-space vertices
    pub fn mesh(vertices: impl Into<Arc<[Vec3]>>) -> Self {
        Self::Mesh {
            vertices: vertices.into(),
        }
    }

    fn evaluate(&self, transform: &Transform) -> Result<Aabb, GeometryError> {
        match self {
            Self::Mesh { vertices } => {
                let matrix = transform.to_matrix();
                let world: Vec<Vec3> = vertices
                    .iter()
                    .map(|v| matrix.transform_point(&Point3::from(*v)).coords)
                    .collect();
                Aabb::from_points(&world).ok_or(GeometryError::EmptyMesh)
            }
            Self::Segment { extents } => Ok(box_from_transform(
                transform.position,
                transform.scale_factors(),
                *extents,
            )),
            Self::Sphere { radius } => {
                let scale = transform
                    .uniform_scale(UNIFORM_SCALE_TOLERANCE)
                    .ok_or_else(|| GeometryError::InvalidGeometryState {
                        scale: transform.scale_factors(),
                    })?;
                let side = 2.0 * radius * scale;
                Ok(box_from_transform(
                    transform.position,
                    Vec3::new(1.0, 1.0, 1.0),
                    Vec3::new(side, side, side),
                ))
            }
            Self::Constant { cached, .. } => cached.ok_or(GeometryError::BoundsNotCalculated),
        }
    }
}

/// A renderable's transform together with its bounding volume
#[derive(Debug, Clone)]
pub struct BoundableModel {
    /// Current world transform
    pub transform: Transform,
    volume: BoundingVolume,
}

impl BoundableModel {
    /// Create a model from a transform and volume
    pub const fn new(transform: Transform, volume: BoundingVolume) -> Self {
        Self { transform, volume }
    }

    /// The model's bounding volume
    pub const fn volume(&self) -> &BoundingVolume {
        &self.volume
    }

    /// World-space center of the model
    pub const fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// World-space bounding box for the current transform
    ///
    /// Constant volumes return the box memoized by [`Self::calculate_bb`]
    /// and ignore any later transform changes.
    pub fn bounding_box(&self) -> Result<Aabb, GeometryError> {
        self.volume.evaluate(&self.transform)
    }

    /// Compute and memoize bounds for constant volumes
    ///
    /// Call once the transform is final and before the first collision
    /// test. For other volumes this is the same as [`Self::bounding_box`].
    pub fn calculate_bb(&mut self) -> Result<Aabb, GeometryError> {
        match &mut self.volume {
            BoundingVolume::Constant { source, cached } => {
                let aabb = source.evaluate(&self.transform)?;
                *cached = Some(aabb);
                Ok(aabb)
            }
            volume => volume.evaluate(&self.transform),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Axis;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn cube_vertices() -> Vec<Vec3> {
        let mut vertices = Vec::with_capacity(8);
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    vertices.push(Vec3::new(x, y, z));
                }
            }
        }
        vertices
    }

    #[test]
    fn test_segment_box_at_origin_matches_half_extents() {
        let (w, h, l) = (0.75, 0.5, 1.5);
        let model = BoundableModel::new(
            Transform::identity(),
            BoundingVolume::Segment { extents: Vec3::new(w, h, l) },
        );

        let aabb = model.bounding_box().unwrap();
        assert_relative_eq!(aabb.min, Vec3::new(-w / 2.0, -h / 2.0, -l / 2.0), epsilon = EPSILON);
        assert_relative_eq!(aabb.max, Vec3::new(w / 2.0, h / 2.0, l / 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_segment_box_follows_translation_and_scale() {
        let transform = Transform::from_position(Vec3::new(2.0, -1.0, 0.0))
            .with_scale(Vec3::new(2.0, 1.0, 1.0));
        let model = BoundableModel::new(
            transform,
            BoundingVolume::Segment { extents: Vec3::new(1.0, 1.0, 2.0) },
        );

        let aabb = model.bounding_box().unwrap();
        assert_relative_eq!(aabb.min, Vec3::new(1.0, -1.5, -1.0), epsilon = EPSILON);
        assert_relative_eq!(aabb.max, Vec3::new(3.0, -0.5, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_sphere_box_is_cube_of_scaled_diameter() {
        let transform = Transform::from_position(Vec3::new(0.0, 3.0, 0.0))
            .with_scale(Vec3::new(0.5, 0.5, 0.5));
        let model = BoundableModel::new(transform, BoundingVolume::Sphere { radius: 2.0 });

        let aabb = model.bounding_box().unwrap();
        assert_relative_eq!(aabb.extents(), Vec3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(aabb.center(), Vec3::new(0.0, 3.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_sphere_rejects_non_uniform_scale() {
        let transform = Transform::identity().with_scale(Vec3::new(1.0, 2.0, 1.0));
        let model = BoundableModel::new(transform, BoundingVolume::Sphere { radius: 1.0 });

        assert!(matches!(
            model.bounding_box(),
            Err(GeometryError::InvalidGeometryState { .. })
        ));
    }

    #[test]
    fn test_mesh_box_tracks_rotation() {
        let mut transform = Transform::from_position(Vec3::new(10.0, 0.0, 0.0))
            .with_scale(Vec3::new(1.0, 1.0, 3.0));
        transform.rotate_local(Axis::Y, std::f32::consts::FRAC_PI_2);
        let model = BoundableModel::new(transform, BoundingVolume::mesh(cube_vertices()));

        // The long local Z axis now lies along world X
        let aabb = model.bounding_box().unwrap();
        assert_relative_eq!(aabb.min, Vec3::new(7.0, -1.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(aabb.max, Vec3::new(13.0, 1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_empty_mesh_is_an_error() {
        let model = BoundableModel::new(Transform::identity(), BoundingVolume::mesh(Vec::<Vec3>::new()));
        assert_eq!(model.bounding_box(), Err(GeometryError::EmptyMesh));
    }

    #[test]
    fn test_constant_volume_is_memoized() {
        let mut model = BoundableModel::new(
            Transform::identity().with_scale(Vec3::new(5.0, 5.0, 5.0)),
            BoundingVolume::constant(BoundingVolume::mesh(cube_vertices())),
        );
        assert_eq!(model.bounding_box(), Err(GeometryError::BoundsNotCalculated));

        let computed = model.calculate_bb().unwrap();
        model.transform.translate(Vec3::new(100.0, 0.0, 0.0));

        assert_eq!(model.bounding_box().unwrap(), computed);
        assert_relative_eq!(computed.max, Vec3::new(5.0, 5.0, 5.0), epsilon = EPSILON);
    }
}
