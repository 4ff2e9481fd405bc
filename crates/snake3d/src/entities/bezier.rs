//! Quadratic Bézier curves for curved movers

use snake_engine::foundation::math::Vec3;

const LENGTH_SAMPLES: u16 = 32;

/// Quadratic Bézier curve through three control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    /// Start point
    pub p0: Vec3,
    /// Control point
    pub p1: Vec3,
    /// End point
    pub p2: Vec3,
}

impl QuadraticBezier {
    /// Create a curve from its control points
    pub const fn new(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        Self { p0, p1, p2 }
    }

    /// Point at parameter `t` in `[0, 1]`
    pub fn point(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        self.p0 * (u * u) + self.p1 * (2.0 * u * t) + self.p2 * (t * t)
    }

    /// First derivative at `t`
    pub fn tangent(&self, t: f32) -> Vec3 {
        (self.p1 - self.p0) * (2.0 * (1.0 - t)) + (self.p2 - self.p1) * (2.0 * t)
    }

    /// Polyline approximation of the arc length
    pub fn approximate_length(&self) -> f32 {
        let samples = f32::from(LENGTH_SAMPLES);
        let mut previous = self.p0;
        let mut length = 0.0;
        for i in 1..=LENGTH_SAMPLES {
            let next = self.point(f32::from(i) / samples);
            length += (next - previous).norm();
            previous = next;
        }
        length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints_and_midpoint() {
        let curve = QuadraticBezier::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        );
        assert_relative_eq!(curve.point(0.0), curve.p0);
        assert_relative_eq!(curve.point(1.0), curve.p2);
        assert_relative_eq!(curve.point(0.5), Vec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(curve.tangent(0.5), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_length_of_straight_curve() {
        let curve = QuadraticBezier::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(6.0, 0.0, 0.0),
        );
        assert_relative_eq!(curve.approximate_length(), 6.0, epsilon = 1e-4);
    }
}
