//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use glam::Vec3A;

/// Position in world space. Shares the SIMD vector type with directions and colors.
pub type Point3 = Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The eye (or a defocus disk sample) for primary rays, a surface point
    /// for scattered rays.
    pub origin: Point3,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized; every consumer either works with any
    /// length or normalizes explicitly.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Point3, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + t * self.direction
    }
}
