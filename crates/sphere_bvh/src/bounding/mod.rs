//! Bounding volumes
//!
//! The hierarchy is generic over its volume type through [`BoundingVolume`].
//! [`Sphere`] is the only implementation; its constructors come from the
//! minimum bounding sphere solver in [`mbs`].

pub mod mbs;

pub use mbs::{mbs_spheres, mbs_triangle};

use crate::foundation::math::Mat4;
use crate::geometry::{Sphere, Triangle};

/// A volume that can bound triangles and be merged bottom-up into a hierarchy
pub trait BoundingVolume: Copy + std::fmt::Debug + Send + Sync {
    /// Smallest volume of this kind around a single triangle
    fn from_triangle(triangle: &Triangle) -> Self;

    /// Smallest volume of this kind around two volumes
    fn merge(a: &Self, b: &Self) -> Self;

    /// Whether `other` lies inside `self` within `eps`
    fn encloses(&self, other: &Self, eps: f32) -> bool;

    /// Whether every vertex of `triangle` lies inside `self` within `eps`
    fn contains_triangle(&self, triangle: &Triangle, eps: f32) -> bool;

    /// Volume mapped by an affine `matrix` whose largest stretch is `scale`
    #[must_use]
    fn transformed(&self, matrix: &Mat4, scale: f32) -> Self;

    /// Volume grown by `margin` in every direction
    #[must_use]
    fn inflated(&self, margin: f32) -> Self;

    /// Whether two volumes touch or overlap
    fn overlaps(a: &Self, b: &Self) -> bool;

    /// Signed gap between two volumes, negative when they overlap
    fn separation(a: &Self, b: &Self) -> f32;

    /// Size used to pick which side of a pair to subdivide
    fn extent(&self) -> f32;
}

impl BoundingVolume for Sphere {
    fn from_triangle(triangle: &Triangle) -> Self {
        mbs_triangle(triangle)
    }

    fn merge(a: &Self, b: &Self) -> Self {
        mbs_spheres(a, b)
    }

    fn encloses(&self, other: &Self, eps: f32) -> bool {
        Sphere::encloses(self, other, eps)
    }

    fn contains_triangle(&self, triangle: &Triangle, eps: f32) -> bool {
        Sphere::contains_triangle(self, triangle, eps)
    }

    fn transformed(&self, matrix: &Mat4, scale: f32) -> Self {
        Sphere::transformed(self, matrix, scale)
    }

    fn inflated(&self, margin: f32) -> Self {
        Sphere::from_parts(self.center(), (self.radius() + margin).max(0.0))
    }

    fn overlaps(a: &Self, b: &Self) -> bool {
        Sphere::colliding(a, b)
    }

    fn separation(a: &Self, b: &Self) -> f32 {
        Sphere::signed_distance(a, b)
    }

    fn extent(&self) -> f32 {
        self.radius()
    }
}
