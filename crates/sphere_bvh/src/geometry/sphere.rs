//! Bounding spheres
//!
//! The sphere is the volume stored in every hierarchy node. Overlap tests
//! compare squared distances so the hot path in traversal never takes a
//! square root; only [`Sphere::signed_distance`] pays for one, and traversal
//! calls it once per child pair to order the descent.

use approx::{AbsDiffEq, RelativeEq};

use super::{check_point, GeometryError, Triangle};
use crate::foundation::math::{Mat4, Point3};

/// A sphere with a center and a non-negative radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f32,
}

impl Sphere {
    /// Creates a sphere, rejecting non-finite centers and non-finite or negative radii
    pub fn new(center: Point3, radius: f32) -> Result<Self, GeometryError> {
        check_point(&center)?;
        if !radius.is_finite() {
            return Err(GeometryError::NonFiniteRadius(radius));
        }
        if radius < 0.0 {
            return Err(GeometryError::NegativeRadius(radius));
        }
        Ok(Self { center, radius })
    }

    /// Builds a sphere from values already known to be valid
    pub(crate) const fn from_parts(center: Point3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere center
    pub const fn center(&self) -> Point3 {
        self.center
    }

    /// Sphere radius
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether `point` lies inside the sphere, allowing `eps` of slack
    pub fn contains_point(&self, point: &Point3, eps: f32) -> bool {
        (*point - self.center).magnitude() <= self.radius + eps
    }

    /// Whether all three vertices of `triangle` lie inside the sphere
    pub fn contains_triangle(&self, triangle: &Triangle, eps: f32) -> bool {
        triangle
            .vertices()
            .iter()
            .all(|vertex| self.contains_point(vertex, eps))
    }

    /// Whether `other` lies entirely inside this sphere, allowing `eps` of slack
    pub fn encloses(&self, other: &Sphere, eps: f32) -> bool {
        (other.center - self.center).magnitude() + other.radius <= self.radius + eps
    }

    /// Distance between centers minus both radii; negative when the spheres overlap
    pub fn signed_distance(a: &Sphere, b: &Sphere) -> f32 {
        (a.center - b.center).magnitude() - a.radius - b.radius
    }

    /// Overlap test on squared distances; touching spheres count as colliding
    pub fn colliding(a: &Sphere, b: &Sphere) -> bool {
        let distance_squared = (a.center - b.center).magnitude_squared();
        let radius_sum = a.radius + b.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Get the penetration depth if intersecting (0.0 if not intersecting)
    pub fn penetration_depth(&self, other: &Sphere) -> f32 {
        (-Self::signed_distance(self, other)).max(0.0)
    }

    /// Maps the center through `matrix` and scales the radius by `radius_scale`
    ///
    /// Pass [`max_scale_factor`](crate::foundation::math::max_scale_factor) of
    /// the same matrix to keep the result enclosing the transformed geometry.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4, radius_scale: f32) -> Self {
        Self {
            center: matrix.transform_point(&self.center),
            radius: self.radius * radius_scale,
        }
    }
}

impl AbsDiffEq for Sphere {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.center.abs_diff_eq(&other.center, epsilon)
            && self.radius.abs_diff_eq(&other.radius, epsilon)
    }
}

impl RelativeEq for Sphere {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.center.relative_eq(&other.center, epsilon, max_relative)
            && self.radius.relative_eq(&other.radius, epsilon, max_relative)
    }
}
