//! Geometric primitives and their predicates
//!
//! Every primitive is an immutable `Copy` value stored in model space.
//! Checked constructors reject non-finite input with a [`GeometryError`];
//! degenerate intersection queries (parallel planes, lines lying in a plane)
//! return NaN sentinels instead of failing, see
//! [`is_nan_point`](crate::foundation::math::is_nan_point).
//!
//! # Module Organization
//!
//! - [`sphere`] - Bounding spheres, the hierarchy's volume type
//! - [`triangle`] - Mesh triangles, circumcenters and exact overlap tests
//! - [`plane`] - Planes and plane/line, plane/plane intersection
//! - [`line`] - Infinite lines and line segments

pub mod sphere;
pub mod triangle;
pub mod plane;
pub mod line;

pub use sphere::Sphere;
pub use triangle::Triangle;
pub use plane::Plane;
pub use line::{Line, LineSegment};

use crate::foundation::math::{is_finite_point, Point3};
use thiserror::Error;

/// Invalid input to a primitive constructor
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A coordinate was NaN or infinite
    #[error("Point has a non-finite coordinate: ({0}, {1}, {2})")]
    NonFinitePoint(f32, f32, f32),

    /// A sphere radius was NaN or infinite
    #[error("Sphere radius is not finite: {0}")]
    NonFiniteRadius(f32),

    /// A sphere radius was negative
    #[error("Sphere radius is negative: {0}")]
    NegativeRadius(f32),

    /// A plane normal had zero length
    #[error("Plane normal has zero length")]
    ZeroNormal,

    /// A line direction had zero length or was not finite
    #[error("Line direction has zero length or is not finite")]
    ZeroDirection,
}

/// Reject points with NaN or infinite coordinates
pub(crate) fn check_point(point: &Point3) -> Result<(), GeometryError> {
    if is_finite_point(point) {
        Ok(())
    } else {
        Err(GeometryError::NonFinitePoint(point.x, point.y, point.z))
    }
}
