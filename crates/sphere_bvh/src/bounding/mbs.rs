//! Minimum bounding spheres
//!
//! Exact smallest enclosing spheres for a triangle and for a pair of
//! spheres. Leaf volumes come from [`mbs_triangle`]; every internal volume
//! is the [`mbs_spheres`] merge of its children.
//!
//! Both functions round the radius up to the largest distance they can
//! measure, so the enclosure checks in [`Sphere`] hold exactly for the
//! returned value, not just within a tolerance.

use crate::foundation::math::{is_nan_point, Point3, EPSILON};
use crate::geometry::{Sphere, Triangle};

/// Smallest sphere containing the three vertices of `triangle`.
///
/// If the sphere on the longest edge already holds the opposite vertex the
/// triangle is right or obtuse and that sphere is minimal; otherwise the
/// triangle is acute and the answer is the circumsphere.
pub fn mbs_triangle(triangle: &Triangle) -> Sphere {
    let [a, b, c] = triangle.vertices();
    let ab = (b - a).magnitude_squared();
    let bc = (c - b).magnitude_squared();
    let ca = (a - c).magnitude_squared();

    let (p, q, r) = if ab >= bc && ab >= ca {
        (a, b, c)
    } else if bc >= ca {
        (b, c, a)
    } else {
        (c, a, b)
    };

    let center = nalgebra::center(&p, &q);
    let radius = 0.5 * (q - p).magnitude();
    if (r - center).magnitude() <= radius + EPSILON {
        return Sphere::from_parts(center, farthest(&center, &[a, b, c]));
    }

    let circumcenter = triangle.circumcenter();
    // Collinear input always takes the edge branch above; this only guards rounding
    if is_nan_point(&circumcenter) {
        return Sphere::from_parts(center, farthest(&center, &[a, b, c]));
    }
    Sphere::from_parts(circumcenter, farthest(&circumcenter, &[a, b, c]))
}

/// Smallest sphere containing both `a` and `b`.
///
/// When one sphere already contains the other the larger one is returned
/// unchanged, `a` on a tie. This also covers concentric spheres of equal
/// radius, where the merge direction would be undefined.
pub fn mbs_spheres(a: &Sphere, b: &Sphere) -> Sphere {
    let offset = b.center() - a.center();
    let distance = offset.magnitude();
    if distance <= (a.radius() - b.radius()).abs() {
        return if b.radius() > a.radius() { *b } else { *a };
    }

    let direction = offset / distance;
    let low = a.center() - direction * a.radius();
    let high = b.center() + direction * b.radius();
    let center = nalgebra::center(&low, &high);

    let radius = (0.5 * (distance + a.radius() + b.radius()))
        .max((a.center() - center).magnitude() + a.radius())
        .max((b.center() - center).magnitude() + b.radius());
    Sphere::from_parts(center, radius)
}

fn farthest(center: &Point3, points: &[Point3]) -> f32 {
    points
        .iter()
        .map(|point| (point - center).magnitude())
        .fold(0.0, f32::max)
}
