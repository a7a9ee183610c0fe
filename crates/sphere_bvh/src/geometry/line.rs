//! Infinite lines and line segments

use super::{check_point, GeometryError, Plane};
use crate::foundation::math::{is_nan_point, is_nan_vector, nan_point, nan_vector, Point3, Vec3};

/// An infinite line through `point` along a unit `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    direction: Vec3,
    point: Point3,
}

impl Line {
    /// Creates a line; the direction is normalized and must be finite and non-zero
    pub fn new(direction: Vec3, point: Point3) -> Result<Self, GeometryError> {
        check_point(&point)?;
        let length = direction.magnitude();
        if !length.is_finite() || length <= f32::EPSILON {
            return Err(GeometryError::ZeroDirection);
        }
        Ok(Self {
            direction: direction / length,
            point,
        })
    }

    /// Line through two distinct points
    pub fn through(a: &Point3, b: &Point3) -> Result<Self, GeometryError> {
        Self::new(b - a, *a)
    }

    /// The "no unique line" value returned by parallel plane intersections
    pub(crate) fn sentinel() -> Self {
        Self {
            direction: nan_vector(),
            point: nan_point(),
        }
    }

    /// Whether this is the NaN sentinel returned by a degenerate intersection
    pub fn is_sentinel(&self) -> bool {
        is_nan_vector(&self.direction) || is_nan_point(&self.point)
    }

    /// Unit direction
    pub const fn direction(&self) -> Vec3 {
        self.direction
    }

    /// A point on the line
    pub const fn point(&self) -> Point3 {
        self.point
    }

    /// Get a point along the line at parameter t
    pub fn point_at(&self, t: f32) -> Point3 {
        self.point + self.direction * t
    }

    /// Distance from `point` to the line
    pub fn distance_to(&self, point: &Point3) -> f32 {
        (*point - self.point).cross(&self.direction).magnitude()
    }

    /// Whether `point` lies on the line within `eps`
    pub fn contains(&self, point: &Point3, eps: f32) -> bool {
        self.distance_to(point) <= eps
    }
}

/// A finite segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    p1: Point3,
    p2: Point3,
}

impl LineSegment {
    /// Creates a segment, rejecting non-finite endpoints
    pub fn new(p1: Point3, p2: Point3) -> Result<Self, GeometryError> {
        check_point(&p1)?;
        check_point(&p2)?;
        Ok(Self { p1, p2 })
    }

    /// Builds a segment from endpoints already known to be finite
    pub(crate) const fn from_parts(p1: Point3, p2: Point3) -> Self {
        Self { p1, p2 }
    }

    /// Start point
    pub const fn p1(&self) -> Point3 {
        self.p1
    }

    /// End point
    pub const fn p2(&self) -> Point3 {
        self.p2
    }

    /// Segment length
    pub fn length(&self) -> f32 {
        (self.p2 - self.p1).magnitude()
    }

    /// Midpoint of the segment
    pub fn midpoint(&self) -> Point3 {
        nalgebra::center(&self.p1, &self.p2)
    }

    /// Closest point on the segment to `point`
    pub fn closest_point(&self, point: &Point3) -> Point3 {
        let d = self.p2 - self.p1;
        let length_squared = d.magnitude_squared();
        if length_squared <= f32::MIN_POSITIVE {
            return self.p1;
        }
        let t = ((*point - self.p1).dot(&d) / length_squared).clamp(0.0, 1.0);
        self.p1 + d * t
    }

    /// Whether `point` lies on the segment within `eps`
    pub fn contains(&self, point: &Point3, eps: f32) -> bool {
        (self.closest_point(point) - *point).magnitude() <= eps
    }

    /// Point where the segment crosses `plane`.
    ///
    /// Returns the NaN sentinel when both endpoints lie strictly on the same
    /// side, or when the segment lies in (or parallel to) the plane so the
    /// crossing is not unique.
    pub fn intersect_plane(&self, plane: &Plane) -> Point3 {
        let d1 = plane.signed_distance(&self.p1);
        let d2 = plane.signed_distance(&self.p2);
        if d1 * d2 > 0.0 || d1 == d2 {
            return nan_point();
        }
        let t = d1 / (d1 - d2);
        self.p1 + (self.p2 - self.p1) * t
    }

    /// Whether the segment crosses `plane` at a unique point
    pub fn crosses(&self, plane: &Plane) -> bool {
        !is_nan_point(&self.intersect_plane(plane))
    }

    /// Closest pair of points between two segments (first on `self`)
    pub fn closest_points(&self, other: &LineSegment) -> (Point3, Point3) {
        const TINY: f32 = f32::MIN_POSITIVE;

        let d1 = self.p2 - self.p1;
        let d2 = other.p2 - other.p1;
        let r = self.p1 - other.p1;
        let a = d1.magnitude_squared();
        let e = d2.magnitude_squared();
        let f = d2.dot(&r);

        let (s, t) = if a <= TINY && e <= TINY {
            (0.0, 0.0)
        } else if a <= TINY {
            (0.0, (f / e).clamp(0.0, 1.0))
        } else {
            let c = d1.dot(&r);
            if e <= TINY {
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else {
                let b = d1.dot(&d2);
                let denom = a * e - b * b;
                // Parallel segments: any s works, start from the first endpoint
                let s = if denom > TINY {
                    ((b * f - c * e) / denom).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let t = (b * s + f) / e;
                if t < 0.0 {
                    ((-c / a).clamp(0.0, 1.0), 0.0)
                } else if t > 1.0 {
                    (((b - c) / a).clamp(0.0, 1.0), 1.0)
                } else {
                    (s, t)
                }
            }
        };

        (self.p1 + d1 * s, other.p1 + d2 * t)
    }

    /// Intersection point of two segments, if they pass within `eps` of each other
    pub fn intersect(&self, other: &LineSegment, eps: f32) -> Option<Point3> {
        let (on_self, on_other) = self.closest_points(other);
        if (on_self - on_other).magnitude() <= eps {
            Some(nalgebra::center(&on_self, &on_other))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::EPSILON;
    use approx::assert_relative_eq;

    fn segment(a: [f32; 3], b: [f32; 3]) -> LineSegment {
        LineSegment::new(Point3::from(a), Point3::from(b)).unwrap()
    }

    #[test]
    fn test_line_rejects_zero_direction() {
        assert_eq!(
            Line::new(Vec3::zeros(), Point3::origin()),
            Err(GeometryError::ZeroDirection)
        );
        assert_eq!(
            Line::through(&Point3::new(1.0, 1.0, 1.0), &Point3::new(1.0, 1.0, 1.0)),
            Err(GeometryError::ZeroDirection)
        );
    }

    #[test]
    fn test_line_contains_and_point_at() {
        let line = Line::new(Vec3::new(0.0, 2.0, 0.0), Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(line.direction(), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(line.point_at(3.0), Point3::new(1.0, 3.0, 0.0));
        assert!(line.contains(&Point3::new(1.0, -7.0, 0.0), EPSILON));
        assert!(!line.contains(&Point3::new(1.1, 0.0, 0.0), EPSILON));
        assert_relative_eq!(line.distance_to(&Point3::new(1.0, 5.0, 2.0)), 2.0);
    }

    #[test]
    fn test_segment_contains() {
        let s = segment([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert!(s.contains(&Point3::new(1.0, 0.0, 0.0), EPSILON));
        assert!(!s.contains(&Point3::new(3.0, 0.0, 0.0), EPSILON));
        assert_relative_eq!(s.length(), 2.0);
        assert_relative_eq!(s.midpoint(), Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_segment_plane_crossing() {
        let plane = Plane::new(Point3::origin(), Vec3::new(0.0, 0.0, 1.0)).unwrap();
        let crossing = segment([1.0, 1.0, -1.0], [1.0, 1.0, 3.0]);
        assert_relative_eq!(crossing.intersect_plane(&plane), Point3::new(1.0, 1.0, 0.0));
        assert!(crossing.crosses(&plane));

        let same_side = segment([0.0, 0.0, 1.0], [0.0, 0.0, 2.0]);
        assert!(is_nan_point(&same_side.intersect_plane(&plane)));

        let lying_in_plane = segment([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        assert!(!lying_in_plane.crosses(&plane));
    }

    #[test]
    fn test_crossing_segments_intersect() {
        let a = segment([-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = segment([0.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let hit = a.intersect(&b, EPSILON).unwrap();
        assert_relative_eq!(hit, Point3::origin(), epsilon = 1e-6);
    }

    #[test]
    fn test_skew_segments_miss() {
        let a = segment([-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = segment([0.0, -1.0, 0.5], [0.0, 1.0, 0.5]);
        assert!(a.intersect(&b, EPSILON).is_none());
        let (p, q) = a.closest_points(&b);
        assert_relative_eq!((p - q).magnitude(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_collinear_overlapping_segments_intersect() {
        let a = segment([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let b = segment([1.0, 0.0, 0.0], [3.0, 0.0, 0.0]);
        assert!(a.intersect(&b, EPSILON).is_some());
    }
}
