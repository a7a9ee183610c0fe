//! Planes

use super::{check_point, GeometryError, Line, Triangle};
use crate::foundation::math::{nan_point, Point3, Vec3};

/// A plane through `point` with a unit `normal`; "above" is the side the normal points to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Vec3,
}

impl Plane {
    /// Creates a plane; the normal is normalized and must be finite and non-zero
    pub fn new(point: Point3, normal: Vec3) -> Result<Self, GeometryError> {
        check_point(&point)?;
        let length = normal.magnitude();
        if !length.is_finite() || length <= f32::EPSILON {
            return Err(GeometryError::ZeroNormal);
        }
        Ok(Self {
            point,
            normal: normal / length,
        })
    }

    /// Supporting plane of a triangle, normal by the right-hand rule
    pub fn from_triangle(triangle: &Triangle) -> Result<Self, GeometryError> {
        Self::new(triangle.p1(), triangle.normal())
    }

    /// A point on the plane
    pub const fn point(&self) -> Point3 {
        self.point
    }

    /// Unit normal
    pub const fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Distance from the plane, positive above
    pub fn signed_distance(&self, point: &Point3) -> f32 {
        self.normal.dot(&(*point - self.point))
    }

    /// Whether `point` is more than `eps` above the plane
    pub fn above(&self, point: &Point3, eps: f32) -> bool {
        self.signed_distance(point) > eps
    }

    /// Whether `point` is more than `eps` below the plane
    pub fn below(&self, point: &Point3, eps: f32) -> bool {
        self.signed_distance(point) < -eps
    }

    /// Whether `point` lies on the plane within `eps`
    pub fn contains(&self, point: &Point3, eps: f32) -> bool {
        self.signed_distance(point).abs() <= eps
    }

    /// Point where `line` meets the plane, or the NaN sentinel when they are parallel
    pub fn intersect_line(&self, line: &Line) -> Point3 {
        let denom = self.normal.dot(&line.direction());
        if denom.abs() <= f32::EPSILON {
            return nan_point();
        }
        let t = self.normal.dot(&(self.point - line.point())) / denom;
        line.point_at(t)
    }

    /// Line shared by both planes, or the NaN sentinel line when they are parallel
    pub fn intersect_plane(&self, other: &Plane) -> Line {
        let direction = self.normal.cross(&other.normal);
        let sin_squared = direction.magnitude_squared();
        if sin_squared <= f32::EPSILON {
            return Line::sentinel();
        }

        // Point on both planes closest to the origin, as a combination of the normals
        let d1 = self.normal.dot(&self.point.coords);
        let d2 = other.normal.dot(&other.point.coords);
        let cos = self.normal.dot(&other.normal);
        let coords = (self.normal * (d1 - d2 * cos) + other.normal * (d2 - d1 * cos)) / sin_squared;

        Line::new(direction, Point3::from(coords)).unwrap_or_else(|_| Line::sentinel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{is_nan_point, EPSILON};
    use approx::assert_relative_eq;

    fn xy_plane() -> Plane {
        Plane::new(Point3::origin(), Vec3::new(0.0, 0.0, 2.0)).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_normal() {
        assert_eq!(
            Plane::new(Point3::origin(), Vec3::zeros()),
            Err(GeometryError::ZeroNormal)
        );
    }

    #[test]
    fn test_above_below_contains() {
        let plane = xy_plane();
        let up = Point3::new(3.0, -2.0, 0.5);
        let down = Point3::new(0.0, 0.0, -0.5);
        let on = Point3::new(10.0, 10.0, 0.0);

        assert!(plane.above(&up, EPSILON) && !plane.below(&up, EPSILON));
        assert!(plane.below(&down, EPSILON) && !plane.above(&down, EPSILON));
        assert!(plane.contains(&on, EPSILON));
        assert!(!plane.above(&on, EPSILON) && !plane.below(&on, EPSILON));
        assert_relative_eq!(plane.signed_distance(&up), 0.5);
    }

    #[test]
    fn test_from_triangle() {
        let triangle = Triangle::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        )
        .unwrap();
        let plane = Plane::from_triangle(&triangle).unwrap();
        assert_relative_eq!(plane.normal(), Vec3::new(0.0, 0.0, 1.0));
        assert!(plane.contains(&Point3::new(5.0, 5.0, 1.0), EPSILON));

        let sliver = Triangle::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)).unwrap();
        assert_eq!(Plane::from_triangle(&sliver), Err(GeometryError::ZeroNormal));
    }

    #[test]
    fn test_line_intersection() {
        let plane = xy_plane();
        let line = Line::new(Vec3::new(1.0, 0.0, 1.0), Point3::new(0.0, 0.0, 2.0)).unwrap();
        assert_relative_eq!(plane.intersect_line(&line), Point3::new(-2.0, 0.0, 0.0), epsilon = 1e-5);

        let parallel = Line::new(Vec3::new(1.0, 1.0, 0.0), Point3::new(0.0, 0.0, 2.0)).unwrap();
        assert!(is_nan_point(&plane.intersect_line(&parallel)));
    }

    #[test]
    fn test_plane_intersection() {
        let xy = xy_plane();
        let shifted_xz = Plane::new(Point3::new(0.0, 3.0, 0.0), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        let line = xy.intersect_plane(&shifted_xz);

        assert!(!line.is_sentinel());
        assert_relative_eq!(line.direction().x.abs(), 1.0, epsilon = 1e-6);
        assert!(xy.contains(&line.point(), EPSILON));
        assert!(shifted_xz.contains(&line.point(), EPSILON));
        assert!(xy.contains(&line.point_at(4.0), EPSILON));
        assert!(shifted_xz.contains(&line.point_at(4.0), EPSILON));
    }

    #[test]
    fn test_parallel_planes_give_sentinel() {
        let a = xy_plane();
        let b = Plane::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert!(a.intersect_plane(&b).is_sentinel());
    }
}
