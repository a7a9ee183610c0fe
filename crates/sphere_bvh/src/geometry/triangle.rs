//! Triangles
//!
//! Besides the basic measures, a triangle knows its circumcenter (needed by
//! the minimum bounding sphere solver for acute triangles) and an exact
//! overlap test against another triangle, used to resolve leaf pairs during
//! collision traversal.

use super::{check_point, GeometryError, LineSegment};
use crate::foundation::math::{nan_point, Mat3, Mat4, Point3, Vec3};

/// A triangle given by three vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    p1: Point3,
    p2: Point3,
    p3: Point3,
}

impl Triangle {
    /// Creates a new triangle, rejecting non-finite vertices
    pub fn new(p1: Point3, p2: Point3, p3: Point3) -> Result<Self, GeometryError> {
        check_point(&p1)?;
        check_point(&p2)?;
        check_point(&p3)?;
        Ok(Self { p1, p2, p3 })
    }

    /// Builds a triangle from vertices already known to be finite
    pub(crate) const fn from_parts(p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p1, p2, p3 }
    }

    /// First vertex
    pub const fn p1(&self) -> Point3 {
        self.p1
    }

    /// Second vertex
    pub const fn p2(&self) -> Point3 {
        self.p2
    }

    /// Third vertex
    pub const fn p3(&self) -> Point3 {
        self.p3
    }

    /// All three vertices in order
    pub const fn vertices(&self) -> [Point3; 3] {
        [self.p1, self.p2, self.p3]
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Point3 {
        Point3::from((self.p1.coords + self.p2.coords + self.p3.coords) / 3.0)
    }

    /// Unnormalized normal (right-hand rule); its length is twice the area
    pub fn normal(&self) -> Vec3 {
        (self.p2 - self.p1).cross(&(self.p3 - self.p1))
    }

    /// Area of the triangle
    pub fn area(&self) -> f32 {
        0.5 * self.normal().magnitude()
    }

    /// Whether `point` lies on the triangle.
    ///
    /// The three sub-triangles formed with `point` must add up to the
    /// triangle's own area within `eps`. For a degenerate (zero-area)
    /// triangle the test accepts every point of the supporting segment and,
    /// within `eps`, points on the supporting line just past it.
    pub fn contains(&self, point: &Point3, eps: f32) -> bool {
        let sub_area = |a: &Point3, b: &Point3| 0.5 * (a - point).cross(&(b - point)).magnitude();
        let sum = sub_area(&self.p1, &self.p2) + sub_area(&self.p2, &self.p3) + sub_area(&self.p3, &self.p1);
        (sum - self.area()).abs() <= eps
    }

    /// Point equidistant from all three vertices, in the triangle's plane.
    ///
    /// Intersects the perpendicular bisector planes of (p1, p2) and (p1, p3)
    /// with the supporting plane and solves the 3x3 system with Cramer's rule,
    /// working relative to `p1` to keep the numbers small. Returns the NaN
    /// sentinel for collinear vertices.
    pub fn circumcenter(&self) -> Point3 {
        let u = self.p2 - self.p1;
        let v = self.p3 - self.p1;
        let n = u.cross(&v);

        let system = Mat3::from_rows(&[u.transpose(), v.transpose(), n.transpose()]);
        let det = system.determinant();
        // det == |n|^2; compare against the edge lengths so the test is scale free
        if det.abs() <= f32::EPSILON * u.magnitude_squared() * v.magnitude_squared() {
            return nan_point();
        }

        let rhs = Vec3::new(0.5 * u.magnitude_squared(), 0.5 * v.magnitude_squared(), 0.0);
        let solve = |column: usize| {
            let mut replaced = system;
            replaced.set_column(column, &rhs);
            replaced.determinant() / det
        };

        self.p1 + Vec3::new(solve(0), solve(1), solve(2))
    }

    /// Whether the vertices are collinear, leaving no usable normal
    pub fn is_degenerate(&self) -> bool {
        !(self.normal().magnitude_squared() > f32::MIN_POSITIVE)
    }

    /// Segment covered by a degenerate triangle: its longest edge
    fn span(&self) -> LineSegment {
        let edges = [(self.p1, self.p2), (self.p2, self.p3), (self.p3, self.p1)];
        let (p, q) = edges
            .into_iter()
            .max_by(|(a, b), (c, d)| (b - a).magnitude_squared().total_cmp(&(d - c).magnitude_squared()))
            .unwrap_or((self.p1, self.p2));
        LineSegment::from_parts(p, q)
    }

    /// Maps every vertex through `matrix`
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            p1: matrix.transform_point(&self.p1),
            p2: matrix.transform_point(&self.p2),
            p3: matrix.transform_point(&self.p3),
        }
    }

    /// Test if this triangle intersects another triangle
    /// Uses the Separating Axis Theorem (SAT) over 17 candidate axes:
    /// - 2 face normals (one per triangle)
    /// - 9 edge-edge cross products
    /// - 6 in-plane edge normals, which separate coplanar pairs
    /// - 6 edge normals taken in the other triangle's plane, which separate
    ///   a collinear triangle lying in that plane
    ///
    /// Two collinear triangles have no usable axis and are compared as
    /// segments instead. Touching triangles count as intersecting.
    pub fn intersects(&self, other: &Triangle) -> bool {
        // Helper to project a triangle onto an axis and get min/max
        fn project(tri: &Triangle, axis: &Vec3) -> (f32, f32) {
            let p0 = axis.dot(&tri.p1.coords);
            let p1 = axis.dot(&tri.p2.coords);
            let p2 = axis.dot(&tri.p3.coords);
            (p0.min(p1).min(p2), p0.max(p1).max(p2))
        }

        // Returns false if the axis separates the triangles
        fn overlaps_on(a: &Triangle, b: &Triangle, axis: &Vec3) -> bool {
            // Degenerate (or NaN) axes cannot separate anything, skip them
            if !(axis.magnitude_squared() > f32::MIN_POSITIVE) {
                return true;
            }
            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            max_a >= min_b && max_b >= min_a
        }

        if self.is_degenerate() && other.is_degenerate() {
            let (span_a, span_b) = (self.span(), other.span());
            let (on_a, on_b) = span_a.closest_points(&span_b);
            let reach = f32::EPSILON * (span_a.length() + span_b.length());
            return (on_a - on_b).magnitude() <= reach;
        }

        let edges_a = [self.p2 - self.p1, self.p3 - self.p2, self.p1 - self.p3];
        let edges_b = [other.p2 - other.p1, other.p3 - other.p2, other.p1 - other.p3];
        let normal_a = self.normal();
        let normal_b = other.normal();

        if !overlaps_on(self, other, &normal_a) || !overlaps_on(self, other, &normal_b) {
            return false;
        }

        for edge_a in &edges_a {
            for edge_b in &edges_b {
                if !overlaps_on(self, other, &edge_a.cross(edge_b)) {
                    return false;
                }
            }
        }

        let in_plane_a = edges_a.iter().chain(&edges_b).map(|edge| normal_a.cross(edge));
        let in_plane_b = edges_b.iter().chain(&edges_a).map(|edge| normal_b.cross(edge));
        for axis in in_plane_a.chain(in_plane_b) {
            if !overlaps_on(self, other, &axis) {
                return false;
            }
        }

        // No separating axis found = triangles intersect
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{is_nan_point, Transform, EPSILON};
    use approx::assert_relative_eq;

    fn tri(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(Point3::from(a), Point3::from(b), Point3::from(c)).unwrap()
    }

    #[test]
    fn test_new_rejects_nan() {
        let result = Triangle::new(
            Point3::origin(),
            Point3::new(1.0, f32::NAN, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!(matches!(result, Err(GeometryError::NonFinitePoint(..))));
    }

    #[test]
    fn test_area_and_centroid() {
        let t = tri([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        assert_relative_eq!(t.area(), 2.0);
        assert_relative_eq!(t.centroid(), Point3::new(2.0 / 3.0, 2.0 / 3.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_contains_point() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(t.contains(&Point3::new(0.25, 0.25, 0.0), EPSILON));
        assert!(t.contains(&Point3::new(1.0, 0.0, 0.0), EPSILON));
        assert!(!t.contains(&Point3::new(1.0, 1.0, 0.0), EPSILON));
        assert!(!t.contains(&Point3::new(0.25, 0.25, 0.5), EPSILON));
    }

    #[test]
    fn test_contains_on_degenerate_triangle() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert!(t.contains(&Point3::new(1.5, 0.0, 0.0), EPSILON));
        assert!(!t.contains(&Point3::new(1.0, 1.0, 0.0), EPSILON));
    }

    #[test]
    fn test_circumcenter_is_equidistant() {
        let t = tri([0.3, -1.0, 2.0], [1.7, 0.4, 0.1], [-0.6, 1.1, 0.9]);
        let center = t.circumcenter();
        let d1 = (t.p1() - center).magnitude();
        let d2 = (t.p2() - center).magnitude();
        let d3 = (t.p3() - center).magnitude();
        assert_relative_eq!(d1, d2, epsilon = 1e-4);
        assert_relative_eq!(d1, d3, epsilon = 1e-4);
        // Lies in the triangle's plane
        assert_relative_eq!(t.normal().dot(&(center - t.p1())), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_circumcenter_of_right_triangle_is_hypotenuse_midpoint() {
        let t = tri([0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        assert_relative_eq!(t.circumcenter(), Point3::new(2.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_circumcenter_collinear_is_sentinel() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]);
        assert!(is_nan_point(&t.circumcenter()));
    }

    #[test]
    fn test_transformed() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let matrix = Transform::from_position(Vec3::new(0.0, 0.0, 5.0)).to_matrix();
        let moved = t.transformed(&matrix);
        assert_relative_eq!(moved.p3(), Point3::new(0.0, 1.0, 5.0));
        assert_relative_eq!(moved.area(), t.area());
    }

    #[test]
    fn test_crossing_triangles_intersect() {
        let a = tri([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([0.0, 0.0, -1.0], [0.0, 0.0, 1.0], [0.0, 2.0, 0.0]);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_parallel_triangles_are_separated() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([0.0, 0.0, 0.1], [1.0, 0.0, 0.1], [0.0, 1.0, 0.1]);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_identical_triangles_intersect() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(a.intersects(&a));
    }

    #[test]
    fn test_coplanar_disjoint_triangles_are_separated() {
        // Same plane, separated only along an in-plane edge normal
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([1.0, 1.0, 0.0], [2.0, 1.0, 0.0], [1.0, 2.0, 0.0]);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_coplanar_overlapping_triangles_intersect() {
        let a = tri([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        let b = tri([0.5, 0.5, 0.0], [3.0, 0.5, 0.0], [0.5, 3.0, 0.0]);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_parallel_collinear_triangles_are_separated() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let b = tri([0.0, 0.5, 0.0], [1.0, 0.5, 0.0], [2.0, 0.5, 0.0]);
        assert!(a.is_degenerate() && b.is_degenerate());
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_crossing_collinear_triangles_intersect() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let b = tri([1.0, -1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
        assert!(a.intersects(&b));

        let touching = tri([2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [2.0, 2.0, 0.0]);
        assert!(a.intersects(&touching));

        let skew = tri([1.0, -1.0, 0.5], [1.0, 0.0, 0.5], [1.0, 1.0, 0.5]);
        assert!(!a.intersects(&skew));
    }

    #[test]
    fn test_collinear_triangle_beside_corner_is_separated() {
        // In the plane of `b`, only the sliver's own edge normal separates them
        let a = tri([0.5, -1.0, 0.0], [1.0, -0.5, 0.0], [1.5, 0.0, 0.0]);
        let b = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_collinear_triangle_piercing_face_intersects() {
        let a = tri([0.25, 0.25, -1.0], [0.25, 0.25, 0.0], [0.25, 0.25, 1.0]);
        let b = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_edge_touching_triangles_intersect() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        assert!(a.intersects(&b));
    }
}
