//! Math utilities and types
//!
//! Provides the fundamental nalgebra aliases used by the geometry,
//! hierarchy and collision modules, plus the NaN sentinels returned by
//! degenerate intersection queries.

pub use nalgebra::{
    Vector3,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Default tolerance for containment and enclosure checks
pub const EPSILON: f32 = 1e-5;

/// Transform representing position, rotation, and scale
///
/// Collision queries take raw 4x4 world matrices; this is the convenient
/// way for callers to produce them.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Replace the scale factors
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        self.to_matrix().transform_point(point)
    }
}

/// Largest factor by which `matrix` can stretch a length.
///
/// This is the largest singular value of the linear (upper-left 3x3) part,
/// so a sphere of radius `r` maps inside a sphere of radius `r * factor`
/// for any affine matrix, including sheared and non-uniformly scaled ones.
pub fn max_scale_factor(matrix: &Mat4) -> f32 {
    let linear = Mat3::new(
        matrix.m11, matrix.m12, matrix.m13,
        matrix.m21, matrix.m22, matrix.m23,
        matrix.m31, matrix.m32, matrix.m33,
    );
    linear
        .svd(false, false)
        .singular_values
        .iter()
        .fold(0.0_f32, |acc, value| acc.max(*value))
}

/// Point with every coordinate NaN, returned when no unique intersection exists
pub fn nan_point() -> Point3 {
    Point3::new(f32::NAN, f32::NAN, f32::NAN)
}

/// Vector with every component NaN, returned when no unique direction exists
pub fn nan_vector() -> Vec3 {
    Vec3::new(f32::NAN, f32::NAN, f32::NAN)
}

/// Check whether a point is the NaN sentinel (any NaN coordinate counts)
pub fn is_nan_point(point: &Point3) -> bool {
    point.coords.iter().any(|c| c.is_nan())
}

/// Check whether a vector is the NaN sentinel (any NaN component counts)
pub fn is_nan_vector(vector: &Vec3) -> bool {
    vector.iter().any(|c| c.is_nan())
}

/// Check that every coordinate of a point is finite
pub fn is_finite_point(point: &Point3) -> bool {
    point.coords.iter().all(|c| c.is_finite())
}
