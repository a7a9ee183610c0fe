//! Triangle meshes
//!
//! A mesh is stored in MODEL SPACE and never modified after construction;
//! world-space placement is supplied per query as a 4x4 matrix. Every
//! triangle index is checked against the vertex count up front, so
//! [`Mesh::triangle`] can build [`Triangle`]s without further validation.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::{is_finite_point, Point3, Vec3};
use crate::geometry::Triangle;

/// Invalid mesh data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A triangle referenced a vertex that does not exist
    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending triangle
        triangle: usize,
        /// Offending vertex index
        index: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    /// A vertex had a NaN or infinite coordinate
    #[error("Vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Offending vertex
        index: usize,
    },

    /// Per-vertex colors did not line up with the vertices
    #[error("Mesh has {vertices} vertices but {colors} colors")]
    ColorCountMismatch {
        /// Number of vertices
        vertices: usize,
        /// Number of colors supplied
        colors: usize,
    },
}

/// Serialized form of a [`Mesh`], validated on the way in
#[derive(Deserialize)]
struct MeshData {
    vertices: Vec<Point3>,
    #[serde(default)]
    colors: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl TryFrom<MeshData> for Mesh {
    type Error = MeshError;

    fn try_from(data: MeshData) -> Result<Self, Self::Error> {
        let mesh = Self::new(data.vertices, data.triangles)?;
        if data.colors.is_empty() {
            Ok(mesh)
        } else {
            mesh.with_colors(data.colors)
        }
    }
}

/// Indexed triangle mesh in model space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeshData")]
pub struct Mesh {
    vertices: Vec<Point3>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    colors: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh from MODEL SPACE vertices and index triples
    pub fn new(vertices: Vec<Point3>, triangles: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        if let Some(index) = vertices.iter().position(|v| !is_finite_point(v)) {
            return Err(MeshError::NonFiniteVertex { index });
        }

        let vertex_count = vertices.len();
        for (triangle, indices) in triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self {
            vertices,
            colors: Vec::new(),
            triangles,
        })
    }

    /// Attaches one color per vertex (rendering only, ignored by collision)
    pub fn with_colors(mut self, colors: Vec<Vec3>) -> Result<Self, MeshError> {
        if colors.len() != self.vertices.len() {
            return Err(MeshError::ColorCountMismatch {
                vertices: self.vertices.len(),
                colors: colors.len(),
            });
        }
        self.colors = colors;
        Ok(self)
    }

    /// Vertex positions
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Per-vertex colors, empty if none were attached
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Vertex index triples
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Triangle `index` as a geometric value
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.triangle_count()`.
    pub fn triangle(&self, index: usize) -> Triangle {
        let [a, b, c] = self.triangles[index];
        Triangle::from_parts(
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        )
    }

    /// All triangles in index order
    pub fn triangles_iter(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        (0..self.triangles.len()).map(|index| self.triangle(index))
    }

    /// Latitude/longitude sphere centered on the origin with outward winding.
    ///
    /// One vertex per pole plus `rings - 1` rings of `segments` vertices;
    /// at least 2 rings and 3 segments are used.
    pub fn uv_sphere(radius: f32, rings: u32, segments: u32) -> Result<Self, MeshError> {
        let rings = rings.max(2);
        let segments = segments.max(3);

        let mut vertices = vec![Point3::new(0.0, radius, 0.0)];
        for ring in 1..rings {
            let phi = PI * ring as f32 / rings as f32;
            for segment in 0..segments {
                let theta = TAU * segment as f32 / segments as f32;
                vertices.push(Point3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.cos(),
                    radius * phi.sin() * theta.sin(),
                ));
            }
        }
        vertices.push(Point3::new(0.0, -radius, 0.0));

        let bottom = rings * segments - segments + 1;
        let ring_start = |ring: u32| 1 + (ring - 1) * segments;
        let mut triangles = Vec::with_capacity((2 * segments * (rings - 1)) as usize);

        for segment in 0..segments {
            let next = (segment + 1) % segments;
            triangles.push([0, ring_start(1) + next, ring_start(1) + segment]);
        }
        for ring in 1..rings - 1 {
            let (upper, lower) = (ring_start(ring), ring_start(ring + 1));
            for segment in 0..segments {
                let next = (segment + 1) % segments;
                triangles.push([upper + segment, upper + next, lower + segment]);
                triangles.push([upper + next, lower + next, lower + segment]);
            }
        }
        let last = ring_start(rings - 1);
        for segment in 0..segments {
            let next = (segment + 1) % segments;
            triangles.push([bottom, last + segment, last + next]);
        }

        Self::new(vertices, triangles)
    }
}
