//! Hierarchy and mesh pairing
//!
//! Leaf nodes store triangle indices, which only mean something for the
//! mesh the hierarchy was built from. [`BvhModel`] keeps the two together so
//! collision queries can never mix a hierarchy with a foreign mesh.

use super::{Bvh, BvhError};
use crate::bounding::BoundingVolume;
use crate::foundation::math::EPSILON;
use crate::geometry::{Sphere, Triangle};
use crate::mesh::Mesh;

/// A hierarchy bound to the mesh it indexes
#[derive(Debug, Clone)]
pub struct BvhModel<'m, V: BoundingVolume = Sphere> {
    mesh: &'m Mesh,
    bvh: Bvh<V>,
}

impl<'m, V: BoundingVolume> BvhModel<'m, V> {
    /// Builds a hierarchy over `mesh` and pairs them
    pub fn new(mesh: &'m Mesh) -> Self {
        Self {
            mesh,
            bvh: Bvh::build(mesh),
        }
    }

    /// Pairs an existing hierarchy with `mesh`.
    ///
    /// The hierarchy must bound this mesh: a different triangle count, a
    /// leaf that misses its triangle or a parent that misses a child is
    /// rejected (see [`Bvh::validate`]).
    pub fn from_parts(mesh: &'m Mesh, bvh: Bvh<V>) -> Result<Self, BvhError> {
        bvh.validate(mesh, EPSILON)?;
        Ok(Self { mesh, bvh })
    }

    /// Source mesh
    pub const fn mesh(&self) -> &'m Mesh {
        self.mesh
    }

    /// Hierarchy over the mesh
    pub const fn bvh(&self) -> &Bvh<V> {
        &self.bvh
    }

    /// Model-space triangle referenced by a leaf
    pub fn triangle(&self, index: usize) -> Triangle {
        self.mesh.triangle(index)
    }

    /// Releases the hierarchy, e.g. to pair it with a clone of the mesh
    pub fn into_bvh(self) -> Bvh<V> {
        self.bvh
    }
}
