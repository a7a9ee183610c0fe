//! Bounding volume hierarchy
//!
//! An immutable binary tree of bounding volumes over a mesh's triangles,
//! stored as a flat array. Nodes refer to their children by index and the
//! root is always the last node, so the structure has no pointers, no
//! cycles and copies in bulk. There is no mutation API: a hierarchy is built
//! once per mesh and only read afterward.
//!
//! # Module Organization
//!
//! - [`node`] - Leaf and internal nodes
//! - [`builder`] - Split heuristic and bottom-up construction
//! - [`diagnostics`] - Balance metric, graph export and summary statistics
//! - [`model`] - Pairing of a hierarchy with the mesh it was built from

pub mod node;
pub(crate) mod builder;
pub mod diagnostics;
pub mod model;

pub use diagnostics::BvhStats;
pub use model::BvhModel;
pub use node::{BvNode, BvNodeKind};

use thiserror::Error;

use crate::bounding::BoundingVolume;
use crate::foundation::logging::debug;
use crate::geometry::Sphere;
use crate::mesh::Mesh;

/// Hierarchy misuse detected at the API boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BvhError {
    /// The hierarchy was paired with a mesh it was not built from
    #[error("Hierarchy was built over {expected} triangles but the mesh has {actual}")]
    MeshMismatch {
        /// Triangle count the hierarchy was built over
        expected: usize,
        /// Triangle count of the supplied mesh
        actual: usize,
    },

    /// An internal node does not enclose one of its children
    #[error("Node {node} does not enclose its child {child}")]
    NotEnclosed {
        /// Parent node
        node: usize,
        /// Child that escapes it
        child: usize,
    },

    /// A leaf volume does not contain its triangle
    #[error("Leaf {node} does not contain triangle {triangle}")]
    TriangleNotContained {
        /// Leaf node
        node: usize,
        /// Triangle it should bound
        triangle: usize,
    },
}

/// Bounding volume hierarchy over one mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Bvh<V: BoundingVolume = Sphere> {
    nodes: Vec<BvNode<V>>,
    max_depth: usize,
    triangle_count: usize,
}

impl<V: BoundingVolume> Bvh<V> {
    /// Builds a hierarchy over every triangle of `mesh`.
    ///
    /// The result is empty when the mesh has no triangles or at most two
    /// vertices; collision queries against an empty hierarchy never report
    /// contact.
    pub fn build(mesh: &Mesh) -> Self {
        let triangle_count = mesh.triangle_count();
        if triangle_count == 0 || mesh.vertex_count() <= 2 {
            debug!(
                "Empty BVH for mesh with {} vertices and {} triangles",
                mesh.vertex_count(),
                triangle_count
            );
            return Self {
                nodes: Vec::new(),
                max_depth: 0,
                triangle_count,
            };
        }

        let (nodes, max_depth) = builder::build_nodes(mesh);
        let bvh = Self {
            nodes,
            max_depth,
            triangle_count,
        };
        debug!(
            "Built BVH over {} triangles: {} nodes, depth {}, balance {:.3}",
            triangle_count,
            bvh.len(),
            bvh.max_depth,
            bvh.balance()
        );
        bvh
    }

    /// All nodes, children before parents
    pub fn nodes(&self) -> &[BvNode<V>] {
        &self.nodes
    }

    /// Node at `index`
    pub fn node(&self, index: usize) -> Option<&BvNode<V>> {
        self.nodes.get(index)
    }

    /// Index of the root node, `None` when empty
    pub fn root_index(&self) -> Option<usize> {
        self.nodes.len().checked_sub(1)
    }

    /// Root node, `None` when empty
    pub fn root(&self) -> Option<&BvNode<V>> {
        self.nodes.last()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the hierarchy has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth in levels; a lone root has depth 1, an empty hierarchy 0
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of triangles in the mesh this was built from
    pub const fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Leaf nodes paired with their storage index
    pub fn leaves(&self) -> impl Iterator<Item = (usize, &BvNode<V>)> + '_ {
        self.nodes.iter().enumerate().filter(|(_, node)| node.is_leaf())
    }

    /// Checks that every leaf contains its triangle and every internal node
    /// encloses both children, each within `eps`
    pub fn validate(&self, mesh: &Mesh, eps: f32) -> Result<(), BvhError> {
        if mesh.triangle_count() != self.triangle_count {
            return Err(BvhError::MeshMismatch {
                expected: self.triangle_count,
                actual: mesh.triangle_count(),
            });
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node.kind() {
                BvNodeKind::Leaf { triangle } => {
                    if !node.volume().contains_triangle(&mesh.triangle(triangle), eps) {
                        return Err(BvhError::TriangleNotContained { node: index, triangle });
                    }
                }
                BvNodeKind::Internal { left, right } => {
                    for child in [left, right] {
                        if !node.volume().encloses(self.nodes[child].volume(), eps) {
                            return Err(BvhError::NotEnclosed { node: index, child });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
