//! Hierarchy nodes

use crate::bounding::BoundingVolume;
use crate::geometry::Sphere;

/// What a node bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BvNodeKind {
    /// Bounds a single mesh triangle
    Leaf {
        /// Index into the mesh's triangle list
        triangle: usize,
    },
    /// Bounds two child nodes
    Internal {
        /// Index of the left child in the node storage
        left: usize,
        /// Index of the right child in the node storage
        right: usize,
    },
}

/// A node in the flat hierarchy storage; children are referenced by index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvNode<V: BoundingVolume = Sphere> {
    volume: V,
    kind: BvNodeKind,
}

impl<V: BoundingVolume> BvNode<V> {
    pub(crate) fn leaf(volume: V, triangle: usize) -> Self {
        Self {
            volume,
            kind: BvNodeKind::Leaf { triangle },
        }
    }

    pub(crate) fn internal(volume: V, left: usize, right: usize) -> Self {
        Self {
            volume,
            kind: BvNodeKind::Internal { left, right },
        }
    }

    /// Bounding volume in model space
    pub const fn volume(&self) -> &V {
        &self.volume
    }

    /// Leaf or internal payload
    pub const fn kind(&self) -> BvNodeKind {
        self.kind
    }

    /// Whether this node bounds a single triangle
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, BvNodeKind::Leaf { .. })
    }

    /// Child indices; for a leaf both equal the bounded triangle's index
    pub const fn children(&self) -> (usize, usize) {
        match self.kind {
            BvNodeKind::Leaf { triangle } => (triangle, triangle),
            BvNodeKind::Internal { left, right } => (left, right),
        }
    }

    /// Triangle index if this is a leaf
    pub const fn triangle(&self) -> Option<usize> {
        match self.kind {
            BvNodeKind::Leaf { triangle } => Some(triangle),
            BvNodeKind::Internal { .. } => None,
        }
    }
}
