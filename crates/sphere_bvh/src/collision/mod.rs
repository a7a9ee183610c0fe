//! Pairwise mesh collision
//!
//! Two [`BvhModel`]s are tested by walking their hierarchies together, one
//! pair of nodes at a time (the bounding volume test tree). Volumes stay in
//! model space; each query maps them into world space on the fly with the
//! caller's matrices.
//!
//! # Module Organization
//!
//! - [`query`] - Best-first traversal and its statistics

pub mod query;


pub use crate::config::{CollisionConfig, LeafTest};
pub use query::{CollisionQuery, CollisionReport};

use crate::bounding::BoundingVolume;
use crate::bvh::BvhModel;
use crate::foundation::math::Mat4;

/// Whether two transformed models intersect, using [`CollisionConfig::default`]
pub fn collides<V: BoundingVolume>(
    a: &BvhModel<'_, V>,
    b: &BvhModel<'_, V>,
    transform_a: &Mat4,
    transform_b: &Mat4,
) -> bool {
    CollisionQuery::default().collides(a, b, transform_a, transform_b)
}
