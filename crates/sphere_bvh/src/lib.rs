//! # Sphere BVH
//!
//! Bounding-sphere hierarchies over triangle meshes and pairwise collision
//! queries between transformed meshes.
//!
//! ## Features
//!
//! - **Exact Minimum Bounding Spheres**: Closed-form spheres for triangles and sphere pairs
//! - **Flat Hierarchies**: Index-based node storage, built once and immutable afterward
//! - **Best-First Traversal**: Most-penetrating node pairs are visited first, stopping at the first hit
//! - **Exact Leaf Tests**: Separating-axis triangle/triangle intersection
//! - **Diagnostics**: Balance metric and Graphviz export
//!
//! ## Quick Start
//!
//! ```rust
//! use sphere_bvh::prelude::*;
//!
//! let mesh = Mesh::new(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! )?;
//! let model: BvhModel = BvhModel::new(&mesh);
//!
//! let here = Mat4::identity();
//! let there = Transform::from_position(Vec3::new(0.0, 0.0, 0.5)).to_matrix();
//! assert!(collides(&model, &model, &here, &here));
//! assert!(!collides(&model, &model, &here, &there));
//! # Ok::<(), MeshError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::many_single_char_names)]

pub mod foundation;
pub mod config;
pub mod geometry;
pub mod bounding;
pub mod mesh;
pub mod bvh;
pub mod collision;

/// Common imports for users of the crate
pub mod prelude {
    pub use crate::foundation::math::{Mat4, Point3, Quat, Transform, Vec3};
    pub use crate::config::{CollisionConfig, Config, LeafTest};
    pub use crate::geometry::{Sphere, Triangle};
    pub use crate::mesh::{Mesh, MeshError};
    pub use crate::bvh::{Bvh, BvhError, BvhModel, BvhStats};
    pub use crate::collision::{collides, CollisionQuery, CollisionReport};
}
