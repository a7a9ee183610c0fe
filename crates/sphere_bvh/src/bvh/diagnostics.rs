//! Hierarchy diagnostics
//!
//! Read-only developer tooling: how far a hierarchy's depth is from the
//! ideal, a Graphviz export of its shape, and a one-line summary for logs.

use std::fmt::{self, Write as _};

use super::{Bvh, BvNodeKind};
use crate::bounding::BoundingVolume;

/// Summary of a hierarchy's shape
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BvhStats {
    /// Total number of nodes
    pub nodes: usize,
    /// Number of leaf nodes
    pub leaves: usize,
    /// Depth in levels
    pub max_depth: usize,
    /// [`Bvh::balance`] of the hierarchy
    pub balance: f32,
    /// Extent (radius for spheres) of the root volume in model space
    pub root_extent: f32,
}

impl fmt::Display for BvhStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes ({} leaves), depth {}, balance {:.2}, root extent {:.3}",
            self.nodes, self.leaves, self.max_depth, self.balance, self.root_extent
        )
    }
}

impl<V: BoundingVolume> Bvh<V> {
    /// How close the depth is to the best possible for this node count.
    ///
    /// A perfectly balanced tree of `n` nodes has `floor(log2 n) + 1` levels
    /// and a list-shaped one `(n + 1) / 2`. The result maps the best depth to
    /// 1.0 and the worst to 0.0. Hierarchies with at most one node, or too few
    /// nodes for the two bounds to differ, are perfectly balanced.
    ///
    /// The best depth rounds the logarithm down rather than using
    /// `ceil(log2 n)`: rounding up would score a full tree of `2^k - 1` nodes
    /// below 1.0 and, at `n = 3`, put the best depth above the worst.
    pub fn balance(&self) -> f32 {
        let n = self.nodes.len();
        if n <= 1 {
            return 1.0;
        }

        let best = n.ilog2() as usize + 1;
        let worst = (n + 1) / 2;
        if worst <= best {
            return 1.0;
        }

        let score = (worst as f32 - self.max_depth as f32) / (worst - best) as f32;
        score.clamp(0.0, 1.0)
    }

    /// Graphviz description of the tree shape.
    ///
    /// Lists the root on its own line, then one edge per child of every
    /// internal node in pre-order. The text ends with the closing brace.
    pub fn dotgraph(&self) -> String {
        let mut out = String::from("digraph bvh {\n");
        if let Some(root) = self.root_index() {
            let _ = writeln!(out, "    {root};");

            let mut stack = vec![root];
            while let Some(index) = stack.pop() {
                if let BvNodeKind::Internal { left, right } = self.nodes[index].kind() {
                    let _ = writeln!(out, "    {index} -> {left};");
                    let _ = writeln!(out, "    {index} -> {right};");
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        out.push('}');
        out
    }

    /// Node counts, depth, balance and root size
    pub fn stats(&self) -> BvhStats {
        BvhStats {
            nodes: self.nodes.len(),
            leaves: self.leaves().count(),
            max_depth: self.max_depth,
            balance: self.balance(),
            root_extent: self.root().map_or(0.0, |root| root.volume().extent()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures::{exponential_strip, single_triangle, two_triangles, uv_sphere};
    use crate::mesh::Mesh;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_node_is_balanced() {
        let bvh: Bvh = Bvh::build(&single_triangle());
        assert_eq!(bvh.balance(), 1.0);
    }

    #[test]
    fn test_three_node_tree_is_balanced() {
        let bvh: Bvh = Bvh::build(&two_triangles());
        assert_eq!(bvh.max_depth(), 2);
        assert_eq!(bvh.balance(), 1.0);
    }

    #[test]
    fn test_empty_is_balanced() {
        let bvh: Bvh = Bvh::build(&Mesh::new(Vec::new(), Vec::new()).unwrap());
        assert_eq!(bvh.balance(), 1.0);
    }

    #[test]
    fn test_list_shaped_hierarchy_scores_zero() {
        let bvh: Bvh = Bvh::build(&exponential_strip(8));
        assert_relative_eq!(bvh.balance(), 0.0);
    }

    #[test]
    fn test_balance_stays_in_unit_range() {
        for rings in 3..10 {
            let bvh: Bvh = Bvh::build(&uv_sphere(1.0, rings, rings + 2));
            let balance = bvh.balance();
            assert!((0.0..=1.0).contains(&balance), "{balance}");
        }
    }

    #[test]
    fn test_dotgraph_two_triangles() {
        let bvh: Bvh = Bvh::build(&two_triangles());
        assert_eq!(bvh.dotgraph(), "digraph bvh {\n    2;\n    2 -> 0;\n    2 -> 1;\n}");
    }

    #[test]
    fn test_dotgraph_single_leaf_and_empty() {
        let bvh: Bvh = Bvh::build(&single_triangle());
        assert_eq!(bvh.dotgraph(), "digraph bvh {\n    0;\n}");

        let empty: Bvh = Bvh::build(&Mesh::new(Vec::new(), Vec::new()).unwrap());
        assert_eq!(empty.dotgraph(), "digraph bvh {\n}");
    }

    #[test]
    fn test_dotgraph_lists_every_edge_once() {
        let bvh: Bvh = Bvh::build(&uv_sphere(1.0, 5, 6));
        let graph = bvh.dotgraph();
        let edges = graph.lines().filter(|line| line.contains("->")).count();
        assert_eq!(edges, bvh.len() - 1);
        assert!(graph.ends_with('}'));
    }

    #[test]
    fn test_stats() {
        let mesh = two_triangles();
        let bvh: Bvh = Bvh::build(&mesh);
        let stats = bvh.stats();
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.leaves, 2);
        assert_eq!(stats.max_depth, 2);
        assert_relative_eq!(stats.root_extent, bvh.root().unwrap().volume().radius());
        assert!(stats.to_string().starts_with("3 nodes (2 leaves), depth 2"));
    }
}
