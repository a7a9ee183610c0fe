//! Bottom-up hierarchy construction
//!
//! The builder partitions triangle indices with a single-pass plane split
//! and appends nodes post-order, so every child lands in storage before the
//! parent that references it and the root is always the last node. Recursion
//! is simulated with an explicit task stack; deep hierarchies built from
//! badly shaped meshes cannot exhaust the native stack.

use crate::bounding::BoundingVolume;
use crate::foundation::logging::warn;
use crate::foundation::math::{Point3, Vec3};
use crate::geometry::Triangle;
use crate::mesh::Mesh;

use super::node::BvNode;

enum Task {
    /// Build a subtree over these triangle indices at this level
    Build { triangles: Vec<usize>, depth: usize },
    /// Merge the two most recently finished subtrees
    Join,
}

/// Builds the node storage for `mesh`, returning it with the depth in levels
pub(crate) fn build_nodes<V: BoundingVolume>(mesh: &Mesh) -> (Vec<BvNode<V>>, usize) {
    let triangles: Vec<Triangle> = mesh.triangles_iter().collect();
    let midpoints: Vec<Point3> = triangles.iter().map(Triangle::centroid).collect();
    if triangles.is_empty() {
        return (Vec::new(), 0);
    }

    let mut nodes = Vec::with_capacity(2 * triangles.len() - 1);
    let mut max_depth = 0;
    let mut finished: Vec<usize> = Vec::new();
    let mut tasks = vec![Task::Build {
        triangles: (0..triangles.len()).collect(),
        depth: 1,
    }];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Build { triangles: subset, depth } => {
                max_depth = max_depth.max(depth);
                if let [triangle] = subset[..] {
                    finished.push(nodes.len());
                    nodes.push(BvNode::leaf(V::from_triangle(&triangles[triangle]), triangle));
                    continue;
                }

                let (left, right) = split(&subset, &midpoints);
                // Left is popped first so its nodes precede the right subtree's
                tasks.push(Task::Join);
                tasks.push(Task::Build { triangles: right, depth: depth + 1 });
                tasks.push(Task::Build { triangles: left, depth: depth + 1 });
            }
            Task::Join => {
                if let (Some(right), Some(left)) = (finished.pop(), finished.pop()) {
                    let volume = V::merge(nodes[left].volume(), nodes[right].volume());
                    finished.push(nodes.len());
                    nodes.push(BvNode::internal(volume, left, right));
                }
            }
        }
    }

    (nodes, max_depth)
}

/// Splits triangle indices into two groups by a plane through their centroid.
///
/// The plane normal starts as the offset between the first two midpoints and
/// absorbs every later offset that already points to its positive side, which
/// tilts it toward the heavier cluster. Triangles strictly on the positive
/// side form the right group. Order within each group follows `triangles`.
///
/// Zero or one index yields `(triangles, [])`, two indices split one each.
/// When the plane leaves one side empty the list is halved in index order.
pub(crate) fn split(triangles: &[usize], midpoints: &[Point3]) -> (Vec<usize>, Vec<usize>) {
    match triangles {
        [] | [_] => return (triangles.to_vec(), Vec::new()),
        [a, b] => return (vec![*a], vec![*b]),
        _ => {}
    }

    let sum = triangles
        .iter()
        .fold(Vec3::zeros(), |acc, &i| acc + midpoints[i].coords);
    let centroid = Point3::from(sum / triangles.len() as f32);

    let mut normal = midpoints[triangles[1]] - midpoints[triangles[0]];
    for &i in &triangles[2..] {
        let offset = midpoints[i] - centroid;
        if offset.dot(&normal) > 0.0 {
            normal += offset;
        }
    }

    let (right, left): (Vec<usize>, Vec<usize>) = triangles
        .iter()
        .copied()
        .partition(|&i| (midpoints[i] - centroid).dot(&normal) > 0.0);

    if left.is_empty() || right.is_empty() {
        warn!(
            "Degenerate split over {} triangles, halving in index order",
            triangles.len()
        );
        let (left, right) = triangles.split_at(triangles.len() / 2);
        return (left.to_vec(), right.to_vec());
    }

    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(xs: &[f32]) -> Vec<Point3> {
        xs.iter().map(|&x| Point3::new(x, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_split_base_cases() {
        let mids = points(&[0.0, 1.0]);
        assert_eq!(split(&[], &mids), (vec![], vec![]));
        assert_eq!(split(&[1], &mids), (vec![1], vec![]));
        assert_eq!(split(&[1, 0], &mids), (vec![1], vec![0]));
    }

    #[test]
    fn test_split_separates_clusters() {
        let mids = points(&[0.0, 10.0, 0.5, 10.5, 1.0, 11.0]);
        let (left, right) = split(&[0, 1, 2, 3, 4, 5], &mids);
        assert_eq!(left, vec![0, 2, 4]);
        assert_eq!(right, vec![1, 3, 5]);
    }

    #[test]
    fn test_split_preserves_every_index_once() {
        let mids: Vec<Point3> = (0..20)
            .map(|i| {
                let t = i as f32;
                Point3::new((t * 1.3).sin() * 5.0, (t * 0.7).cos() * 3.0, t * 0.1)
            })
            .collect();
        let indices: Vec<usize> = (0..20).collect();
        let (left, right) = split(&indices, &mids);
        assert!(!left.is_empty() && !right.is_empty());
        let mut all: Vec<usize> = left.iter().chain(&right).copied().collect();
        all.sort_unstable();
        assert_eq!(all, indices);
    }

    #[test]
    fn test_coincident_midpoints_fall_back_to_halving() {
        let mids = vec![Point3::new(1.0, 2.0, 3.0); 5];
        let (left, right) = split(&[4, 3, 2, 1, 0], &mids);
        assert_eq!(left, vec![4, 3]);
        assert_eq!(right, vec![2, 1, 0]);
    }
}
