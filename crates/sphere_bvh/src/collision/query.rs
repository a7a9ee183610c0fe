//! Best-first bounding volume test tree traversal

use crate::bounding::BoundingVolume;
use crate::bvh::{BvNode, BvNodeKind, BvhModel};
use crate::config::{CollisionConfig, LeafTest};
use crate::foundation::logging::trace;
use crate::foundation::math::{max_scale_factor, Mat4};
use crate::geometry::Triangle;

/// Outcome of a collision query with traversal statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    /// Whether the models intersect
    pub colliding: bool,
    /// First intersecting triangle pair found, as (triangle in A, triangle in B)
    pub contact: Option<(usize, usize)>,
    /// Node pairs whose volumes were tested for overlap
    pub volume_tests: usize,
    /// Leaf pairs resolved with the configured [`LeafTest`]
    pub leaf_tests: usize,
    /// Largest number of node pairs waiting on the work stack
    pub max_stack: usize,
}

/// Pairwise collision query between two models
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionQuery {
    config: CollisionConfig,
}

/// A node pair waiting on the work stack, with its world-space volumes
#[derive(Clone, Copy)]
struct Pair<V> {
    a: usize,
    b: usize,
    volume_a: V,
    volume_b: V,
}

/// One model placed in world space
struct Placed<'q, 'm, V: BoundingVolume> {
    model: &'q BvhModel<'m, V>,
    transform: &'q Mat4,
    scale: f32,
    margin: f32,
}

impl<V: BoundingVolume> Placed<'_, '_, V> {
    fn node(&self, index: usize) -> &BvNode<V> {
        &self.model.bvh().nodes()[index]
    }

    fn volume(&self, index: usize) -> V {
        self.node(index)
            .volume()
            .transformed(self.transform, self.scale)
            .inflated(self.margin)
    }

    fn triangle(&self, index: usize) -> Triangle {
        self.model.triangle(index).transformed(self.transform)
    }
}

impl CollisionQuery {
    /// Creates a query with the given settings
    pub const fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub const fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Whether `a` placed by `transform_a` intersects `b` placed by `transform_b`
    pub fn collides<V: BoundingVolume>(
        &self,
        a: &BvhModel<'_, V>,
        b: &BvhModel<'_, V>,
        transform_a: &Mat4,
        transform_b: &Mat4,
    ) -> bool {
        self.query(a, b, transform_a, transform_b).colliding
    }

    /// Runs the traversal and reports how it went.
    ///
    /// Starting from both roots, every popped pair whose world volumes miss
    /// is pruned. Otherwise the larger volume is split (A on a tie, and only
    /// the internal side when the other is a leaf) and both child pairs are
    /// pushed so that the one with the smaller signed distance is visited
    /// first. The walk stops at the first leaf pair that passes the
    /// configured [`LeafTest`]. Either hierarchy being empty means no
    /// collision.
    ///
    /// World volumes are model volumes moved by the transform, scaled by its
    /// largest stretch and grown by the configured epsilon, so rounding in
    /// the transform cannot prune a pair whose children overlap. A negative or
    /// NaN epsilon counts as zero.
    pub fn query<V: BoundingVolume>(
        &self,
        a: &BvhModel<'_, V>,
        b: &BvhModel<'_, V>,
        transform_a: &Mat4,
        transform_b: &Mat4,
    ) -> CollisionReport {
        let mut report = CollisionReport::default();
        let (Some(root_a), Some(root_b)) = (a.bvh().root_index(), b.bvh().root_index()) else {
            trace!("BVTT query skipped: empty hierarchy");
            return report;
        };

        let margin = self.config.epsilon.max(0.0);
        let side_a = Placed {
            model: a,
            transform: transform_a,
            scale: max_scale_factor(transform_a),
            margin,
        };
        let side_b = Placed {
            model: b,
            transform: transform_b,
            scale: max_scale_factor(transform_b),
            margin,
        };

        let mut stack = vec![Pair {
            a: root_a,
            b: root_b,
            volume_a: side_a.volume(root_a),
            volume_b: side_b.volume(root_b),
        }];
        report.max_stack = 1;

        while let Some(pair) = stack.pop() {
            report.volume_tests += 1;
            if !V::overlaps(&pair.volume_a, &pair.volume_b) {
                continue;
            }

            let descend_a = |left: usize, right: usize| {
                [left, right].map(|child| Pair {
                    a: child,
                    volume_a: side_a.volume(child),
                    ..pair
                })
            };
            let descend_b = |left: usize, right: usize| {
                [left, right].map(|child| Pair {
                    b: child,
                    volume_b: side_b.volume(child),
                    ..pair
                })
            };

            let [first, second] = match (side_a.node(pair.a).kind(), side_b.node(pair.b).kind()) {
                (BvNodeKind::Leaf { triangle: ta }, BvNodeKind::Leaf { triangle: tb }) => {
                    report.leaf_tests += 1;
                    if self.leaf_pair_collides(&side_a, &side_b, ta, tb) {
                        report.colliding = true;
                        report.contact = Some((ta, tb));
                        break;
                    }
                    continue;
                }
                (BvNodeKind::Internal { left, right }, BvNodeKind::Internal { .. })
                    if pair.volume_a.extent() >= pair.volume_b.extent() =>
                {
                    descend_a(left, right)
                }
                (BvNodeKind::Internal { left, right }, BvNodeKind::Leaf { .. }) => descend_a(left, right),
                (_, BvNodeKind::Internal { left, right }) => descend_b(left, right),
            };

            // The nearer pair goes on top so it is visited first
            let first_gap = V::separation(&first.volume_a, &first.volume_b);
            let second_gap = V::separation(&second.volume_a, &second.volume_b);
            if first_gap <= second_gap {
                stack.push(second);
                stack.push(first);
            } else {
                stack.push(first);
                stack.push(second);
            }
            report.max_stack = report.max_stack.max(stack.len());
        }

        trace!(
            "BVTT query: colliding {}, {} volume tests, {} leaf tests, stack peak {}",
            report.colliding,
            report.volume_tests,
            report.leaf_tests,
            report.max_stack
        );
        report
    }

    fn leaf_pair_collides<V: BoundingVolume>(
        &self,
        a: &Placed<'_, '_, V>,
        b: &Placed<'_, '_, V>,
        triangle_a: usize,
        triangle_b: usize,
    ) -> bool {
        match self.config.leaf_test {
            LeafTest::Exact => a.triangle(triangle_a).intersects(&b.triangle(triangle_b)),
            LeafTest::AssumeContact => true,
        }
    }
}
