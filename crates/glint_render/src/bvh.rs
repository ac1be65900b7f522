//! Bounding Volume Hierarchy acceleration structure.
//!
//! A flat node arena plus a permuted triangle-index array: no owned
//! pointers, integer child references, trivially relocatable. Built once per
//! scene with `Bvh::build`, then queried through `&self` only - traversal
//! never mutates the structure, so it can be shared read-only across render
//! threads.

use std::cmp::Ordering;

use glint_core::Scene;
use glint_math::{Aabb, Ray, Vec3};

use crate::intersect::ray_triangle;

/// Maximum triangles per leaf node before splitting.
const LEAF_MAX_TRIS: usize = 4;

/// Centroid extent below which a range is considered degenerate and kept as
/// a leaf (prevents infinite recursion on coincident centroids).
const DEGENERATE_EXTENT: f32 = 1e-6;

/// Initial traversal stack capacity. Depth is O(log N) under the
/// median-count split so 128 covers any practical triangle count; the stack
/// grows rather than overflowing if a pathological tree exceeds it.
const TRAVERSAL_STACK: usize = 128;

/// A node in the flat BVH arena.
///
/// Exactly one of the two shapes holds per node: a leaf owns the contiguous
/// index range `start..start + count` (`count > 0`), an internal node owns
/// two child indices (`count == 0`).
#[derive(Debug, Clone, Copy)]
pub struct BvhNode {
    pub bounds: Aabb,
    pub left: u32,
    pub right: u32,
    pub start: u32,
    pub count: u32,
}

impl BvhNode {
    /// Whether this node directly owns triangles.
    pub fn is_leaf(&self) -> bool {
        self.count > 0
    }
}

/// Nearest-hit record returned by traversal.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Parametric distance along the ray
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Interpolated (smooth) shading normal, unit length
    pub normal: Vec3,
    /// Material index of the hit triangle
    pub mat_id: usize,
}

/// A BVH over a scene's triangle set.
///
/// Node 0 is always the root and its box bounds the whole set. The index
/// array is a permutation of `0..triangle_count` partitioned so every leaf's
/// range is a contiguous slice.
pub struct Bvh {
    nodes: Vec<BvhNode>,
    tri_indices: Vec<u32>,
}

impl Bvh {
    /// Build a BVH for a scene by recursive median-count splitting.
    ///
    /// An empty scene yields an empty arena; traversal against it reports no
    /// hit rather than failing.
    pub fn build(scene: &Scene) -> Self {
        let n = scene.triangle_count();
        let mut bvh = Self {
            nodes: Vec::new(),
            tri_indices: (0..n as u32).collect(),
        };

        if n == 0 {
            return bvh;
        }

        bvh.nodes.reserve(n * 2);
        bvh.build_range(scene, 0, n);

        log::debug!("Built BVH: {} nodes over {} triangles", bvh.nodes.len(), n);
        bvh
    }

    /// Recursively build the node for `tri_indices[start..start + count]`.
    ///
    /// Recursion depth is O(log N) under the median split, so the call stack
    /// is safe even for large scenes.
    fn build_range(&mut self, scene: &Scene, start: usize, count: usize) -> u32 {
        let node_idx = self.nodes.len() as u32;
        self.nodes.push(BvhNode {
            bounds: Aabb::EMPTY,
            left: 0,
            right: 0,
            start: start as u32,
            count: count as u32,
        });

        // Union bounds of the range, and bounds of its centroids for the
        // split decision
        let mut bounds = Aabb::EMPTY;
        let mut centroid_bounds = Aabb::EMPTY;
        for &ti in &self.tri_indices[start..start + count] {
            let tri = &scene.triangles[ti as usize];
            bounds = bounds.union(&tri.bounds());
            centroid_bounds = centroid_bounds.grow(tri.centroid());
        }
        self.nodes[node_idx as usize].bounds = bounds;

        // Leaf conditions: small range, or all centroids coincident
        let ext = centroid_bounds.extent();
        if count <= LEAF_MAX_TRIS
            || (ext.x < DEGENERATE_EXTENT
                && ext.y < DEGENERATE_EXTENT
                && ext.z < DEGENERATE_EXTENT)
        {
            return node_idx;
        }

        let axis = centroid_bounds.longest_extent_axis();
        let mid = count / 2;

        // Median-of-count partition on the chosen axis (selection, not a
        // full sort)
        self.tri_indices[start..start + count].select_nth_unstable_by(mid, |&a, &b| {
            let ca = scene.triangles[a as usize].centroid()[axis];
            let cb = scene.triangles[b as usize].centroid()[axis];
            ca.partial_cmp(&cb).unwrap_or(Ordering::Equal)
        });

        let left = self.build_range(scene, start, mid);
        let right = self.build_range(scene, start + mid, count - mid);

        let node = &mut self.nodes[node_idx as usize];
        node.left = left;
        node.right = right;
        node.count = 0; // internal
        node_idx
    }

    /// Find the nearest hit along a ray, bounded by `t_max`.
    ///
    /// Iterative traversal over an explicit stack. Nodes whose box entry
    /// distance already exceeds the current best hit or `t_max` are pruned.
    /// Shadow rays pass a finite `t_max` (the light distance); primary rays
    /// pass `f32::INFINITY`.
    pub fn intersect(&self, scene: &Scene, ray: &Ray, t_max: f32) -> Option<Hit> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut best: Option<Hit> = None;
        let mut best_t = f32::INFINITY;

        let mut stack: Vec<u32> = Vec::with_capacity(TRAVERSAL_STACK);
        stack.push(0);

        while let Some(ni) = stack.pop() {
            let node = &self.nodes[ni as usize];

            let span = match node.bounds.slab(ray) {
                Some(span) => span,
                None => continue,
            };
            if span.min > best_t || span.min > t_max {
                continue;
            }

            if node.is_leaf() {
                let start = node.start as usize;
                for &ti in &self.tri_indices[start..start + node.count as usize] {
                    let tri = &scene.triangles[ti as usize];
                    if let Some(h) = ray_triangle(ray, tri) {
                        if h.t < best_t && h.t < t_max {
                            best_t = h.t;
                            let w = 1.0 - h.u - h.v;
                            let normal =
                                (w * tri.n0 + h.u * tri.n1 + h.v * tri.n2).normalize();
                            best = Some(Hit {
                                t: h.t,
                                point: ray.at(h.t),
                                normal,
                                mat_id: tri.mat_id,
                            });
                        }
                    }
                }
            } else {
                // No near/far ordering; the slab test prunes either child
                stack.push(node.left);
                stack.push(node.right);
            }
        }

        best
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty (built from an empty scene).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The nodes, for inspection.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// The triangle-index permutation, for inspection.
    pub fn tri_indices(&self) -> &[u32] {
        &self.tri_indices
    }
}
