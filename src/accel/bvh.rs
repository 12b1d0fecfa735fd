// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::VecDeque;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::aabb::{Aabb, csg_sphere_aabb, plane_aabb, sphere_aabb, triangle_aabb};
use crate::constants::{BVH_CAPACITY_HEADROOM, BVH_DEGENERATE_EPS, MAX_BVH_DEPTH, MAX_BVH_NODES};
use crate::scene::objects::SceneObjects;
use crate::scene::primitives::PrimitiveKind;

/// Sentinel child/object index meaning "none".
pub const INVALID_INDEX: i32 = -1;

/// GPU BVH node, 48 bytes, uploaded verbatim. Internal nodes have both child
/// indices >= 0 and `object_count == 0`; leaf nodes have both children at
/// `INVALID_INDEX`, `object_count >= 1` and `object_index`/`object_type`
/// addressing a run inside one typed primitive array. `split_axis` is the
/// partition axis for internal nodes and -1 for leaves.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BvhNode {
    pub aabb_min: Vec3,
    pub left_child: i32,
    pub aabb_max: Vec3,
    pub right_child: i32,
    pub object_index: i32,
    pub object_count: i32,
    pub object_type: i32,
    pub split_axis: i32,
}

impl BvhNode {
    fn internal(bounds: Aabb, left: i32, right: i32, split_axis: i32) -> Self {
        Self {
            aabb_min: bounds.min,
            left_child: left,
            aabb_max: bounds.max,
            right_child: right,
            object_index: INVALID_INDEX,
            object_count: 0,
            object_type: INVALID_INDEX,
            split_axis,
        }
    }

    fn leaf(bounds: Aabb, first_index: i32, count: i32, kind: PrimitiveKind) -> Self {
        Self {
            aabb_min: bounds.min,
            left_child: INVALID_INDEX,
            aabb_max: bounds.max,
            right_child: INVALID_INDEX,
            object_index: first_index,
            object_count: count,
            object_type: kind.as_i32(),
            split_axis: INVALID_INDEX,
        }
    }

    /// Root for a scene with no objects. Downstream traversal always reads
    /// node 0, so an empty scene still gets one well-formed node.
    fn empty_root() -> Self {
        Self {
            aabb_min: Aabb::EMPTY.min,
            left_child: INVALID_INDEX,
            aabb_max: Aabb::EMPTY.max,
            right_child: INVALID_INDEX,
            object_index: INVALID_INDEX,
            object_count: 0,
            object_type: INVALID_INDEX,
            split_axis: INVALID_INDEX,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left_child == INVALID_INDEX && self.right_child == INVALID_INDEX
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.aabb_min, self.aabb_max)
    }
}

/// Per-primitive entry the partitioner reorders in place. Built once per
/// `Bvh::build` call and discarded afterwards.
#[derive(Debug, Clone, Copy)]
pub struct ObjectRef {
    pub index: i32,
    pub kind: PrimitiveKind,
    pub centroid: Vec3,
    pub aabb: Aabb,
}

impl ObjectRef {
    pub fn new(index: usize, kind: PrimitiveKind, aabb: Aabb) -> Self {
        Self {
            index: index as i32,
            kind,
            centroid: aabb.center(),
            aabb,
        }
    }
}

/// Flattens all live primitives into one reference list: spheres, then
/// planes, then triangles, then the full CSG block, ascending index within
/// each type.
pub fn build_object_refs(scene: &SceneObjects) -> Vec<ObjectRef> {
    let mut refs = Vec::with_capacity(
        scene.num_spheres() + scene.num_planes() + scene.num_triangles() + scene.csg_spheres().len(),
    );

    for (i, sphere) in scene.spheres().iter().enumerate() {
        refs.push(ObjectRef::new(i, PrimitiveKind::Sphere, sphere_aabb(sphere)));
    }
    for (i, plane) in scene.planes().iter().enumerate() {
        refs.push(ObjectRef::new(i, PrimitiveKind::Plane, plane_aabb(plane)));
    }
    for (i, triangle) in scene.triangles().iter().enumerate() {
        refs.push(ObjectRef::new(i, PrimitiveKind::Triangle, triangle_aabb(triangle)));
    }
    // CSG spheres have no live count; every slot participates.
    for (i, csg) in scene.csg_spheres().iter().enumerate() {
        refs.push(ObjectRef::new(i, PrimitiveKind::CsgSphere, csg_sphere_aabb(csg)));
    }

    refs
}

/// Union AABB of a range of object references.
pub fn range_bounds(objects: &[ObjectRef]) -> Aabb {
    objects
        .iter()
        .fold(Aabb::EMPTY, |acc, obj| acc.union(obj.aabb))
}

/// Flat BVH over the scene's primitives, breadth-first order, root at node 0.
#[derive(Debug, Clone)]
pub struct Bvh {
    pub nodes: Vec<BvhNode>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BvhStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
    pub max_leaf_size: usize,
}

impl Bvh {
    /// Builds the BVH over every live primitive in the scene. Rebuilds from
    /// scratch; there is no incremental update.
    pub fn build(scene: &SceneObjects) -> Self {
        let mut refs = build_object_refs(scene);
        Self::build_from_refs(&mut refs)
    }

    /// Builds from an already-assembled reference list. The list is reordered
    /// in place by the partitioner.
    pub fn build_from_refs(refs: &mut [ObjectRef]) -> Self {
        let mut nodes = Vec::with_capacity(MAX_BVH_NODES);

        let root = if refs.is_empty() {
            nodes.push(BvhNode::empty_root());
            0
        } else {
            let len = refs.len();
            build_recursive(&mut nodes, refs, 0, len, 0)
        };

        debug_assert!(root >= 0);
        debug_assert!(nodes.len() <= MAX_BVH_NODES);

        // Breadth-first order puts siblings next to each other, which is the
        // access pattern of the shader's traversal stack. Also moves the root
        // to index 0.
        let nodes = reorder_breadth_first(&nodes, root);
        log::info!("BVH built with {} nodes", nodes.len());
        Self { nodes }
    }

    pub fn root(&self) -> &BvhNode {
        &self.nodes[0]
    }

    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats {
            node_count: self.nodes.len(),
            ..BvhStats::default()
        };
        let mut stack = vec![(0usize, 1usize)];
        while let Some((index, depth)) = stack.pop() {
            stats.max_depth = stats.max_depth.max(depth);
            let node = &self.nodes[index];
            if node.is_leaf() {
                stats.leaf_count += 1;
                stats.max_leaf_size = stats.max_leaf_size.max(node.object_count as usize);
            } else {
                stack.push((node.left_child as usize, depth + 1));
                stack.push((node.right_child as usize, depth + 1));
            }
        }
        stats
    }
}

fn build_recursive(
    nodes: &mut Vec<BvhNode>,
    objects: &mut [ObjectRef],
    start: usize,
    end: usize,
    depth: usize,
) -> i32 {
    if start >= end {
        return INVALID_INDEX;
    }

    let bounds = range_bounds(&objects[start..end]);

    if end - start == 1 {
        let obj = &objects[start];
        nodes.push(BvhNode::leaf(obj.aabb, obj.index, 1, obj.kind));
        return (nodes.len() - 1) as i32;
    }

    // Graceful degradation: near the node cap, flush the whole range as
    // coarse per-type leaves. The headroom guarantees every range still
    // pending on the recursion stack can do the same without overflowing.
    if nodes.len() + BVH_CAPACITY_HEADROOM >= MAX_BVH_NODES {
        log::warn!(
            "BVH node capacity reached, emitting coarse leaves for {} objects",
            end - start
        );
        return emit_degraded(nodes, &mut objects[start..end], bounds, DegradeMode::Capacity);
    }

    // Depth cap guarantees termination on pathological inputs.
    if depth >= MAX_BVH_DEPTH {
        return emit_degraded(nodes, &mut objects[start..end], bounds, DegradeMode::Spatial);
    }

    let axis = bounds.longest_axis();
    if bounds.extent()[axis] < BVH_DEGENERATE_EPS {
        // Coincident centroids; splitting cannot separate them.
        return emit_degraded(nodes, &mut objects[start..end], bounds, DegradeMode::Spatial);
    }

    // Median split on the centroid along the longest axis. nth-element
    // partition, not a full sort.
    let mid = (start + (end - start) / 2).clamp(start + 1, end - 1);
    objects[start..end].select_nth_unstable_by(mid - start, |a, b| {
        a.centroid[axis].total_cmp(&b.centroid[axis])
    });

    // Reserve this node's slot so its index is stable across both recursive
    // calls.
    let node_index = nodes.len();
    nodes.push(BvhNode::zeroed());

    let left = build_recursive(nodes, objects, start, mid, depth + 1);
    let right = build_recursive(nodes, objects, mid, end, depth + 1);
    nodes[node_index] = BvhNode::internal(bounds, left, right, axis as i32);

    node_index as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DegradeMode {
    /// Node budget nearly exhausted: cheapest possible emission, all leaves
    /// share the range's bounding box.
    Capacity,
    /// Depth cap or degenerate extent: budget allows tight per-run boxes.
    Spatial,
}

/// Pending leaf during degraded emission.
struct LeafRun {
    bounds: Aabb,
    first_index: i32,
    count: i32,
    kind: PrimitiveKind,
}

/// Terminal emission for a range that will not be split further. Leaves must
/// stay type-homogeneous, so the range is grouped by type first. Within a
/// type, one leaf is emitted per contiguous ascending index run, so each leaf
/// range covers exactly the objects placed in it. When the node budget cannot
/// afford that, one leaf per type spans `[min_index, max_index + 1]` instead:
/// an object may then be intersected twice downstream, but never missed.
/// Multiple leaves are joined into a right-leaning chain of internal nodes so
/// the parent always receives a single valid subtree index.
fn emit_degraded(
    nodes: &mut Vec<BvhNode>,
    range: &mut [ObjectRef],
    range_bounds: Aabb,
    mode: DegradeMode,
) -> i32 {
    range.sort_unstable_by_key(|obj| (obj.kind, obj.index));

    let budget = MAX_BVH_NODES - nodes.len();
    let runs = index_runs(range);

    let leaves: Vec<LeafRun> = if mode == DegradeMode::Spatial
        && 2 * runs.len() - 1 + BVH_CAPACITY_HEADROOM <= budget
    {
        runs.iter()
            .map(|&(run_start, run_len)| {
                let run = &range[run_start..run_start + run_len];
                LeafRun {
                    bounds: run.iter().fold(Aabb::EMPTY, |acc, o| acc.union(o.aabb)),
                    first_index: run[0].index,
                    count: run_len as i32,
                    kind: run[0].kind,
                }
            })
            .collect()
    } else {
        kind_span_leaves(range, range_bounds, mode)
    };

    join_leaves(nodes, leaves)
}

/// Maximal runs of same-type, consecutively-indexed objects in a sorted range.
/// Returned as `(offset, len)` pairs into the range.
fn index_runs(range: &[ObjectRef]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut run_start = 0;
    for i in 1..=range.len() {
        let broken = i == range.len()
            || range[i].kind != range[i - 1].kind
            || range[i].index != range[i - 1].index + 1;
        if broken {
            runs.push((run_start, i - run_start));
            run_start = i;
        }
    }
    runs
}

/// One leaf per primitive type, spanning that type's full index interval in
/// the range. At most `PrimitiveKind::ALL.len()` leaves.
fn kind_span_leaves(range: &[ObjectRef], range_bounds: Aabb, mode: DegradeMode) -> Vec<LeafRun> {
    let mut leaves: Vec<LeafRun> = Vec::new();
    let mut group_start = 0;
    for i in 1..=range.len() {
        if i == range.len() || range[i].kind != range[group_start].kind {
            let group = &range[group_start..i];
            let bounds = match mode {
                DegradeMode::Capacity => range_bounds,
                DegradeMode::Spatial => {
                    group.iter().fold(Aabb::EMPTY, |acc, o| acc.union(o.aabb))
                }
            };
            leaves.push(LeafRun {
                bounds,
                first_index: group[0].index,
                count: group[group.len() - 1].index - group[0].index + 1,
                kind: group[0].kind,
            });
            group_start = i;
        }
    }
    leaves
}

fn join_leaves(nodes: &mut Vec<BvhNode>, leaves: Vec<LeafRun>) -> i32 {
    let mut iter = leaves.into_iter().rev();
    // Degraded ranges are never empty, so there is always a first leaf.
    let Some(last) = iter.next() else {
        return INVALID_INDEX;
    };

    let mut right_bounds = last.bounds;
    nodes.push(BvhNode::leaf(last.bounds, last.first_index, last.count, last.kind));
    let mut right_index = (nodes.len() - 1) as i32;

    for leaf in iter {
        nodes.push(BvhNode::leaf(leaf.bounds, leaf.first_index, leaf.count, leaf.kind));
        let left_index = (nodes.len() - 1) as i32;
        let joined = right_bounds.union(leaf.bounds);
        nodes.push(BvhNode::internal(joined, left_index, right_index, 0));
        right_index = (nodes.len() - 1) as i32;
        right_bounds = joined;
    }

    right_index
}

/// Reorders a node array into breadth-first traversal order from `root`,
/// remapping all child indices. The root lands at index 0. Applying this to
/// an already breadth-first array is a no-op.
pub fn reorder_breadth_first(nodes: &[BvhNode], root: i32) -> Vec<BvhNode> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let mut remap = vec![INVALID_INDEX; nodes.len()];
    let mut visit_order = Vec::with_capacity(nodes.len());
    let mut queue = VecDeque::new();
    queue.push_back(root);

    while let Some(old_index) = queue.pop_front() {
        remap[old_index as usize] = visit_order.len() as i32;
        visit_order.push(old_index as usize);

        let node = &nodes[old_index as usize];
        if node.left_child != INVALID_INDEX {
            queue.push_back(node.left_child);
        }
        if node.right_child != INVALID_INDEX {
            queue.push_back(node.right_child);
        }
    }

    visit_order
        .iter()
        .map(|&old_index| {
            let mut node = nodes[old_index];
            if node.left_child != INVALID_INDEX {
                node.left_child = remap[node.left_child as usize];
            }
            if node.right_child != INVALID_INDEX {
                node.right_child = remap[node.right_child as usize];
            }
            node
        })
        .collect()
}
