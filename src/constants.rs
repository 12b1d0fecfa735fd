// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

// Scene capacities. The GPU-side arrays are sized with the same constants, so
// these are hard limits, not hints.
pub const MAX_SPHERES: usize = 256;
pub const MAX_PLANES: usize = 128;
pub const MAX_TRIANGLES: usize = 256;
// CSG spheres are a fixed block: every slot participates, there is no live count.
pub const MAX_CSG_SPHERES: usize = 4;

// Distinct primitive kinds (sphere, plane, triangle, CSG sphere).
pub const PRIMITIVE_KIND_COUNT: usize = 4;

// BVH construction
pub const MAX_BVH_NODES: usize = 1024;
pub const MAX_BVH_DEPTH: usize = 25;

// Node budget kept in reserve once capacity pressure is detected. A degraded
// range flushes at most one leaf per primitive kind plus the internal nodes
// joining them, and at most one range per recursion level can still be
// pending, so this reserve is enough to flush everything on the stack.
pub const BVH_CAPACITY_HEADROOM: usize = (MAX_BVH_DEPTH + 1) * (2 * PRIMITIVE_KIND_COUNT - 1);

// Below this extent along the chosen split axis a range is treated as
// spatially degenerate (coincident centroids).
pub const BVH_DEGENERATE_EPS: f32 = 1e-4;

// Planes are infinite; the builder stands in a large thin box aligned to the
// plane. Half-extent along tangent/bitangent, half-thickness along the normal.
pub const PLANE_AABB_EXTENT: f32 = 1000.0;
pub const PLANE_AABB_THICKNESS: f32 = 0.01;
