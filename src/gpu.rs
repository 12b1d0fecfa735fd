// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Byte-exact UBO layouts. Every struct here is uploaded verbatim, so field
//! order and padding follow std140 vec3 alignment; sizes are pinned by tests.

use bytemuck::{Pod, Zeroable};

use crate::accel::bvh::{Bvh, BvhNode};
use crate::constants::{MAX_BVH_NODES, MAX_CSG_SPHERES, MAX_PLANES, MAX_SPHERES, MAX_TRIANGLES};
use crate::scene::objects::SceneObjects;
use crate::scene::primitives::{CsgSphere, Plane, Sphere, Triangle};

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GpuSphere {
    pub position: [f32; 3],
    pub radius: f32,
    pub velocity: [f32; 3],
    pub _pad: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GpuPlane {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub normal: [f32; 3],
    pub _pad1: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GpuTriangle {
    pub v0: [f32; 3],
    pub _pad0: f32,
    pub v1: [f32; 3],
    pub _pad1: f32,
    pub v2: [f32; 3],
    pub _pad2: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GpuCsgSphere {
    pub position: [f32; 3],
    pub radius: f32,
}

impl From<&Sphere> for GpuSphere {
    fn from(s: &Sphere) -> Self {
        Self {
            position: s.position.into(),
            radius: s.radius,
            velocity: s.velocity.into(),
            _pad: 0.0,
        }
    }
}

impl From<&Plane> for GpuPlane {
    fn from(p: &Plane) -> Self {
        Self {
            position: p.position.into(),
            _pad0: 0.0,
            normal: p.normal.into(),
            _pad1: 0.0,
        }
    }
}

impl From<&Triangle> for GpuTriangle {
    fn from(t: &Triangle) -> Self {
        Self {
            v0: t.v0.into(),
            _pad0: 0.0,
            v1: t.v1.into(),
            _pad1: 0.0,
            v2: t.v2.into(),
            _pad2: 0.0,
        }
    }
}

impl From<&CsgSphere> for GpuCsgSphere {
    fn from(c: &CsgSphere) -> Self {
        Self {
            position: c.position.into(),
            radius: c.radius,
        }
    }
}

/// Objects UBO: full-capacity arrays plus live counts, dead slots zeroed.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct GpuSceneObjects {
    pub spheres: [GpuSphere; MAX_SPHERES],
    pub planes: [GpuPlane; MAX_PLANES],
    pub triangles: [GpuTriangle; MAX_TRIANGLES],
    pub csg_spheres: [GpuCsgSphere; MAX_CSG_SPHERES],
    pub num_spheres: i32,
    pub num_planes: i32,
    pub num_triangles: i32,
    pub _pad: i32,
}

impl From<&SceneObjects> for GpuSceneObjects {
    fn from(scene: &SceneObjects) -> Self {
        let mut gpu = Self::zeroed();
        for (slot, sphere) in gpu.spheres.iter_mut().zip(scene.spheres()) {
            *slot = sphere.into();
        }
        for (slot, plane) in gpu.planes.iter_mut().zip(scene.planes()) {
            *slot = plane.into();
        }
        for (slot, triangle) in gpu.triangles.iter_mut().zip(scene.triangles()) {
            *slot = triangle.into();
        }
        for (slot, csg) in gpu.csg_spheres.iter_mut().zip(scene.csg_spheres()) {
            *slot = csg.into();
        }
        gpu.num_spheres = scene.num_spheres() as i32;
        gpu.num_planes = scene.num_planes() as i32;
        gpu.num_triangles = scene.num_triangles() as i32;
        gpu
    }
}

impl GpuSceneObjects {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// BVH UBO: fixed-size node array, live count and root index. The builder
/// always leaves the root at node 0; `root_node` is kept in the layout so the
/// shader does not hardcode it.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct GpuBvhData {
    pub nodes: [BvhNode; MAX_BVH_NODES],
    pub num_nodes: i32,
    pub root_node: i32,
    pub _pad: [f32; 2],
}

impl From<&Bvh> for GpuBvhData {
    fn from(bvh: &Bvh) -> Self {
        let mut gpu = Self::zeroed();
        gpu.nodes[..bvh.nodes.len()].copy_from_slice(&bvh.nodes);
        gpu.num_nodes = bvh.nodes.len() as i32;
        gpu.root_node = 0;
        gpu
    }
}

impl GpuBvhData {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_struct_sizes_match_ubo_layout() {
        assert_eq!(size_of::<GpuSphere>(), 32);
        assert_eq!(size_of::<GpuPlane>(), 32);
        assert_eq!(size_of::<GpuTriangle>(), 48);
        assert_eq!(size_of::<GpuCsgSphere>(), 16);
        assert_eq!(size_of::<BvhNode>(), 48);
        assert_eq!(
            size_of::<GpuBvhData>(),
            MAX_BVH_NODES * size_of::<BvhNode>() + 16
        );
    }

    #[test]
    fn test_scene_upload_counts_and_dead_slots() {
        let scene = SceneObjects::default_scene();
        let gpu = GpuSceneObjects::from(&scene);
        assert_eq!(gpu.num_spheres, 5);
        assert_eq!(gpu.num_planes, 6);
        assert_eq!(gpu.num_triangles, 8);
        // Slots past the live count stay zeroed.
        assert_eq!(gpu.spheres[5].radius, 0.0);
        assert_eq!(gpu.as_bytes().len(), size_of::<GpuSceneObjects>());
    }

    #[test]
    fn test_bvh_upload_root_at_zero() {
        let scene = SceneObjects::default_scene();
        let bvh = scene.build_bvh();
        let gpu = GpuBvhData::from(&bvh);
        assert_eq!(gpu.num_nodes as usize, bvh.nodes.len());
        assert_eq!(gpu.root_node, 0);
        assert_eq!(gpu.nodes[0], bvh.nodes[0]);
    }
}
