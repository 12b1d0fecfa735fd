// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use glam::vec3;
use thiserror::Error;

use super::primitives::{CsgSphere, Plane, Sphere, Triangle};
use crate::accel::bvh::Bvh;
use crate::constants::{MAX_CSG_SPHERES, MAX_PLANES, MAX_SPHERES, MAX_TRIANGLES};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("{kind} capacity exceeded (max {capacity})")]
    CapacityExceeded {
        kind: &'static str,
        capacity: usize,
    },
}

/// All primitives of the scene: fixed-capacity arrays with live counts, the
/// same shape the GPU-side arrays have. CSG spheres are a fixed block with no
/// count; all slots always participate.
#[derive(Debug, Clone)]
pub struct SceneObjects {
    spheres: [Sphere; MAX_SPHERES],
    planes: [Plane; MAX_PLANES],
    triangles: [Triangle; MAX_TRIANGLES],
    csg_spheres: [CsgSphere; MAX_CSG_SPHERES],
    num_spheres: usize,
    num_planes: usize,
    num_triangles: usize,
}

impl Default for SceneObjects {
    fn default() -> Self {
        Self {
            spheres: [Sphere::default(); MAX_SPHERES],
            planes: [Plane::default(); MAX_PLANES],
            triangles: [Triangle::default(); MAX_TRIANGLES],
            csg_spheres: [CsgSphere::default(); MAX_CSG_SPHERES],
            num_spheres: 0,
            num_planes: 0,
            num_triangles: 0,
        }
    }
}

impl SceneObjects {
    /// Live spheres only.
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres[..self.num_spheres]
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes[..self.num_planes]
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles[..self.num_triangles]
    }

    /// The full CSG block; there is no live count.
    pub fn csg_spheres(&self) -> &[CsgSphere] {
        &self.csg_spheres
    }

    pub fn num_spheres(&self) -> usize {
        self.num_spheres
    }

    pub fn num_planes(&self) -> usize {
        self.num_planes
    }

    pub fn num_triangles(&self) -> usize {
        self.num_triangles
    }

    pub fn add_sphere(&mut self, sphere: Sphere) -> Result<usize, SceneError> {
        if self.num_spheres >= MAX_SPHERES {
            return Err(SceneError::CapacityExceeded {
                kind: "sphere",
                capacity: MAX_SPHERES,
            });
        }
        self.spheres[self.num_spheres] = sphere;
        self.num_spheres += 1;
        Ok(self.num_spheres - 1)
    }

    pub fn add_plane(&mut self, plane: Plane) -> Result<usize, SceneError> {
        if self.num_planes >= MAX_PLANES {
            return Err(SceneError::CapacityExceeded {
                kind: "plane",
                capacity: MAX_PLANES,
            });
        }
        self.planes[self.num_planes] = plane;
        self.num_planes += 1;
        Ok(self.num_planes - 1)
    }

    pub fn add_triangle(&mut self, triangle: Triangle) -> Result<usize, SceneError> {
        if self.num_triangles >= MAX_TRIANGLES {
            return Err(SceneError::CapacityExceeded {
                kind: "triangle",
                capacity: MAX_TRIANGLES,
            });
        }
        self.triangles[self.num_triangles] = triangle;
        self.num_triangles += 1;
        Ok(self.num_triangles - 1)
    }

    pub fn set_csg_spheres(&mut self, csg_spheres: [CsgSphere; MAX_CSG_SPHERES]) {
        self.csg_spheres = csg_spheres;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Rebuilds the BVH over the current scene from scratch. The previous
    /// node array stays valid until the caller swaps in the returned one.
    pub fn build_bvh(&self) -> Bvh {
        Bvh::build(self)
    }

    /// The stock demo scene: a few spheres, a box of six planes, a diamond of
    /// eight triangles and the CSG sphere cluster.
    pub fn default_scene() -> Self {
        let mut scene = Self::default();

        let spheres = [
            Sphere::new(vec3(5.0, -35.0, -10.0), 1.0),
            Sphere::new(vec3(14.0, -35.0, -16.0), 1.0),
            Sphere::new(vec3(15.0, -35.0, 15.0), 1.0),
            Sphere::new(vec3(15.0, -35.0, 15.0), 0.99),
            Sphere::new(vec3(10.0, -35.0, -16.0), 1.0),
        ];
        let planes = [
            Plane::new(vec3(0.0, -40.0, 0.0), vec3(0.0, 1.0, 0.0)),
            Plane::new(vec3(0.0, 40.0, 0.0), vec3(0.0, -1.0, 0.0)),
            Plane::new(vec3(-40.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
            Plane::new(vec3(40.0, 0.0, 0.0), vec3(-1.0, 0.0, 0.0)),
            Plane::new(vec3(0.0, 0.0, -40.0), vec3(0.0, 0.0, 1.0)),
            Plane::new(vec3(0.0, 0.0, 40.0), vec3(0.0, 0.0, -1.0)),
        ];
        let triangles = [
            Triangle::new(vec3(3.0, -1.0, 3.0), vec3(3.0, -1.0, 5.0), vec3(4.0, 2.0, 4.0)),
            Triangle::new(vec3(3.0, -1.0, 5.0), vec3(5.0, -1.0, 5.0), vec3(4.0, 2.0, 4.0)),
            Triangle::new(vec3(5.0, -1.0, 5.0), vec3(5.0, -1.0, 3.0), vec3(4.0, 2.0, 4.0)),
            Triangle::new(vec3(5.0, -1.0, 3.0), vec3(3.0, -1.0, 3.0), vec3(4.0, 2.0, 4.0)),
            Triangle::new(vec3(3.0, -1.0, 3.0), vec3(4.0, -3.0, 4.0), vec3(3.0, -1.0, 5.0)),
            Triangle::new(vec3(3.0, -1.0, 5.0), vec3(4.0, -3.0, 4.0), vec3(5.0, -1.0, 5.0)),
            Triangle::new(vec3(5.0, -1.0, 5.0), vec3(4.0, -3.0, 4.0), vec3(5.0, -1.0, 3.0)),
            Triangle::new(vec3(5.0, -1.0, 3.0), vec3(4.0, -3.0, 4.0), vec3(3.0, -1.0, 3.0)),
        ];

        for sphere in spheres {
            let _ = scene.add_sphere(sphere);
        }
        for plane in planes {
            let _ = scene.add_plane(plane);
        }
        for triangle in triangles {
            let _ = scene.add_triangle(triangle);
        }
        scene.set_csg_spheres([
            CsgSphere::new(vec3(-1.0, 2.0, 0.0), 1.5),
            CsgSphere::new(vec3(1.0, 2.0, 0.0), 1.5),
            CsgSphere::new(vec3(0.0, 2.7, -0.3), 0.8),
            CsgSphere::new(vec3(0.0, 2.8, 0.3), 0.8),
        ]);

        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_respects_capacity() {
        let mut scene = SceneObjects::default();
        for _ in 0..MAX_SPHERES {
            scene.add_sphere(Sphere::new(vec3(0.0, 0.0, 0.0), 1.0)).unwrap();
        }
        assert!(matches!(
            scene.add_sphere(Sphere::new(vec3(0.0, 0.0, 0.0), 1.0)),
            Err(SceneError::CapacityExceeded { kind: "sphere", .. })
        ));
        assert_eq!(scene.num_spheres(), MAX_SPHERES);
    }

    #[test]
    fn test_default_scene_counts() {
        let scene = SceneObjects::default_scene();
        assert_eq!(scene.spheres().len(), 5);
        assert_eq!(scene.planes().len(), 6);
        assert_eq!(scene.triangles().len(), 8);
        assert_eq!(scene.csg_spheres().len(), MAX_CSG_SPHERES);
    }

    #[test]
    fn test_clear_resets_counts() {
        let mut scene = SceneObjects::default_scene();
        scene.clear();
        assert!(scene.spheres().is_empty());
        assert!(scene.planes().is_empty());
        assert!(scene.triangles().is_empty());
    }
}
