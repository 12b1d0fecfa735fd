// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::objects::{SceneError, SceneObjects};
use super::primitives::{CsgSphere, Plane, Sphere, Triangle};
use crate::constants::MAX_CSG_SPHERES;

/// On-disk scene description (JSON or YAML). Field shapes mirror what the
/// editor writes; everything is optional so hand-written files stay short.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spheres: Vec<SphereDesc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub planes: Vec<PlaneDesc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triangles: Vec<TriangleDesc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub csg_spheres: Vec<CsgSphereDesc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereDesc {
    pub position: [f32; 3],
    pub radius: f32,

    #[serde(default, skip_serializing_if = "is_zero_vec3")]
    pub velocity: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneDesc {
    pub position: [f32; 3],

    #[serde(default = "default_normal")]
    pub normal: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleDesc {
    pub vertices: [[f32; 3]; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsgSphereDesc {
    pub position: [f32; 3],
    pub radius: f32,
}

fn default_normal() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn is_zero_vec3(v: &[f32; 3]) -> bool {
    v[0] == 0.0 && v[1] == 0.0 && v[2] == 0.0
}

impl SceneDocument {
    /// Materializes the document into the fixed-capacity runtime arrays.
    /// Unfilled CSG slots stay at the zero-radius default.
    pub fn to_objects(&self) -> Result<SceneObjects, SceneError> {
        let mut objects = SceneObjects::default();

        for sphere in &self.spheres {
            objects.add_sphere(Sphere::with_velocity(
                Vec3::from(sphere.position),
                sphere.radius,
                Vec3::from(sphere.velocity),
            ))?;
        }
        for plane in &self.planes {
            objects.add_plane(Plane::new(
                Vec3::from(plane.position),
                Vec3::from(plane.normal),
            ))?;
        }
        for triangle in &self.triangles {
            objects.add_triangle(Triangle::new(
                Vec3::from(triangle.vertices[0]),
                Vec3::from(triangle.vertices[1]),
                Vec3::from(triangle.vertices[2]),
            ))?;
        }

        if self.csg_spheres.len() > MAX_CSG_SPHERES {
            return Err(SceneError::CapacityExceeded {
                kind: "CSG sphere",
                capacity: MAX_CSG_SPHERES,
            });
        }
        let mut block = [CsgSphere::default(); MAX_CSG_SPHERES];
        for (slot, desc) in block.iter_mut().zip(&self.csg_spheres) {
            *slot = CsgSphere::new(Vec3::from(desc.position), desc.radius);
        }
        objects.set_csg_spheres(block);

        Ok(objects)
    }

    pub fn from_objects(objects: &SceneObjects) -> Self {
        Self {
            spheres: objects
                .spheres()
                .iter()
                .map(|s| SphereDesc {
                    position: s.position.into(),
                    radius: s.radius,
                    velocity: s.velocity.into(),
                })
                .collect(),
            planes: objects
                .planes()
                .iter()
                .map(|p| PlaneDesc {
                    position: p.position.into(),
                    normal: p.normal.into(),
                })
                .collect(),
            triangles: objects
                .triangles()
                .iter()
                .map(|t| TriangleDesc {
                    vertices: [t.v0.into(), t.v1.into(), t.v2.into()],
                })
                .collect(),
            csg_spheres: objects
                .csg_spheres()
                .iter()
                .map(|c| CsgSphereDesc {
                    position: c.position.into(),
                    radius: c.radius,
                })
                .collect(),
        }
    }
}
