// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use glam::Vec3;

use crate::constants::{PLANE_AABB_EXTENT, PLANE_AABB_THICKNESS};
use crate::scene::primitives::{CsgSphere, Plane, Sphere, Triangle};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Identity element for `union`: contains nothing, unions to the other box.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Index of the axis with the largest extent (0=x, 1=y, 2=z). Ties go to
    /// the lower axis index.
    pub fn longest_axis(&self) -> usize {
        let d = self.extent();
        let mut axis = 0;
        if d.y > d.x {
            axis = 1;
        }
        if d.z > d[axis] {
            axis = 2;
        }
        axis
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// True for the never-written EMPTY box (min > max on every axis).
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }
}

pub fn sphere_aabb(sphere: &Sphere) -> Aabb {
    let r = Vec3::splat(sphere.radius);
    Aabb::new(sphere.position - r, sphere.position + r)
}

/// Planes are infinite, so the builder stands in a large thin box spanning the
/// plane through its position. The tangent is derived from the world axis
/// least aligned with the normal, which keeps the box non-degenerate in the
/// tangent/bitangent directions for any normal.
pub fn plane_aabb(plane: &Plane) -> Aabb {
    let normal = plane.normal.normalize();

    let reference = if normal.x.abs() < normal.y.abs() {
        Vec3::X
    } else {
        Vec3::Y
    };
    let tangent = normal.cross(reference).normalize();
    let bitangent = normal.cross(tangent).normalize();

    let corner1 = plane.position
        + tangent * PLANE_AABB_EXTENT
        + bitangent * PLANE_AABB_EXTENT
        - normal * PLANE_AABB_THICKNESS;
    let corner2 = plane.position
        - tangent * PLANE_AABB_EXTENT
        - bitangent * PLANE_AABB_EXTENT
        + normal * PLANE_AABB_THICKNESS;

    Aabb::new(corner1.min(corner2), corner1.max(corner2))
}

pub fn triangle_aabb(triangle: &Triangle) -> Aabb {
    Aabb::new(
        triangle.v0.min(triangle.v1).min(triangle.v2),
        triangle.v0.max(triangle.v1).max(triangle.v2),
    )
}

pub fn csg_sphere_aabb(sphere: &CsgSphere) -> Aabb {
    let r = Vec3::splat(sphere.radius);
    Aabb::new(sphere.position - r, sphere.position + r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn test_sphere_aabb() {
        let aabb = sphere_aabb(&Sphere::new(vec3(1.0, 2.0, 3.0), 0.5));
        assert_eq!(aabb.min, vec3(0.5, 1.5, 2.5));
        assert_eq!(aabb.max, vec3(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_triangle_aabb() {
        let tri = Triangle::new(
            vec3(0.0, 0.0, 0.0),
            vec3(2.0, -1.0, 0.5),
            vec3(1.0, 3.0, -2.0),
        );
        let aabb = triangle_aabb(&tri);
        assert_eq!(aabb.min, vec3(0.0, -1.0, -2.0));
        assert_eq!(aabb.max, vec3(2.0, 3.0, 0.5));
    }

    #[test]
    fn test_plane_aabb_thin_along_normal() {
        let aabb = plane_aabb(&Plane::new(Vec3::ZERO, Vec3::Y));
        let extent = aabb.extent();
        assert!((extent.y - 2.0 * PLANE_AABB_THICKNESS).abs() < 1e-4);
        assert!(extent.x > PLANE_AABB_EXTENT);
        assert!(extent.z > PLANE_AABB_EXTENT);
    }

    #[test]
    fn test_plane_aabb_never_degenerate_in_tangent_plane() {
        // Axis-aligned and diagonal normals must all give a box with two
        // large dimensions.
        let normals = [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            -Vec3::X,
            vec3(1.0, 1.0, 1.0),
            vec3(-0.3, 0.9, 0.1),
        ];
        for normal in normals {
            let aabb = plane_aabb(&Plane::new(vec3(1.0, -2.0, 0.5), normal));
            let extent = aabb.extent();
            let mut large_axes = 0;
            for axis in 0..3 {
                if extent[axis] > 1.0 {
                    large_axes += 1;
                }
            }
            assert!(large_axes >= 2, "degenerate plane box for {normal:?}");
        }
    }

    #[test]
    fn test_union_and_empty_identity() {
        let a = Aabb::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 1.0));
        let b = Aabb::new(vec3(-1.0, 0.5, 0.0), vec3(0.5, 2.0, 3.0));
        let u = a.union(b);
        assert_eq!(u.min, vec3(-1.0, 0.0, 0.0));
        assert_eq!(u.max, vec3(1.0, 2.0, 3.0));
        assert_eq!(Aabb::EMPTY.union(a), a);
        assert!(Aabb::EMPTY.is_empty());
        assert!(!a.is_empty());
    }

    #[test]
    fn test_longest_axis_tie_breaking() {
        let aabb = Aabb::new(Vec3::ZERO, vec3(2.0, 2.0, 1.0));
        assert_eq!(aabb.longest_axis(), 0);
        let aabb = Aabb::new(Vec3::ZERO, vec3(1.0, 2.0, 2.0));
        assert_eq!(aabb.longest_axis(), 1);
        let aabb = Aabb::new(Vec3::ZERO, vec3(1.0, 1.0, 2.0));
        assert_eq!(aabb.longest_axis(), 2);
    }
}
