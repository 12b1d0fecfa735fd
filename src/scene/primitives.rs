// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use glam::Vec3;

/// Type tag shared by the BVH builder and the shader-side intersection
/// dispatch. The discriminant values are part of the GPU contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum PrimitiveKind {
    Sphere = 0,
    Plane = 1,
    Triangle = 2,
    CsgSphere = 3,
}

impl PrimitiveKind {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sphere => "Sphere",
            Self::Plane => "Plane",
            Self::Triangle => "Triangle",
            Self::CsgSphere => "CSG sphere",
        }
    }

    pub const ALL: &[Self] = &[Self::Sphere, Self::Plane, Self::Triangle, Self::CsgSphere];
}

/// Sphere primitive. `velocity` drives motion blur in the shader and is
/// ignored by the BVH builder.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sphere {
    pub position: Vec3,
    pub radius: f32,
    pub velocity: Vec3,
}

impl Sphere {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius,
            velocity: Vec3::ZERO,
        }
    }

    pub fn with_velocity(position: Vec3, radius: f32, velocity: Vec3) -> Self {
        Self {
            position,
            radius,
            velocity,
        }
    }
}

/// Infinite plane through `position` with the given normal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plane {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }
}

/// Sphere participating in the CSG stage. The scene always carries a full
/// block of `MAX_CSG_SPHERES` of these.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CsgSphere {
    pub position: Vec3,
    pub radius: f32,
}

impl CsgSphere {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self { position, radius }
    }
}
