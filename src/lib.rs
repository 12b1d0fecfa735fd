// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scene data and BVH acceleration structures for an interactive GPU
//! raytracer. The renderer uploads the fixed-capacity primitive arrays and
//! the flat BVH node array from [`gpu`] as uniform buffers; ray intersection
//! itself runs in the shaders and is not part of this crate.

pub mod accel;
pub mod constants;
pub mod gpu;
pub mod scene;

pub use accel::aabb::Aabb;
pub use accel::bvh::{Bvh, BvhNode, BvhStats};
pub use scene::objects::{SceneError, SceneObjects};
pub use scene::primitives::{CsgSphere, Plane, PrimitiveKind, Sphere, Triangle};
