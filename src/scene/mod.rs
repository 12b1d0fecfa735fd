// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod exporter;
pub mod loader;
pub mod objects;
pub mod primitives;
#[allow(clippy::module_inception)]
pub mod scene;

pub use objects::{SceneError, SceneObjects};
pub use primitives::{CsgSphere, Plane, PrimitiveKind, Sphere, Triangle};
