// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod aabb;
pub mod bvh;

pub use aabb::Aabb;
pub use bvh::{Bvh, BvhNode, BvhStats};
