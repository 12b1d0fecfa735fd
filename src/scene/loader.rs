// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::objects::SceneObjects;
use super::scene::SceneDocument;

pub fn load_scene(path: &Path) -> Result<SceneObjects> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;

    let document: SceneDocument = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON scene file: {}", path.display()))?,
        _ => serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML scene file: {}", path.display()))?,
    };

    let objects = document
        .to_objects()
        .with_context(|| format!("Scene file exceeds capacity: {}", path.display()))?;

    log::info!(
        "Loaded scene: {} spheres, {} planes, {} triangles",
        objects.num_spheres(),
        objects.num_planes(),
        objects.num_triangles()
    );

    Ok(objects)
}
