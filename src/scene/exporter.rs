// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::objects::SceneObjects;
use super::scene::SceneDocument;

pub fn save_scene(objects: &SceneObjects, path: &Path) -> Result<()> {
    let document = SceneDocument::from_objects(objects);

    let serialized = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            serde_json::to_string_pretty(&document).context("Failed to serialize scene")?
        }
        _ => serde_yml::to_string(&document).context("Failed to serialize scene")?,
    };

    fs::write(path, serialized)
        .with_context(|| format!("Failed to write scene file: {}", path.display()))?;
    log::info!("Saved scene to {}", path.display());
    Ok(())
}
