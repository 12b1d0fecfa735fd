// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Builds the BVH for a scene file (or the stock demo scene) and prints the
//! resulting tree statistics.

use std::env;
use std::path::Path;

use anyhow::Result;

use rt_accel::scene::loader::load_scene;
use rt_accel::SceneObjects;

fn main() -> Result<()> {
    env_logger::init();

    let scene = match env::args().nth(1) {
        Some(path) => load_scene(Path::new(&path))?,
        None => SceneObjects::default_scene(),
    };

    let bvh = scene.build_bvh();
    let stats = bvh.stats();

    println!(
        "{} primitives ({} spheres, {} planes, {} triangles, {} CSG spheres)",
        scene.num_spheres()
            + scene.num_planes()
            + scene.num_triangles()
            + scene.csg_spheres().len(),
        scene.num_spheres(),
        scene.num_planes(),
        scene.num_triangles(),
        scene.csg_spheres().len()
    );
    println!(
        "{} nodes, {} leaves, max depth {}, largest leaf {}",
        stats.node_count, stats.leaf_count, stats.max_depth, stats.max_leaf_size
    );

    Ok(())
}
