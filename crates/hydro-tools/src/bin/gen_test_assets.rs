//! Write synthetic model assets for trying the converter end to end.
//!
//! Run: `cargo run -p hydro-tools --features test-tools --bin gen_test_assets -- [output_dir]`

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hydro_decode::ModelVariant;
use hydro_decode::testing::{AssetBuilder, TestVertex};

const OUTPUT_DIR: &str = "test_assets";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let output_path = Path::new(args.get(1).map_or(OUTPUT_DIR, String::as_str));
    fs::create_dir_all(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;

    // A unit cube: 8 corners, 12 triangles.
    let corners: Vec<TestVertex> = (0..8u8)
        .map(|i| TestVertex {
            position: [
                f32::from(i & 1),
                f32::from((i >> 1) & 1),
                f32::from((i >> 2) & 1),
            ],
            uv: [f32::from(i & 1), f32::from((i >> 1) & 1)],
        })
        .collect();
    let faces: Vec<u16> = vec![
        0, 2, 1, 1, 2, 3, // -z
        4, 5, 6, 5, 7, 6, // +z
        0, 1, 4, 1, 5, 4, // -y
        2, 6, 3, 3, 6, 7, // +y
        0, 4, 2, 2, 4, 6, // -x
        1, 3, 5, 3, 7, 5, // +x
    ];

    let assets = [
        (
            "cube_static.mdl",
            AssetBuilder::new(ModelVariant::Static)
                .shader("cube_diffuse")
                .vertices(corners.clone())
                .indices(faces.clone()),
        ),
        (
            "cube_animated.mdl",
            AssetBuilder::new(ModelVariant::Animated)
                .shader("cube_diffuse")
                .shader("cube_glow")
                .object("cube")
                .gap(64)
                .stride(36)
                .vertices(corners)
                .indices(faces),
        ),
    ];

    for (name, builder) in assets {
        let path = output_path.join(name);
        let bytes = builder.build();
        fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved {} bytes to {}", bytes.len(), path.display());
    }

    println!("\nNext steps:");
    println!(
        "  hydro_tools model {}/cube_static.mdl --variant static",
        output_path.display()
    );
    println!(
        "  hydro_tools model {}/cube_animated.mdl --variant animated",
        output_path.display()
    );

    Ok(())
}
