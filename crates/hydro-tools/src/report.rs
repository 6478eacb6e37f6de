//! Human-readable progress and summaries via `tracing`.

use std::path::Path;

use hydro_decode::{DecodedModel, Mesh, ModelVariant};

/// Log what was found in a decoded model.
pub fn model_summary(path: &Path, variant: ModelVariant, model: &DecodedModel) {
    for line in summary_lines(path, variant, model) {
        tracing::info!("{line}");
    }
    check_mesh(&model.mesh);
}

/// The lines [`model_summary`] logs, names included.
#[must_use]
pub fn summary_lines(path: &Path, variant: ModelVariant, model: &DecodedModel) -> Vec<String> {
    let DecodedModel {
        header,
        blocks,
        mesh,
    } = model;

    let mut lines = vec![
        format!("Decoded {variant} model {}", path.display()),
        format!("  Shaders: {}", header.shaders.len()),
    ];
    lines.extend(header.shaders.iter().map(|shader| format!("    {shader}")));
    if variant == ModelVariant::Animated {
        lines.push(format!("  Objects: {}", header.object_names.len()));
        lines.extend(header.object_names.iter().map(|name| format!("    {name}")));
    }
    lines.push(format!(
        "  Vertex block at {}: stride {}, {} bytes, {} vertices",
        blocks.vertex_offset,
        blocks.vertex_stride,
        blocks.vertex_block_size,
        mesh.vertex_count()
    ));
    lines.push(format!(
        "  Index block at {}: stride {}, {} bytes, {} indices ({} triangles)",
        blocks.index_offset,
        blocks.index_stride,
        blocks.index_block_size,
        mesh.indices.len(),
        mesh.triangle_count()
    ));
    lines
}

/// Warn about geometry that decodes fine but is probably wrong.
pub fn check_mesh(mesh: &Mesh) {
    let invalid = count_invalid_positions(mesh);
    if invalid > 0 {
        tracing::warn!(
            "{invalid} of {} positions contain NaN; the vertex block may be misaligned",
            mesh.vertex_count()
        );
    }
    if mesh.triangle_count() == 0 {
        tracing::warn!("Mesh has no triangles");
    }
}

/// Number of positions with a NaN component.
#[must_use]
pub fn count_invalid_positions(mesh: &Mesh) -> usize {
    mesh.positions.iter().filter(|p| p.is_nan()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_decode::ModelHeader;
    use hydro_decode::glam::{Vec2, Vec3};

    #[test]
    fn counts_nan_positions() {
        let mesh = Mesh {
            positions: vec![
                Vec3::ZERO,
                Vec3::new(f32::NAN, 0.0, 0.0),
                Vec3::new(1.0, 2.0, f32::NAN),
                Vec3::splat(f32::INFINITY),
            ],
            uvs: vec![Vec2::ZERO; 4],
            indices: vec![0, 1, 2],
        };
        assert_eq!(count_invalid_positions(&mesh), 2);
    }

    #[test]
    fn summary_lists_shader_and_object_names() {
        let model = DecodedModel {
            header: ModelHeader {
                shaders: vec!["hull_diffuse".to_owned(), "glass".to_owned()],
                object_names: vec!["hull".to_owned()],
            },
            ..DecodedModel::default()
        };
        let lines = summary_lines(Path::new("boat.mdl"), ModelVariant::Animated, &model);
        assert_eq!(lines[0], format!("Decoded {} model boat.mdl", ModelVariant::Animated));
        assert_eq!(
            lines[1..6],
            ["  Shaders: 2", "    hull_diffuse", "    glass", "  Objects: 1", "    hull"]
        );
    }

    #[test]
    fn static_summary_has_no_object_table() {
        let model = DecodedModel {
            header: ModelHeader {
                shaders: vec!["ground".to_owned()],
                object_names: Vec::new(),
            },
            ..DecodedModel::default()
        };
        let lines = summary_lines(Path::new("track.mdl"), ModelVariant::Static, &model);
        assert!(lines.iter().any(|line| line == "    ground"));
        assert!(!lines.iter().any(|line| line.starts_with("  Objects")));
    }
}
