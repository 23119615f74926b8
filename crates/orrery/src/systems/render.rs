use crate::components::mesh::Shape;
use crate::core::scene::SceneGraph;
use crate::renderer::instance::{NodeInstance, RenderBuffer};
use crate::systems::builder::CloudNode;
use crate::systems::comet::Comet;

/// Build the render buffer from the visible meshes of `scene`.
/// Opaque meshes come first; `opaque_split` marks the boundary. Point-cloud
/// nodes carry their cloud's count, point size and index (0 belt, 1 stars)
/// in `params`. Comet trails are appended to the flat trail arrays.
pub fn build_render_buffer(scene: &SceneGraph, clouds: [&CloudNode; 2], comets: &[Comet], buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut translucent: Vec<NodeInstance> = Vec::new();
    for (id, node) in scene.iter() {
        if !node.visible {
            continue;
        }
        let Some(mesh) = &node.mesh else {
            continue;
        };

        let params = match mesh.shape {
            Shape::Points => clouds
                .iter()
                .enumerate()
                .find(|(_, c)| c.node == id)
                .map(|(i, c)| [c.cloud.len() as f32, c.cloud.size, i as f32])
                .unwrap_or([0.0; 3]),
            shape => shape.params(),
        };
        let [r, g, b] = mesh.color.to_array();
        let instance = NodeInstance {
            model: glam::Mat4::from(node.world).to_cols_array_2d(),
            color: [r, g, b, mesh.opacity],
            shape: mesh.shape.code(),
            params,
        };

        if mesh.opacity >= 1.0 {
            buffer.push(instance);
        } else {
            translucent.push(instance);
        }
    }

    buffer.opaque_split = buffer.instance_count();
    buffer.instances.extend(translucent);

    for comet in comets {
        let trail = &comet.trail;
        buffer
            .trail_positions
            .extend(trail.positions.iter().flat_map(|p| p.to_array()));
        buffer
            .trail_colors
            .extend(trail.colors.iter().flat_map(|c| c.to_array()));
        buffer.trail_sizes.extend_from_slice(&trail.sizes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::OrreryConfig;
    use crate::assets::catalog::Catalog;
    use crate::systems::builder::SceneBuilder;

    #[test]
    fn hidden_nodes_are_skipped_and_translucent_go_last() {
        let cfg = OrreryConfig { starfield_count: 5, belt_count: 7, ..OrreryConfig::default() };
        let catalog = Catalog::from_json(
            r#"{ "bodies": [ { "id": "sun", "distance": 0 },
                             { "id": "saturn", "distance": 1430, "temAneis": true } ] }"#,
        )
        .unwrap();
        let built = SceneBuilder::build(&catalog, &cfg);

        let mut buffer = RenderBuffer::new();
        build_render_buffer(&built.scene, [&built.belt, &built.starfield], &built.comets, &mut buffer);

        // Sun, Saturn, belt, starfield are opaque; three ring bands are not.
        assert_eq!(buffer.opaque_split, 4);
        assert_eq!(buffer.instance_count(), 7);
        assert!(buffer.instances[4..].iter().all(|i| i.shape == 1.0));

        let belt = buffer.instances.iter().find(|i| i.shape == 3.0 && i.params[2] == 0.0).unwrap();
        assert_eq!(belt.params[0], 7.0);
        let stars = buffer.instances.iter().find(|i| i.shape == 3.0 && i.params[2] == 1.0).unwrap();
        assert_eq!(stars.params[0], 5.0);
    }

    #[test]
    fn trails_are_flattened() {
        let cfg = OrreryConfig { trail_length: 10, ..OrreryConfig::default() };
        let catalog = Catalog::from_json(
            r#"{ "comets": [ { "id": "a", "perihelion": 100, "aphelion": 900 },
                             { "id": "b", "perihelion": 200, "aphelion": 500 } ] }"#,
        )
        .unwrap();
        let built = SceneBuilder::build(&catalog, &cfg);

        let mut buffer = RenderBuffer::new();
        build_render_buffer(&built.scene, [&built.belt, &built.starfield], &built.comets, &mut buffer);
        assert_eq!(buffer.trail_count(), 20);
        assert_eq!(buffer.trail_positions.len(), 60);
        assert_eq!(buffer.trail_colors.len(), 60);
    }
}
