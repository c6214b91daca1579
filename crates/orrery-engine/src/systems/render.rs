use crate::components::mesh::Material;
use crate::components::node::Node;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of nodes, in scene order.
/// Hidden nodes and nodes with nothing to draw are skipped. A node carrying
/// both a mesh and a point cloud yields two instances.
pub fn build_render_buffer<'a>(nodes: impl Iterator<Item = &'a Node>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for node in nodes {
        if !node.visible {
            continue;
        }
        let model = node.world.to_cols_array_2d();
        let user_data = node.user_data.map_or(-1.0, |v| v as f32);

        if let Some(mesh) = &node.mesh {
            let mut flags = 0;
            if mesh.cast_shadow {
                flags |= RenderInstance::FLAG_CAST_SHADOW;
            }
            if mesh.receive_shadow {
                flags |= RenderInstance::FLAG_RECEIVE_SHADOW;
            }
            buffer.push(RenderInstance {
                model,
                r: mesh.color.r,
                g: mesh.color.g,
                b: mesh.color.b,
                opacity: 1.0,
                size: mesh.radius(),
                kind: match mesh.material {
                    Material::Basic => RenderInstance::KIND_BASIC,
                    Material::Lambert => RenderInstance::KIND_LAMBERT,
                },
                user_data,
                flags: flags as f32,
                segments: mesh.segments() as f32,
                ..Default::default()
            });
        }

        if let Some(cloud) = &node.points {
            if cloud.is_empty() {
                continue;
            }
            let first = buffer.points.len();
            buffer.points.extend_from_slice(&cloud.vertices);
            buffer.push(RenderInstance {
                model,
                opacity: cloud.opacity,
                size: cloud.size,
                kind: RenderInstance::KIND_POINTS,
                user_data,
                first_point: first as f32,
                point_count: cloud.len() as f32,
                ..Default::default()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::NodeId;
    use crate::components::mesh::{Color, MeshComponent};
    use crate::components::points::{PointCloud, PointVertex};
    use glam::{Mat4, Vec3};

    #[test]
    fn meshes_become_instances() {
        let nodes = vec![
            Node::new(NodeId(1))
                .with_mesh(MeshComponent::sphere(3.0, 32, Color::from_hex(0xFDB813)).with_material(Material::Basic)),
            Node::new(NodeId(2))
                .with_mesh(MeshComponent::sphere(0.5, 16, Color::WHITE).with_shadows(true, true))
                .with_user_data(3)
                .with_world(Mat4::from_translation(Vec3::new(15.0, 0.0, 0.0))),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(nodes.iter(), &mut buffer);

        assert_eq!(buffer.instance_count(), 2);
        let sun = &buffer.instances[0];
        assert_eq!(sun.kind, RenderInstance::KIND_BASIC);
        assert_eq!(sun.size, 3.0);
        assert_eq!(sun.segments, 32.0);
        assert_eq!(sun.user_data, -1.0);

        let planet = &buffer.instances[1];
        assert_eq!(planet.kind, RenderInstance::KIND_LAMBERT);
        assert_eq!(planet.user_data, 3.0);
        assert_eq!(planet.flags, 3.0);
        assert_eq!(planet.model[3], [15.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn hidden_and_empty_nodes_are_skipped() {
        let mut hidden = Node::new(NodeId(1)).with_mesh(MeshComponent::sphere(1.0, 8, Color::WHITE));
        hidden.visible = false;
        let pivot = Node::new(NodeId(2));
        let mut buffer = RenderBuffer::new();
        build_render_buffer([hidden, pivot].iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn point_clouds_reference_the_point_section() {
        let cloud = PointCloud::new(vec![PointVertex::default(); 5], 2.0, 0.8);
        let nodes = vec![
            Node::new(NodeId(1)).with_points(cloud.clone()),
            Node::new(NodeId(2)).with_points(cloud),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(nodes.iter(), &mut buffer);

        assert_eq!(buffer.point_count(), 10);
        assert_eq!(buffer.instances[1].kind, RenderInstance::KIND_POINTS);
        assert_eq!(buffer.instances[1].first_point, 5.0);
        assert_eq!(buffer.instances[1].point_count, 5.0);
        assert_eq!(buffer.instances[1].opacity, 0.8);
    }
}
