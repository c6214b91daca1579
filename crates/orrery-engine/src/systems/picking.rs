use glam::Vec3;
use crate::api::types::NodeId;
use crate::core::scene::Scene;
use crate::renderer::ray::Ray;

/// Nearest mesh hit along a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
    pub user_data: Option<u32>,
}

/// Intersect `ray` with the bounding spheres of the candidate nodes and
/// return the nearest hit. Hidden nodes, nodes without a mesh and unknown ids
/// are skipped. Sphere radii follow the node's world scale.
pub fn pick(scene: &Scene, ray: &Ray, candidates: impl IntoIterator<Item = NodeId>) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;

    for id in candidates {
        let Some(node) = scene.get(id) else { continue };
        if !node.visible {
            continue;
        }
        let Some(mesh) = &node.mesh else { continue };
        let radius = mesh.radius() * node.world_scale();
        let Some(distance) = ray.intersect_sphere(node.world_position(), radius) else {
            continue;
        };
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(PickHit {
                node: id,
                distance,
                point: ray.at(distance),
                user_data: node.user_data,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Color, MeshComponent};
    use crate::components::node::Node;
    use glam::Mat4;

    fn sphere_at(id: u32, center: Vec3, radius: f32) -> Node {
        Node::new(NodeId(id))
            .with_mesh(MeshComponent::sphere(radius, 16, Color::WHITE))
            .with_world(Mat4::from_translation(center))
            .with_user_data(id * 10)
    }

    #[test]
    fn nearest_sphere_wins() {
        let mut scene = Scene::new();
        scene.spawn(sphere_at(1, Vec3::new(0.0, 0.0, -20.0), 1.0));
        scene.spawn(sphere_at(2, Vec3::new(0.0, 0.0, -10.0), 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = pick(&scene, &ray, [NodeId(1), NodeId(2)]).unwrap();
        assert_eq!(hit.node, NodeId(2));
        assert_eq!(hit.user_data, Some(20));
        assert!((hit.distance - 9.0).abs() < 1e-4);
    }

    #[test]
    fn only_candidates_are_tested() {
        let mut scene = Scene::new();
        scene.spawn(sphere_at(1, Vec3::new(0.0, 0.0, -20.0), 1.0));
        scene.spawn(sphere_at(2, Vec3::new(0.0, 0.0, -10.0), 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(pick(&scene, &ray, [NodeId(1)]).map(|h| h.node), Some(NodeId(1)));
        assert!(pick(&scene, &ray, [NodeId(99)]).is_none());
    }

    #[test]
    fn hidden_nodes_are_not_picked() {
        let mut scene = Scene::new();
        let mut node = sphere_at(1, Vec3::new(0.0, 0.0, -10.0), 1.0);
        node.visible = false;
        scene.spawn(node);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(pick(&scene, &ray, [NodeId(1)]).is_none());
    }

    #[test]
    fn world_scale_grows_the_target() {
        let mut scene = Scene::new();
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(3.0),
            glam::Quat::IDENTITY,
            Vec3::new(2.5, 0.0, -10.0),
        );
        scene.spawn(Node::new(NodeId(1)).with_mesh(MeshComponent::sphere(1.0, 8, Color::WHITE)).with_world(world));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(pick(&scene, &ray, [NodeId(1)]).is_some());
    }
}
