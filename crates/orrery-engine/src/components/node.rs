use glam::{Mat4, Vec3};
use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;
use crate::components::points::PointCloud;

/// A scene node with optional renderable parts.
///
/// `world` is written by `TransformGraph::propagate`; nodes outside the graph
/// keep whatever world matrix they were spawned with.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Hidden nodes are neither drawn nor picked.
    pub visible: bool,
    pub world: Mat4,
    pub mesh: Option<MeshComponent>,
    pub points: Option<PointCloud>,
    /// Opaque value the app attaches to resolve picks back to its own records.
    pub user_data: Option<u32>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            world: Mat4::IDENTITY,
            mesh: None,
            points: None,
            user_data: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_points(mut self, points: PointCloud) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_user_data(mut self, user_data: u32) -> Self {
        self.user_data = Some(user_data);
        self
    }

    pub fn with_world(mut self, world: Mat4) -> Self {
        self.world = world;
        self
    }

    /// Translation part of the world matrix.
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    /// Largest axis scale of the world matrix.
    pub fn world_scale(&self) -> f32 {
        self.world
            .x_axis
            .truncate()
            .length()
            .max(self.world.y_axis.truncate().length())
            .max(self.world.z_axis.truncate().length())
    }
}
