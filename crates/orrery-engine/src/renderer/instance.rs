use bytemuck::{Pod, Zeroable};
use crate::components::points::PointVertex;

/// Per-instance render data written to the frame buffer for the host renderer.
/// Must match the host protocol: 28 floats = 112 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub opacity: f32,
    /// Sphere radius for meshes, point size in pixels for point clouds.
    pub size: f32,
    /// One of the `KIND_*` constants.
    pub kind: f32,
    /// App-supplied tag, or -1 when the node has none.
    pub user_data: f32,
    /// `FLAG_*` bits.
    pub flags: f32,
    /// First vertex in the point section (point clouds only).
    pub first_point: f32,
    pub point_count: f32,
    /// Tessellation hint (meshes only).
    pub segments: f32,
    pub _pad: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_BASIC: f32 = 0.0;
    pub const KIND_LAMBERT: f32 = 1.0;
    pub const KIND_POINTS: f32 = 2.0;

    pub const FLAG_CAST_SHADOW: u32 = 1;
    pub const FLAG_RECEIVE_SHADOW: u32 = 2;
}

impl Default for RenderInstance {
    fn default() -> Self {
        Self {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            r: 1.0,
            g: 1.0,
            b: 1.0,
            opacity: 1.0,
            size: 1.0,
            kind: Self::KIND_BASIC,
            user_data: -1.0,
            flags: 0.0,
            first_point: 0.0,
            point_count: 0.0,
            segments: 0.0,
            _pad: 0.0,
        }
    }
}

/// Render buffer rebuilt every frame: mesh/point-cloud instances plus the
/// concatenated vertices of all visible point clouds.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    pub points: Vec<PointVertex>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64, 4096)
    }

    pub fn with_capacity(instances: usize, points: usize) -> Self {
        Self {
            instances: Vec::with_capacity(instances),
            points: Vec::with_capacity(points),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.points.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
