use bytemuck::{Pod, Zeroable};

/// One vertex of a point cloud, in the owning node's local space.
///
/// Wire format (6 floats / 24 bytes): `[x, y, z, r, g, b]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl PointVertex {
    pub const FLOATS: usize = 6;
}

/// A cloud of screen-sized points (e.g. a star backdrop).
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub vertices: Vec<PointVertex>,
    /// Point size in pixels.
    pub size: f32,
    /// Opacity applied to every point.
    pub opacity: f32,
}

impl PointCloud {
    pub fn new(vertices: Vec<PointVertex>, size: f32, opacity: f32) -> Self {
        Self { vertices, size, opacity }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_vertex_is_6_floats() {
        assert_eq!(std::mem::size_of::<PointVertex>(), PointVertex::FLOATS * 4);
    }
}
