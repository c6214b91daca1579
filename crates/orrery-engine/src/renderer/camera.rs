use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Drawing surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both sides finite and positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel position (origin top-left, Y down) to normalized device
    /// coordinates (origin center, Y up, [-1, 1]).
    pub fn to_ndc(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            px.x / self.width * 2.0 - 1.0,
            1.0 - px.y / self.height * 2.0,
        )
    }

    /// Inverse of `to_ndc`.
    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// GPU-side uniform data for the camera.
///
/// Wire format (40 floats): view matrix, projection matrix (column-major),
/// `[x, y, z, fov_deg]`, `[aspect, near, far, 0]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub position: [f32; 4],
    pub params: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 40;
}

/// Right-handed perspective camera, Y up, looking down -Z by default.
/// Uses OpenGL clip conventions (NDC z in [-1, 1]).
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_deg,
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        if position.is_finite() && target.is_finite() {
            self.position = position;
            self.target = target;
        }
    }

    /// Ignores degenerate aspects so a zero-sized surface keeps the last good one.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.target - self.position;
        // Looking straight along `up` leaves look_at without a side axis.
        let up = if forward.cross(self.up).length_squared() < 1e-12 {
            Vec3::Z
        } else {
            self.up
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to NDC. `None` when the point is behind the camera.
    pub fn world_to_ndc(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            position: [self.position.x, self.position.y, self.position.z, self.fov_deg],
            params: [self.aspect, self.near, self.far, 0.0],
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, Viewport::default().aspect(), 0.1, 1000.0)
    }
}
