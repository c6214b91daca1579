use glam::{Vec2, Vec3};
use super::camera::PerspectiveCamera;

/// A half-line used for picking. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from the camera through a point given in normalized device coordinates.
    pub fn from_ndc(camera: &PerspectiveCamera, ndc: Vec2) -> Self {
        let inverse = camera.view_projection().inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Self::new(camera.position, through - camera.position)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the nearest intersection with a sphere in
    /// front of the origin. A ray starting inside the sphere hits its far side.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        if radius <= 0.0 || self.direction == Vec3::ZERO {
            return None;
        }
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}
