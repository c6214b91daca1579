/// Scene lights for the host renderer's forward pass.
///
/// Lights are persistent: add them once and they stay until removed.
/// Each frame the engine serializes them into `LightRecord`s.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::Color;

/// Light variant with its kind-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform fill with no direction.
    Ambient,
    /// Omnidirectional light at `position`; `range` 0 means unlimited.
    Point { position: Vec3, range: f32 },
    /// Parallel light shining from `position` toward the origin.
    Directional { position: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub cast_shadow: bool,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self { kind: LightKind::Ambient, color, intensity, cast_shadow: false }
    }

    pub fn point(position: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self { kind: LightKind::Point { position, range }, color, intensity, cast_shadow: false }
    }

    pub fn directional(position: Vec3, color: Color, intensity: f32) -> Self {
        Self { kind: LightKind::Directional { position }, color, intensity, cast_shadow: false }
    }

    pub fn with_shadow(mut self, cast_shadow: bool) -> Self {
        self.cast_shadow = cast_shadow;
        self
    }

    pub fn record(&self) -> LightRecord {
        let (kind, position, range) = match self.kind {
            LightKind::Ambient => (LightRecord::KIND_AMBIENT, Vec3::ZERO, 0.0),
            LightKind::Point { position, range } => (LightRecord::KIND_POINT, position, range),
            LightKind::Directional { position } => (LightRecord::KIND_DIRECTIONAL, position, 0.0),
        };
        LightRecord {
            kind,
            x: position.x,
            y: position.y,
            z: position.z,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            intensity: self.intensity,
            range,
            cast_shadow: if self.cast_shadow { 1.0 } else { 0.0 },
            _pad: [0.0; 2],
        }
    }
}

/// Wire format (12 floats / 48 bytes):
/// `[kind, x, y, z, r, g, b, intensity, range, cast_shadow, pad, pad]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightRecord {
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    pub range: f32,
    pub cast_shadow: f32,
    pub _pad: [f32; 2],
}

impl LightRecord {
    pub const FLOATS: usize = 12;

    pub const KIND_AMBIENT: f32 = 0.0;
    pub const KIND_POINT: f32 = 1.0;
    pub const KIND_DIRECTIONAL: f32 = 2.0;
}

/// Manages the active lights of the scene.
pub struct LightState {
    lights: Vec<Light>,
    records: Vec<LightRecord>,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            records: Vec::with_capacity(max_lights),
        }
    }

    pub fn add(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
        self.records.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Serialize every light and return the wire records.
    pub fn records(&mut self) -> &[LightRecord] {
        self.records.clear();
        self.records.extend(self.lights.iter().map(Light::record));
        &self.records
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
