use serde::{Deserialize, Serialize};
use crate::api::types::{NodeId, UiEvent};
use crate::components::node::Node;
use crate::core::scene::Scene;
use crate::error::EngineError;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::input::queue::InputQueue;
use crate::renderer::camera::{PerspectiveCamera, Viewport};
use crate::renderer::traits::RenderSettings;
use crate::systems::lighting::LightState;

/// Engine configuration, provided by the app and optionally overridden by the
/// host with a JSON object at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Vertical field of view in degrees (default: 75).
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Maximum render instances per frame (default: 64).
    pub max_instances: usize,
    /// Maximum point-cloud vertices per frame (default: 4096).
    pub max_points: usize,
    /// Maximum lights (default: 8).
    pub max_lights: usize,
    /// Maximum UI events per frame (default: 32).
    pub max_events: usize,
    /// Whether the renderer should enable shadow maps.
    pub shadows: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            max_instances: 64,
            max_points: 4096,
            max_lights: 8,
            max_events: 32,
            shadows: true,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.fov_deg.is_finite() && self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(EngineError::InvalidConfig(format!("fov_deg {} outside (0, 180)", self.fov_deg)));
        }
        if !(self.near.is_finite() && self.near > 0.0) {
            return Err(EngineError::InvalidConfig(format!("near plane {} must be positive", self.near)));
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(EngineError::InvalidConfig(format!(
                "far plane {} must exceed near plane {}",
                self.far, self.near
            )));
        }
        if self.max_instances == 0 || self.max_events == 0 {
            return Err(EngineError::InvalidConfig("instance and event capacities must be non-zero".into()));
        }
        Ok(())
    }

    /// Apply a JSON object on top of this config. Keys absent from `json`
    /// keep their current values; unknown keys are rejected.
    pub fn merged_with_json(&self, json: &str) -> Result<Self, EngineError> {
        let serde_json::Value::Object(overrides) = serde_json::from_str::<serde_json::Value>(json)? else {
            return Err(EngineError::InvalidConfig("config override must be a JSON object".into()));
        };
        let mut base = serde_json::to_value(self)?;
        if let Some(fields) = base.as_object_mut() {
            fields.extend(overrides);
        }
        let merged: AppConfig = serde_json::from_value(base)?;
        merged.validate()?;
        Ok(merged)
    }
}

/// The core contract every app must fulfill.
pub trait App {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> AppConfig {
        AppConfig::default()
    }

    /// Build the scene. Failing here aborts startup.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError>;

    /// One frame: consume input in order, then advance by `elapsed` seconds.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, elapsed: f32);

    /// Named read-only queries for the host page (e.g. tooltip content as JSON).
    fn query(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Mutable access to engine state, passed to App::init and App::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub camera: PerspectiveCamera,
    pub lights: LightState,
    pub settings: RenderSettings,
    pub viewport: Viewport,
    pub events: Vec<UiEvent>,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&AppConfig::default(), Viewport::default())
    }

    pub fn with_config(config: &AppConfig, viewport: Viewport) -> Self {
        let mut camera = PerspectiveCamera::new(config.fov_deg, 1.0, config.near, config.far);
        camera.set_aspect(viewport.aspect());
        Self {
            scene: Scene::with_capacity(config.max_instances),
            graph: TransformGraph::new(),
            camera,
            lights: LightState::with_capacity(config.max_lights),
            settings: RenderSettings {
                shadows: config.shadows,
                ..Default::default()
            },
            viewport,
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a node into the scene and the transform graph in one go.
    pub fn spawn(&mut self, node: Node, local: LocalTransform, parent: Option<NodeId>) -> NodeId {
        let id = self.scene.spawn(node);
        self.graph.register_with(id, local);
        if parent.is_some() {
            self.graph.set_parent(id, parent);
        }
        id
    }

    /// Queue a UI event for the host. Events past the per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: UiEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("ui event {} dropped: {} events already queued this frame", event.kind(), self.max_events);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Track a new surface size. Invalid sizes are ignored.
    pub fn resize(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            return;
        }
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
    }

    /// Compose the transform graph into node world matrices.
    pub fn propagate(&mut self) {
        self.graph.propagate(&mut self.scene);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
