pub mod api;
pub mod bridge;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::app::{App, AppConfig, EngineContext};
pub use api::types::{NodeId, UiEvent};
pub use bridge::protocol::ProtocolLayout;
pub use components::mesh::{Color, Material, MeshComponent, Shape};
pub use components::node::Node;
pub use components::points::{PointCloud, PointVertex};
pub use core::scene::Scene;
pub use core::time::DeltaClock;
pub use error::EngineError;
pub use extensions::{LocalTransform, TransformGraph};
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use renderer::camera::{CameraUniform, PerspectiveCamera, Viewport};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use renderer::ray::Ray;
pub use renderer::traits::{FrameData, RenderSettings, Renderer};
pub use systems::lighting::{Light, LightKind, LightRecord, LightState};
pub use systems::picking::{pick, PickHit};
pub use systems::rng::Rng;
