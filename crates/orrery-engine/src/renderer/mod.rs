pub mod camera;
pub mod instance;
pub mod ray;
pub mod traits;

pub use traits::{Renderer, FrameData, RenderSettings};
