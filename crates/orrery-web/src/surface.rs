use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use orrery_engine::{EngineError, Viewport};

/// Startup failures reported to the page instead of leaving a blank canvas.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no browser window available")]
    NoWindow,
    #[error("element #{0} not found")]
    ElementNotFound(String),
    #[error("WebGL is not available in this browser")]
    ContextUnavailable,
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl From<StartupError> for JsValue {
    fn from(err: StartupError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Measure the host element and check that WebGL can be created at all.
///
/// The probe runs on a detached scratch canvas so the page's renderer still
/// gets to create its own context with its own attributes.
pub fn probe_canvas(element_id: &str) -> Result<Viewport, StartupError> {
    let window = web_sys::window().ok_or(StartupError::NoWindow)?;
    let document = window.document().ok_or(StartupError::NoWindow)?;
    let element = document
        .get_element_by_id(element_id)
        .ok_or_else(|| StartupError::ElementNotFound(element_id.to_string()))?;

    let scratch = document
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .ok_or(StartupError::ContextUnavailable)?;
    let has_webgl = ["webgl2", "webgl"]
        .iter()
        .any(|kind| matches!(scratch.get_context(kind), Ok(Some(_))));
    if !has_webgl {
        return Err(StartupError::ContextUnavailable);
    }

    let mut width = element.client_width() as f32;
    let mut height = element.client_height() as f32;
    if width <= 0.0 || height <= 0.0 {
        // Not laid out yet: fall back to the window, like a full-page canvas.
        width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    }

    let viewport = Viewport::new(width, height);
    if !viewport.is_valid() {
        return Err(EngineError::InvalidViewport { width, height }.into());
    }
    log::info!("surface: #{} is {}x{}", element_id, width, height);
    Ok(viewport)
}
