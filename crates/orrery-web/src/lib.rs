pub mod frame_loop;
pub mod runner;
pub mod shared;
pub mod surface;

pub use frame_loop::{FrameLoop, StopHandle};
pub use runner::AppRunner;
pub use shared::SharedBufferRenderer;
pub use surface::{probe_canvas, StartupError};

/// Generate all `#[wasm_bindgen]` exports for an app.
///
/// Generates:
/// - `thread_local!` storage for the AppRunner and the frame loop handle
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (lifecycle, input handlers, frame buffer accessors, queries)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyApp;
///
/// orrery_web::export_app!(MyApp, "my-app");
/// ```
///
/// The caller's crate must depend on `wasm-bindgen`, `log`, `console_log`
/// and `console_error_panic_hook`.
#[macro_export]
macro_rules! export_app {
    ($app_type:ty, $app_name:literal) => {
        use std::cell::RefCell;
        use $crate::orrery_engine::{InputEvent, PointerButton};

        type AppRunnerFor = $crate::AppRunner<$app_type, $crate::SharedBufferRenderer>;

        thread_local! {
            static RUNNER: RefCell<Option<AppRunnerFor>> = RefCell::new(None);
            static FRAME_LOOP: RefCell<Option<$crate::StopHandle>> = RefCell::new(None);
        }

        /// Run `f` against the runner; `None` before `app_init` succeeded.
        fn with_runner<R>(f: impl FnOnce(&mut AppRunnerFor) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        /// Build the app, probe the drawing surface and build the scene.
        /// `config_json` optionally overrides engine settings.
        #[wasm_bindgen]
        pub fn app_init(element_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let viewport = $crate::probe_canvas(element_id)?;
            let mut runner = $crate::AppRunner::new(<$app_type>::new(), $crate::SharedBufferRenderer::new());
            if let Some(json) = config_json {
                runner.configure_json(&json).map_err($crate::StartupError::from)?;
            }
            runner.init(viewport).map_err($crate::StartupError::from)?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $app_name);
            Ok(())
        }

        /// Start (or resume) the requestAnimationFrame loop.
        #[wasm_bindgen]
        pub fn app_start() -> Result<(), JsValue> {
            if with_runner(|r| r.resume()).is_none() {
                return Err(JsValue::from_str("app_start called before app_init"));
            }
            let running = FRAME_LOOP.with(|cell| cell.borrow().as_ref().is_some_and(|h| !h.is_stopped()));
            if running {
                return Ok(());
            }
            let handle = $crate::FrameLoop::start(|now| {
                with_runner(|r| r.frame(now));
            })?;
            FRAME_LOOP.with(|cell| {
                *cell.borrow_mut() = Some(handle);
            });
            Ok(())
        }

        /// Cancel the frame loop and halt the runner.
        #[wasm_bindgen]
        pub fn app_stop() {
            if let Some(handle) = FRAME_LOOP.with(|cell| cell.borrow_mut().take()) {
                handle.stop();
            }
            with_runner(|r| r.stop());
        }

        /// Drive one frame manually with a delta in seconds (hosts with their own loop).
        #[wasm_bindgen]
        pub fn app_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn app_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn app_visibility(visible: bool) {
            with_runner(|r| r.set_visible(visible));
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn app_pointer_down(x: f32, y: f32, button: i32) {
            let button = PointerButton::from_dom(button);
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn app_pointer_up(x: f32, y: f32, button: i32) {
            let button = PointerButton::from_dom(button);
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn app_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn app_pointer_leave() {
            with_runner(|r| r.push_input(InputEvent::PointerLeave));
        }

        /// Returns true when the event was consumed and the page should not scroll.
        #[wasm_bindgen]
        pub fn app_wheel(delta_y: f32) -> bool {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y })).is_some()
        }

        #[wasm_bindgen]
        pub fn app_touch_start(x: f32, y: f32, touches: u32) {
            with_runner(|r| r.push_input(InputEvent::TouchStart { x, y, touches }));
        }

        #[wasm_bindgen]
        pub fn app_touch_move(x: f32, y: f32, touches: u32) {
            with_runner(|r| r.push_input(InputEvent::TouchMove { x, y, touches }));
        }

        #[wasm_bindgen]
        pub fn app_touch_end(touches: u32) {
            with_runner(|r| r.push_input(InputEvent::TouchEnd { touches }));
        }

        #[wasm_bindgen]
        pub fn app_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.renderer().ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> u32 {
            with_runner(|r| r.renderer().len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_ui_events_ptr() -> *const f32 {
            with_runner(|r| r.ui_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_ui_events_len() -> u32 {
            with_runner(|r| r.ui_events_len()).unwrap_or(0)
        }

        /// Named read-only query answered by the app, usually JSON.
        #[wasm_bindgen]
        pub fn app_query(name: &str) -> Option<String> {
            with_runner(|r| r.query(name)).flatten()
        }
    };
}

#[doc(hidden)]
pub use orrery_engine;
