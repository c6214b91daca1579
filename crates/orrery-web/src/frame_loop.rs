use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::surface::StartupError;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct LoopState {
    request_id: Cell<Option<i32>>,
    stopped: Cell<bool>,
    callback: RefCell<Option<FrameCallback>>,
}

impl LoopState {
    fn request_next(&self) -> bool {
        let Some(window) = web_sys::window() else { return false };
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else { return false };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => {
                self.request_id.set(Some(id));
                true
            }
            Err(err) => {
                log::error!("frame loop: requestAnimationFrame failed: {:?}", err);
                false
            }
        }
    }
}

/// Drives a callback from `requestAnimationFrame` until stopped.
pub struct FrameLoop;

impl FrameLoop {
    /// Start calling `on_frame` with the rAF timestamp (milliseconds) once per display frame.
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<StopHandle, StartupError> {
        web_sys::window().ok_or(StartupError::NoWindow)?;

        let state = Rc::new(LoopState {
            request_id: Cell::new(None),
            stopped: Cell::new(false),
            callback: RefCell::new(None),
        });

        let weak = Rc::downgrade(&state);
        let callback = Closure::wrap(Box::new(move |now: f64| {
            let Some(state) = weak.upgrade() else { return };
            state.request_id.set(None);
            if state.stopped.get() {
                return;
            }
            on_frame(now);
            if !state.stopped.get() {
                state.request_next();
            }
        }) as Box<dyn FnMut(f64)>);

        *state.callback.borrow_mut() = Some(callback);
        if !state.request_next() {
            return Err(StartupError::NoWindow);
        }
        Ok(StopHandle { state })
    }
}

/// Owns a running frame loop. Stopping cancels the pending frame; dropping stops too.
pub struct StopHandle {
    state: Rc<LoopState>,
}

impl StopHandle {
    pub fn stop(&self) {
        if self.state.stopped.replace(true) {
            return;
        }
        if let (Some(id), Some(window)) = (self.state.request_id.take(), web_sys::window()) {
            if let Err(err) = window.cancel_animation_frame(id) {
                log::warn!("frame loop: cancelAnimationFrame failed: {:?}", err);
            }
        }
        log::info!("frame loop: stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.state.stopped.get()
    }
}

impl Drop for StopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
