use orrery_engine::{
    App, AppConfig, EngineContext, EngineError,
    InputEvent, InputQueue, RenderBuffer,
    DeltaClock, FrameData, Renderer, Viewport, UiEvent,
};
use orrery_engine::core::time::sanitize_delta;
use orrery_engine::systems::render::build_render_buffer;

/// Generic app runner that wires up the engine loop.
///
/// Each concrete app keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]` (see `export_app!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct AppRunner<A: App, R: Renderer> {
    app: A,
    renderer: R,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    clock: DeltaClock,
    config: AppConfig,
    initialized: bool,
    running: bool,
    frame: u64,
}

impl<A: App, R: Renderer> AppRunner<A, R> {
    pub fn new(app: A, renderer: R) -> Self {
        let config = app.config();
        let render_buffer = RenderBuffer::with_capacity(config.max_instances, config.max_points);

        Self {
            app,
            renderer,
            ctx: EngineContext::with_config(&config, Viewport::default()),
            input: InputQueue::new(),
            render_buffer,
            clock: DeltaClock::new(),
            config,
            initialized: false,
            running: false,
            frame: 0,
        }
    }

    /// Layer a host-supplied JSON object over the app's config. Only valid before `init`.
    pub fn configure_json(&mut self, json: &str) -> Result<(), EngineError> {
        if self.initialized {
            return Err(EngineError::InvalidConfig("config override after init".into()));
        }
        self.config = self.config.merged_with_json(json)?;
        Ok(())
    }

    /// Validate the config, size the renderer and let the app build its scene.
    pub fn init(&mut self, viewport: Viewport) -> Result<(), EngineError> {
        if !viewport.is_valid() {
            return Err(EngineError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.config.validate()?;

        self.ctx = EngineContext::with_config(&self.config, viewport);
        self.render_buffer = RenderBuffer::with_capacity(self.config.max_instances, self.config.max_points);
        self.renderer.prepare(&self.config);
        self.renderer.resize(viewport);

        self.app.init(&mut self.ctx)?;
        self.ctx.propagate();

        self.clock.reset();
        self.initialized = true;
        self.running = true;
        log::info!(
            "runner: {} nodes, {} lights, {}x{} via {}",
            self.ctx.scene.len(),
            self.ctx.lights.count(),
            viewport.width,
            viewport.height,
            self.renderer.backend()
        );
        Ok(())
    }

    /// Queue an input event for the next tick. Events arriving before `init`
    /// or while stopped are dropped, so nothing stale replays on resume.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.initialized || !self.running {
            return;
        }
        self.input.push(event);
    }

    /// Track a new surface size. Repeating the current size is a no-op, so
    /// resize storms never disturb scene state.
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            log::warn!("runner: ignoring resize to {}x{}", width, height);
            return;
        }
        if viewport == self.ctx.viewport {
            return;
        }
        self.ctx.resize(viewport);
        self.renderer.resize(viewport);
        self.push_input(InputEvent::Resize { width, height });
    }

    /// Page visibility changed. Becoming visible restarts the clock so the
    /// hidden interval is not replayed as one huge step.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.clock.reset();
        }
        self.push_input(InputEvent::Visibility { visible });
    }

    /// Run one frame from a host timestamp in milliseconds.
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.delta(now_ms);
        self.tick(dt);
    }

    /// Run one frame with an explicit delta in seconds.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized || !self.running {
            return;
        }
        let dt = sanitize_delta(dt);

        self.ctx.clear_frame_data();
        self.app.update(&mut self.ctx, &self.input, dt);
        self.input.drain();

        self.ctx.propagate();
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);

        let frame = FrameData {
            frame: self.frame,
            viewport: self.ctx.viewport,
            camera: self.ctx.camera.uniform(),
            settings: self.ctx.settings,
            instances: &self.render_buffer.instances,
            points: &self.render_buffer.points,
            lights: self.ctx.lights.records(),
            events: &self.ctx.events,
        };
        self.renderer.draw(&frame);
        self.frame += 1;
    }

    /// Stop ticking. Frames arriving afterwards are ignored.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("runner: stopped after {} frames", self.frame);
        }
        self.running = false;
        self.input.drain();
    }

    /// Resume after `stop`. The first frame afterwards advances by zero.
    pub fn resume(&mut self) {
        if self.initialized && !self.running {
            self.clock.reset();
            self.input.drain();
            self.running = true;
            log::info!("runner: resumed");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn query(&self, name: &str) -> Option<String> {
        self.app.query(name)
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    // ---- Pointer accessors for direct buffer reads ----

    pub fn ui_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn ui_events_len(&self) -> u32 {
        (self.ctx.events.len() * UiEvent::FLOATS) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{Color, LocalTransform, MeshComponent, Node};

    #[derive(Default)]
    struct Spinner {
        elapsed: Vec<f32>,
        seen: Vec<InputEvent>,
        fail_init: bool,
    }

    impl App for Spinner {
        fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
            if self.fail_init {
                return Err(EngineError::InvalidConfig("no catalog".into()));
            }
            let id = ctx.next_id();
            ctx.spawn(
                Node::new(id).with_mesh(MeshComponent::sphere(1.0, 8, Color::WHITE)),
                LocalTransform::new(),
                None,
            );
            Ok(())
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, elapsed: f32) {
            self.seen.extend(input.iter().copied());
            self.elapsed.push(elapsed);
            ctx.emit_event(UiEvent::new(1, elapsed, 0.0, 0.0));
        }

        fn query(&self, name: &str) -> Option<String> {
            (name == "frames").then(|| self.elapsed.len().to_string())
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(u64, usize, usize)>,
        resizes: Vec<Viewport>,
        prepared: bool,
    }

    impl Renderer for Recorder {
        fn backend(&self) -> &'static str {
            "recorder"
        }

        fn prepare(&mut self, _config: &AppConfig) {
            self.prepared = true;
        }

        fn draw(&mut self, frame: &FrameData) {
            self.frames.push((frame.frame, frame.instances.len(), frame.events.len()));
        }

        fn resize(&mut self, viewport: Viewport) {
            self.resizes.push(viewport);
        }
    }

    fn started() -> AppRunner<Spinner, Recorder> {
        let mut runner = AppRunner::new(Spinner::default(), Recorder::default());
        runner.init(Viewport::new(800.0, 600.0)).unwrap();
        runner
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = AppRunner::new(Spinner::default(), Recorder::default());
        runner.tick(0.016);
        assert!(runner.renderer().frames.is_empty());
    }

    #[test]
    fn init_rejects_zero_viewport() {
        let mut runner = AppRunner::new(Spinner::default(), Recorder::default());
        let err = runner.init(Viewport::new(0.0, 600.0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidViewport { .. }));
        assert!(!runner.is_running());
    }

    #[test]
    fn init_surfaces_app_errors() {
        let app = Spinner { fail_init: true, ..Default::default() };
        let mut runner = AppRunner::new(app, Recorder::default());
        assert!(runner.init(Viewport::new(800.0, 600.0)).is_err());
        runner.tick(0.016);
        assert!(runner.renderer().frames.is_empty());
    }

    #[test]
    fn frames_are_drawn_with_instances_and_events() {
        let mut runner = started();
        assert!(runner.renderer().prepared);
        runner.tick(0.016);
        runner.tick(0.016);
        assert_eq!(runner.renderer().frames, vec![(0, 1, 1), (1, 1, 1)]);
        assert_eq!(runner.ui_events_len(), 4);
    }

    #[test]
    fn frame_timestamps_become_deltas() {
        let mut runner = started();
        runner.frame(1000.0);
        runner.frame(1016.0);
        let elapsed = &runner.app().elapsed;
        assert_eq!(elapsed[0], 0.0);
        assert!((elapsed[1] - 0.016).abs() < 1e-6);
    }

    #[test]
    fn becoming_visible_skips_the_hidden_interval() {
        let mut runner = started();
        runner.frame(0.0);
        runner.frame(16.0);
        runner.set_visible(false);
        runner.set_visible(true);
        runner.frame(90_000.0);
        assert_eq!(*runner.app().elapsed.last().unwrap(), 0.0);
    }

    #[test]
    fn bad_deltas_are_sanitized() {
        let mut runner = started();
        runner.tick(f32::NAN);
        runner.tick(-1.0);
        assert_eq!(runner.app().elapsed, vec![0.0, 0.0]);
    }

    #[test]
    fn input_is_delivered_once_in_order() {
        let mut runner = started();
        runner.push_input(InputEvent::Wheel { delta_y: 1.0 });
        runner.push_input(InputEvent::PointerLeave);
        runner.tick(0.016);
        runner.tick(0.016);
        assert_eq!(
            runner.app().seen,
            vec![InputEvent::Wheel { delta_y: 1.0 }, InputEvent::PointerLeave]
        );
    }

    #[test]
    fn repeated_resize_is_idempotent() {
        let mut runner = started();
        runner.resize(1024.0, 768.0);
        runner.resize(1024.0, 768.0);
        runner.resize(0.0, 768.0);
        runner.tick(0.016);
        let resizes: Vec<_> = runner
            .app()
            .seen
            .iter()
            .filter(|e| matches!(e, InputEvent::Resize { .. }))
            .collect();
        assert_eq!(resizes.len(), 1);
        assert_eq!(runner.context().viewport, Viewport::new(1024.0, 768.0));
        assert_eq!(runner.context().camera.aspect, 1024.0 / 768.0);
    }

    #[test]
    fn stop_halts_frames() {
        let mut runner = started();
        runner.tick(0.016);
        runner.stop();
        runner.tick(0.016);
        assert_eq!(runner.frame_count(), 1);

        runner.resume();
        runner.frame(5_000.0);
        assert_eq!(runner.frame_count(), 2);
        assert_eq!(*runner.app().elapsed.last().unwrap(), 0.0);
    }

    #[test]
    fn input_while_stopped_is_not_replayed() {
        let mut runner = started();
        runner.stop();
        for i in 0..1000 {
            runner.push_input(InputEvent::PointerMove { x: i as f32, y: 0.0 });
        }
        runner.push_input(InputEvent::Wheel { delta_y: -500.0 });
        runner.resize(640.0, 480.0);

        runner.resume();
        runner.tick(0.016);
        assert!(runner.app().seen.is_empty());
        // The surface size still tracks the page while stopped.
        assert_eq!(runner.context().viewport, Viewport::new(640.0, 480.0));

        runner.push_input(InputEvent::PointerLeave);
        runner.tick(0.016);
        assert_eq!(runner.app().seen, vec![InputEvent::PointerLeave]);
    }

    #[test]
    fn input_before_init_is_dropped() {
        let mut runner = AppRunner::new(Spinner::default(), Recorder::default());
        runner.push_input(InputEvent::PointerLeave);
        runner.init(Viewport::new(800.0, 600.0)).unwrap();
        runner.tick(0.016);
        assert!(runner.app().seen.is_empty());
    }

    #[test]
    fn config_override_only_before_init() {
        let mut runner = AppRunner::new(Spinner::default(), Recorder::default());
        runner.configure_json(r#"{ "fov_deg": 50 }"#).unwrap();
        runner.init(Viewport::new(800.0, 600.0)).unwrap();
        assert_eq!(runner.context().camera.fov_deg, 50.0);
        assert!(runner.configure_json("{}").is_err());
    }

    #[test]
    fn queries_reach_the_app() {
        let mut runner = started();
        runner.tick(0.016);
        assert_eq!(runner.query("frames").as_deref(), Some("1"));
        assert_eq!(runner.query("nope"), None);
    }
}
