//! Core engine implementation

use crate::{
    application::{AppEvent, Application},
    config::ConfigError,
    core::RuntimeConfig,
    foundation::{logging, math::Vec3, time::FrameClock},
    input::{InputManager, InputState},
    physics::{CameraBody, ResolveReport, VelocityIntegrator},
    render::{Camera, RenderView},
    scene::{Scene, SceneError},
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the camera, the active scene and the frame clock, and runs one frame
/// strictly in order: input, look, velocity integration, collision
/// resolution, render hand-off.
#[derive(Debug)]
pub struct Engine {
    /// Input handling system
    pub input: InputManager,

    config: RuntimeConfig,
    camera: Camera,
    scene: Scene,
    integrator: VelocityIntegrator,
    input_state: InputState,
    clock: FrameClock,
    last_report: Option<ResolveReport>,
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: RuntimeConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        let body = CameraBody::standing_at(
            Vec3::new(0.0, config.movement.ground_y, 0.0),
            config.movement.eye_height,
            config.collision.body_half_extents,
        );

        Ok(Self {
            input: InputManager::new(),
            camera: Camera::new(body, config.camera.clone()),
            scene: Scene::new(config.collision.clone())?,
            integrator: VelocityIntegrator::new(config.movement.clone()),
            input_state: InputState::default(),
            clock: FrameClock::from_timestep(config.engine.fixed_timestep),
            last_report: None,
            running: true,
            config,
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: RuntimeConfig, app: &mut T) -> Result<(), EngineError> {
        logging::init_with_level(&config.engine.log_level);
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::Application(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.running {
            let delta_time = engine.clock.tick();

            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::Application(format!("App update: {}", e)))?;

            let view = engine.step(delta_time);

            app.render(&mut engine, &view)
                .map_err(|e| EngineError::Application(format!("App render: {}", e)))?;

            if let Some(max_frames) = engine.config.engine.max_frames {
                if engine.clock.frame_count() >= max_frames {
                    log::info!("Reached frame limit of {}", max_frames);
                    engine.running = false;
                }
            }
        }

        app.cleanup(&mut engine);
        engine.scene.teardown();

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} average fps)",
            engine.clock.frame_count(),
            engine.clock.average_fps()
        );
        Ok(())
    }

    /// Advance one frame and return the committed view.
    ///
    /// A non-positive `dt` still applies look input but moves nothing.
    pub fn step(&mut self, dt: f32) -> RenderView {
        let snapshot = self.input.snapshot();
        self.input_state.advance(snapshot);
        if snapshot.exit_requested && self.running {
            log::info!("Exit requested");
            self.running = false;
        }

        self.camera.apply_look(snapshot.mouse_delta);

        let basis = self.camera.move_basis();
        self.integrator.integrate(self.camera.body_mut(), &basis, &self.input_state, dt);

        if let Some(report) = self.scene.update(self.camera.body_mut(), dt) {
            self.last_report = Some(report);
        }

        self.camera.render_view()
    }

    /// Replace the active scene and place the camera's feet at `spawn`
    pub fn enter_scene(&mut self, scene: Scene, spawn: Vec3) {
        self.scene.teardown();
        self.scene = scene;
        self.teleport(spawn);
    }

    /// Move the camera's feet to `spawn`, at rest, with no frame history
    pub fn teleport(&mut self, spawn: Vec3) {
        self.camera.body_mut().place_at(spawn);
        self.input_state = InputState::default();
        self.last_report = None;
        self.scene.enter();
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WindowCloseRequested => {
                self.quit();
            }
            AppEvent::KeyInput { key, pressed } => {
                self.input.handle_key_input(key, pressed);
            }
            AppEvent::MouseMoved { x, y } => {
                self.input.handle_mouse_move(x, y);
            }
            AppEvent::WindowResized { width, height } => {
                if width > 0 && height > 0 {
                    #[allow(clippy::cast_precision_loss)]
                    self.camera.set_aspect_ratio(width as f32 / height as f32);
                }
            }
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the frame loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// First-person camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable first-person camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Active scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable active scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Input of the current and previous frame
    pub fn input_state(&self) -> &InputState {
        &self.input_state
    }

    /// Resolver report of the most recent resolved frame
    pub fn last_report(&self) -> Option<&ResolveReport> {
        self.last_report.as_ref()
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.clock.delta_time()
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration failed to load or validate
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Scene operation failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Application error
    #[error("Application error: {0}")]
    Application(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::core::EngineConfig;
    use crate::input::KeyCode;
    use crate::scene::Geometry;
    use approx::assert_relative_eq;

    fn fixed_config(frames: u64) -> RuntimeConfig {
        RuntimeConfig {
            engine: EngineConfig::new()
                .with_log_level("warn")
                .with_fixed_timestep(1.0 / 60.0)
                .with_max_frames(frames),
            ..RuntimeConfig::default()
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = RuntimeConfig::default();
        config.movement.gravity = 5.0;
        assert!(matches!(Engine::new(config), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_step_walks_forward_on_flat_ground() {
        let mut engine = Engine::new(RuntimeConfig::default()).unwrap();
        engine.handle_event(AppEvent::KeyInput { key: KeyCode::W, pressed: true });

        let mut view = engine.step(1.0 / 60.0);
        for _ in 0..59 {
            view = engine.step(1.0 / 60.0);
        }

        // Default yaw looks down -Z
        assert!(view.eye.z < -3.0);
        assert_relative_eq!(view.eye.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(view.eye.y, 1.7, epsilon = 1e-5);
        assert!(engine.camera().body().is_grounded());
    }

    #[test]
    fn test_step_resolves_against_scene() {
        let mut engine = Engine::new(RuntimeConfig::default()).unwrap();
        let mut scene = Scene::default();
        scene.add_object("crate", Geometry::Block {
            center: Vec3::new(0.0, 0.5, 0.0),
            size: Vec3::new(2.0, 1.0, 2.0),
        });
        engine.enter_scene(scene, Vec3::new(0.0, 2.0, 0.0));

        for _ in 0..120 {
            engine.step(1.0 / 60.0);
        }

        let body = engine.camera().body();
        assert_relative_eq!(body.feet_y(), 1.0, epsilon = 1e-4);
        assert!(body.is_grounded());
        assert_eq!(engine.last_report().and_then(|r| r.support_y), Some(1.0));
    }

    #[test]
    fn test_entering_a_scene_clears_old_support() {
        let mut engine = Engine::new(RuntimeConfig::default()).unwrap();
        let mut scene = Scene::default();
        scene.add_object("crate", Geometry::cube(Vec3::new(0.0, 0.5, 0.0), 1.0));
        engine.enter_scene(scene, Vec3::new(0.0, 1.0, 0.0));
        engine.step(1.0 / 60.0);
        assert_eq!(engine.camera().body().support_y(), Some(1.0));

        engine.enter_scene(Scene::default(), Vec3::new(5.0, 0.0, 5.0));

        let body = engine.camera().body();
        assert_eq!(body.support_y(), None);
        assert!(!body.is_grounded());
        assert_eq!(body.velocity(), Vec3::zeros());
        assert!(engine.last_report().is_none());
    }

    #[test]
    fn test_escape_stops_engine() {
        let mut engine = Engine::new(RuntimeConfig::default()).unwrap();
        engine.handle_event(AppEvent::KeyInput { key: KeyCode::Escape, pressed: true });
        engine.step(1.0 / 60.0);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut engine = Engine::new(RuntimeConfig::default()).unwrap();
        engine.handle_event(AppEvent::WindowResized { width: 1920, height: 1080 });
        assert_relative_eq!(engine.camera().aspect_ratio(), 16.0 / 9.0, epsilon = 1e-6);

        engine.handle_event(AppEvent::WindowResized { width: 0, height: 0 });
        assert_relative_eq!(engine.camera().aspect_ratio(), 16.0 / 9.0, epsilon = 1e-6);
    }

    struct CountingApp {
        updates: u32,
        renders: u32,
        cleaned_up: bool,
    }

    impl Application for CountingApp {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            let mut scene = Scene::default();
            scene.add_object("cube", Geometry::cube(Vec3::new(5.0, 0.5, 0.0), 1.0));
            engine.enter_scene(scene, Vec3::zeros());
            Ok(())
        }

        fn update(&mut self, _engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
            assert_relative_eq!(delta_time, 1.0 / 60.0);
            self.updates += 1;
            Ok(())
        }

        fn render(&mut self, _engine: &mut Engine, _view: &RenderView) -> Result<(), AppError> {
            self.renders += 1;
            Ok(())
        }

        fn cleanup(&mut self, engine: &mut Engine) {
            assert_eq!(engine.scene().collidable_count(), 1);
            self.cleaned_up = true;
        }
    }

    #[test]
    fn test_run_stops_at_frame_limit() {
        let mut app = CountingApp { updates: 0, renders: 0, cleaned_up: false };
        Engine::run(fixed_config(25), &mut app).unwrap();
        assert_eq!(app.updates, 25);
        assert_eq!(app.renders, 25);
        assert!(app.cleaned_up);
    }

    struct FailingApp;

    impl Application for FailingApp {
        fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
            Ok(())
        }

        fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            Err(AppError::Custom("boom".to_string()))
        }

        fn cleanup(&mut self, _engine: &mut Engine) {}
    }

    #[test]
    fn test_run_propagates_app_errors() {
        let result = Engine::run(fixed_config(10), &mut FailingApp);
        assert!(matches!(result, Err(EngineError::Application(message)) if message.contains("boom")));
    }
}
