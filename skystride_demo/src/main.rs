//! Skystride walkthrough demo
//!
//! Runs the engine headless with a fixed timestep and a scripted pilot: walk
//! up to the cube, look around, jump, strafe into a wall, then switch to the
//! arctic platform. Camera state is logged once a second.
//!
//! Usage: `skystride_demo [config.toml|config.ron]`

mod scenes;

use skystride_engine::prelude::*;
use skystride_engine::foundation::logging;

/// Frames per scripted second
const FPS: u64 = 60;

/// Frame at which the pilot switches to the arctic scene
const ARCTIC_FRAME: u64 = 14 * FPS;

/// One scripted input change
#[derive(Debug, Clone, Copy)]
enum Cue {
    Press(KeyCode),
    Release(KeyCode),
    Look { dx: f64, dy: f64 },
}

/// Demo application driving the engine from a script
struct WalkthroughApp {
    script: Vec<(u64, Cue)>,
    cursor: (f64, f64),
    frame: u64,
}

impl WalkthroughApp {
    fn new() -> Self {
        use Cue::{Look, Press, Release};
        let script = vec![
            (30, Press(KeyCode::W)),
            (150, Release(KeyCode::W)),
            (180, Look { dx: 150.0, dy: 0.0 }),
            (200, Look { dx: -300.0, dy: -40.0 }),
            (220, Look { dx: 150.0, dy: 40.0 }),
            (240, Press(KeyCode::Space)),
            (250, Release(KeyCode::Space)),
            (300, Press(KeyCode::D)),
            (420, Release(KeyCode::D)),
            (480, Press(KeyCode::A)),
            (700, Release(KeyCode::A)),
            (720, Press(KeyCode::Up)),
            (730, Press(KeyCode::Space)),
            (740, Release(KeyCode::Space)),
            (800, Release(KeyCode::Up)),
            (ARCTIC_FRAME + 30, Press(KeyCode::W)),
            (ARCTIC_FRAME + 60, Press(KeyCode::Space)),
            (ARCTIC_FRAME + 70, Release(KeyCode::Space)),
            (ARCTIC_FRAME + 200, Release(KeyCode::W)),
            (ARCTIC_FRAME + 260, Press(KeyCode::Escape)),
        ];

        Self {
            script,
            cursor: (400.0, 300.0),
            frame: 0,
        }
    }

    fn play(&mut self, engine: &mut Engine, cue: Cue) -> Result<(), AppError> {
        let event = match cue {
            Cue::Press(key) => AppEvent::KeyInput { key, pressed: true },
            Cue::Release(key) => AppEvent::KeyInput { key, pressed: false },
            Cue::Look { dx, dy } => {
                self.cursor.0 += dx;
                self.cursor.1 += dy;
                AppEvent::MouseMoved { x: self.cursor.0, y: self.cursor.1 }
            }
        };
        log::debug!("Frame {}: {:?}", self.frame, cue);
        self.handle_event(engine, event)
    }

    #[allow(clippy::cast_precision_loss)]
    fn log_camera(engine: &Engine) {
        let camera = engine.camera();
        let body = camera.body();
        let support = engine
            .last_report()
            .and_then(|report| report.support_y)
            .map_or_else(|| "none".to_string(), |y| format!("{y:.2}"));

        log::info!(
            "t={:>5.1}s eye=({:>6.2}, {:>5.2}, {:>6.2}) yaw={:>6.1} pitch={:>5.1} grounded={} support={}",
            engine.frame_count() as f32 / FPS as f32,
            body.position.x, body.position.y, body.position.z,
            camera.yaw(), camera.pitch(),
            body.is_grounded(), support
        );
    }
}

impl Application for WalkthroughApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let scene = scenes::template_scene(engine.config().collision.clone())
            .map_err(EngineError::from)?;
        engine.enter_scene(scene, Vec3::new(0.0, 0.0, 3.0));

        // Establish the cursor reference so the first look cue is a real delta
        self.handle_event(engine, AppEvent::MouseMoved { x: self.cursor.0, y: self.cursor.1 })?;
        self.handle_event(engine, AppEvent::WindowResized { width: 800, height: 600 })?;
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        self.frame += 1;

        if self.frame == ARCTIC_FRAME {
            log::info!("Switching to the arctic scene");
            let scene = scenes::arctic_scene(engine.config().collision.clone())
                .map_err(EngineError::from)?;
            engine.enter_scene(scene, Vec3::new(0.0, 4.0, 0.0));
        }

        let due: Vec<Cue> = self
            .script
            .iter()
            .filter(|(frame, _)| *frame == self.frame)
            .map(|(_, cue)| *cue)
            .collect();
        for cue in due {
            self.play(engine, cue)?;
        }
        Ok(())
    }

    fn render(&mut self, engine: &mut Engine, _view: &RenderView) -> Result<(), AppError> {
        if self.frame % FPS == 0 {
            Self::log_camera(engine);
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!("Walkthrough finished after {} frames", engine.frame_count());
        Self::log_camera(engine);
    }
}

#[allow(clippy::cast_precision_loss)]
fn load_config() -> Result<RuntimeConfig, AppError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(RuntimeConfig::load_from_file(&path)?),
        None => {
            let mut config = RuntimeConfig::default();
            config.engine = EngineConfig::new()
                .with_fixed_timestep(1.0 / FPS as f32)
                .with_max_frames(ARCTIC_FRAME + 6 * FPS);
            Ok(config)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init_with_level(&config.engine.log_level);

    log::info!("Starting Skystride walkthrough");

    let mut app = WalkthroughApp::new();
    Engine::run(config, &mut app)?;

    Ok(())
}
