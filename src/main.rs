//! Block Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use block_breaker::consts::*;
    use block_breaker::renderer::{GpuRenderer, TextItem, hud_html};
    use block_breaker::sim::GameEvent;
    use block_breaker::{FrameDriver, InputEvent, Key, Tuning};

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver,
        renderer: Option<GpuRenderer>,
    }

    impl Game {
        fn new() -> Self {
            Self {
                driver: FrameDriver::new(Tuning::default()),
                renderer: None,
            }
        }

        /// Step, render, update the HUD. Returns whether to keep looping.
        fn frame(&mut self, time: f64) -> bool {
            let Some(renderer) = self.renderer.as_mut() else {
                return false;
            };

            let keep_going = self.driver.frame(time, renderer);
            match renderer.present() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    renderer.resize(renderer.size.0, renderer.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            for event in self.driver.events() {
                match event {
                    GameEvent::LevelCleared { level, .. } => {
                        log::info!("Wave {} cleared", level);
                    }
                    GameEvent::GameOver { score, .. } => {
                        log::info!("Final score: {}", score);
                    }
                    _ => {}
                }
            }

            update_hud(renderer.texts());
            keep_going
        }
    }

    /// Replace the DOM overlay above the canvas with this frame's text
    fn update_hud(texts: &[TextItem]) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("hud") {
            el.set_inner_html(&hud_html(texts));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Block Breaker starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("board")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #board canvas");
            return;
        };

        let width = FIELD_WIDTH as u32;
        let height = FIELD_HEIGHT as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new()));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match GpuRenderer::new(surface, &adapter, width, height).await {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Block Breaker running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "KeyI" {
                    game.borrow_mut().driver.toggle_idle_mode();
                    return;
                }
                let Some(key) = Key::from_code(&event.code()) else {
                    return;
                };
                let restart = game.borrow_mut().driver.handle(InputEvent::KeyDown(key));
                if restart {
                    log::info!("Restarting");
                    request_animation_frame(game.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().driver.handle(InputEvent::KeyUp(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move - absolute x relative to the canvas' left edge
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                game.borrow_mut().driver.handle(InputEvent::PointerMove { x });
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = game.borrow_mut().frame(time);
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use block_breaker::renderer::FrameRecorder;
    use block_breaker::sim::GameEvent;
    use block_breaker::{FrameDriver, Tuning};

    /// Two minutes of play at 60 Hz
    const DEMO_FRAMES: u32 = 60 * 120;

    env_logger::init();
    log::info!("Block Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::error!("Invalid tuning in {}: {}", path, e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("Cannot read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut driver = FrameDriver::new(tuning);
    driver.idle_mode = true;
    let mut recorder = FrameRecorder::new();

    let frame_ms = 1000.0 / block_breaker::consts::REFERENCE_FPS as f64;
    let mut blocks_destroyed = 0u32;
    let mut frames = 0u32;
    while frames < DEMO_FRAMES {
        let running = driver.frame(frames as f64 * frame_ms, &mut recorder);
        frames += 1;
        blocks_destroyed += driver
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::BlockDestroyed { .. }))
            .count() as u32;
        if !running {
            break;
        }
    }

    let state = &driver.state;
    println!(
        "Demo finished after {} frames: score {}, level {}, {} blocks destroyed{}",
        frames,
        state.score,
        state.level,
        blocks_destroyed,
        if state.is_game_over() { " (game over)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
