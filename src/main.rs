//! Pixel Pop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use pixel_pop::consts::{SURFACE_HEIGHT, SURFACE_WIDTH};
    use pixel_pop::persistence::LocalStore;
    use pixel_pop::platform::{self, BrowserConfirm};
    use pixel_pop::renderer::text::TextLayer;
    use pixel_pop::renderer::{RenderState, WebSurface};
    use pixel_pop::sim::PointerClick;
    use pixel_pop::Game;

    /// Everything the frame callback and event listeners share
    struct App {
        game: Game<LocalStore>,
        surface: WebSurface,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pixel Pop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let text_canvas: HtmlCanvasElement = document
            .get_element_by_id("textCanvas")
            .expect("no text canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = SURFACE_WIDTH as u32;
        let height = SURFACE_HEIGHT as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let Some(text) = TextLayer::new(&text_canvas) else {
            log::error!("2D canvas context unavailable");
            return;
        };

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, LocalStore::new()),
            surface: WebSurface::new(render_state, text),
        }));

        // Clicks land on the text layer, which sits on top
        setup_input_handlers(&text_canvas, app.clone());
        setup_focus_handlers(app.clone());

        request_animation_frame(app);

        log::info!("Pixel Pop running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let click = PointerClick::new(
                event.client_x() as f32 - rect.left() as f32,
                event.client_y() as f32 - rect.top() as f32,
                rect.width() as f32,
                rect.height() as f32,
            );
            platform::try_dispatch(&app, |app| {
                app.game.click(click, platform::now_ms(), &mut BrowserConfirm)
            });
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                platform::try_dispatch(&app, |app| app.game.focus_lost());
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let resumed = platform::try_dispatch(&app, |app| {
                    app.game.focus_gained(platform::now_ms())
                });
                if resumed == Some(true) {
                    log::info!("Resumed (window focus)");
                }
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        platform::try_dispatch(&app, |app| {
            let App { game, surface } = app;
            game.frame(time, surface);
            surface.present();
        });

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Pop (native) starting...");
    log::info!("Native mode plays headless demo rounds - run with `trunk serve` for the web version");

    autoplay::run(3);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a bot with limited reaction speed plays until it's overrun
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use pixel_pop::Game;
    use pixel_pop::highscores::format_time;
    use pixel_pop::persistence::FileStore;
    use pixel_pop::renderer::RecordingSurface;
    use pixel_pop::sim::{ClickOutcome, GamePhase, PointerClick};

    /// Simulated frame length (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Bot can click at most this often (ms); slower than the fastest spawn rate
    const BOT_REACTION_MS: f64 = 450.0;
    /// Give up on a round after this much simulated time (ms)
    const ROUND_LIMIT_MS: f64 = 10.0 * 60.0 * 1000.0;

    pub fn run(rounds: u32) {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut game = Game::new(seed, FileStore::beside_executable());
        let mut surface = RecordingSurface::new();
        let mut never = |_: &str| false;
        let mut now = 0.0;

        for round in 1..=rounds {
            game.click(PointerClick::at_surface(320.0, 300.0), now, &mut never);
            let started = now;
            let mut last_click = now;

            while game.state.phase == GamePhase::Playing && now - started < ROUND_LIMIT_MS {
                now += FRAME_MS;
                game.frame(now, &mut surface);

                if now - last_click >= BOT_REACTION_MS {
                    if let Some(click) = lowest_pixel(&game) {
                        last_click = now;
                        if let ClickOutcome::Hit { points } = game.click(click, now, &mut never) {
                            log::debug!("Bot scored {points}");
                        }
                    }
                }
            }

            println!(
                "Round {round}: {} points in {} (level {})",
                game.state.score,
                format_time(game.state.elapsed_secs),
                game.state.level
            );

            // Sit on the game over screen until a restart is accepted
            while game.state.phase == GamePhase::GameOver {
                now += FRAME_MS;
                game.frame(now, &mut surface);
                game.click(PointerClick::at_surface(320.0, 300.0), now, &mut never);
            }
        }

        println!("\nTOP SCORES");
        for (i, entry) in game.high_scores.entries().iter().enumerate() {
            println!(
                "{}. {:>6}  {:>5}  {}",
                i + 1,
                entry.score,
                format_time(entry.elapsed_secs),
                entry.recorded_at
            );
        }
    }

    /// Click aimed at the center of the lowest falling pixel
    fn lowest_pixel<S: pixel_pop::persistence::KeyValueStore>(
        game: &Game<S>,
    ) -> Option<PointerClick> {
        let cell = pixel_pop::cell_size();
        game.state
            .pixels
            .iter()
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|p| {
                PointerClick::at_surface(
                    p.x as f32 * cell.x + cell.x / 2.0,
                    p.y.round() * cell.y + cell.y / 2.0,
                )
            })
    }
}
