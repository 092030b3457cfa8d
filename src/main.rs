//! Flappy Shield entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use flappy_shield::{Settings, hud};
    use flappy_shield::audio::{AudioManager, SoundEffect};
    use flappy_shield::renderer::{RenderState, scene};
    use flappy_shield::sim::{GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        /// Latched until the next frame's tick
        input: TickInput,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                state: GameState::with_tuning(seed, settings.tuning.clone()),
                audio: AudioManager::new(settings.effective_volume()),
                settings,
                render_state: None,
                input: TickInput::default(),
            }
        }

        /// One simulation step per animation frame
        fn update(&mut self) {
            let input = self.input.clone();
            tick(&mut self.state, &input);

            // Clear one-shot inputs after processing
            self.input = TickInput {
                autopilot: self.input.autopilot,
                ..TickInput::default()
            };

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
            }
        }

        /// Click, tap or space: flap, or leave whichever screen is up
        fn primary_action(&mut self) {
            self.audio.resume();
            match self.state.phase {
                GamePhase::NotStarted => self.input.start = true,
                GamePhase::Playing => self.input.jump = true,
                GamePhase::GameOver => self.input.restart = true,
                GamePhase::Paused => {}
            }
        }

        fn toggle_pause(&mut self) {
            match self.state.phase {
                GamePhase::Playing => self.input.pause = true,
                GamePhase::Paused => self.input.resume = true,
                _ => {}
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene::build(&self.state, self.settings.show_hitboxes);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.query_selector("#hud-points .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.points.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-shields .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud::shield_text(self.state.shield)));
            }

            for (id, shown) in hud::visibility(&self.state, self.input.autopilot) {
                if let Some(el) = document.get_element_by_id(id) {
                    set_visible(&el, shown);
                }
            }

            if let (Some(el), Some(score)) = (
                document.get_element_by_id("final-score"),
                self.state.final_score,
            ) {
                el.set_text_content(Some(&score.to_string()));
            }
        }
    }

    /// Toggle only the `hidden` class; layout classes stay
    fn set_visible(el: &web_sys::Element, shown: bool) {
        let _ = el.class_list().toggle_with_force(hud::HIDDEN_CLASS, !shown);
    }

    /// Optional JSON on the canvas' `data-settings` attribute
    fn read_settings(canvas: &HtmlCanvasElement) -> Settings {
        let Some(json) = canvas.get_attribute("data-settings") else {
            return Settings::default();
        };
        Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring data-settings: {e}");
            Settings::default()
        })
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flappy Shield starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            set_visible(&loading, false);
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = read_settings(&canvas);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let view_size = (settings.tuning.view_width, settings.tuning.view_height);
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, view_size)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        if let Some(hud_el) = document.get_element_by_id("hud") {
            set_visible(&hud_el, true);
        }

        request_animation_frame(game);

        log::info!("Flappy Shield running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Pointer down covers mouse, pen and touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().primary_action();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.primary_action();
                    }
                    "Escape" | "p" | "P" => g.toggle_pause(),
                    "i" | "I" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    /// Wire a button id to an action on the game
    fn on_click(document: &Document, id: &str, game: Rc<RefCell<Game>>, action: fn(&mut Game)) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{id}");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            event.stop_propagation();
            action(&mut game.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "start-btn", game.clone(), |g| {
            g.audio.resume();
            g.input.start = true;
        });
        on_click(document, "pause-btn", game.clone(), |g| g.input.pause = true);
        on_click(document, "resume-btn", game.clone(), |g| g.input.resume = true);
        on_click(document, "retry-btn", game, |g| {
            g.audio.resume();
            g.input.restart = true;
        });
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ticks a headless run may last before it is called off (about ten minutes at 60 fps)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_TICK_LIMIT: u64 = 36_000;

/// Headless demo: the autopilot plays one run and the outcome is logged.
///
/// Usage: `flappy-shield [settings.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use flappy_shield::Settings;
    use flappy_shield::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flappy Shield (native) starting headless autopilot run...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Settings::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Cannot load settings from {path}: {e}");
                return std::process::ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut state = GameState::with_tuning(seed, settings.tuning);

    let start = TickInput {
        start: true,
        autopilot: true,
        ..TickInput::default()
    };
    tick(&mut state, &start);

    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };
    while state.phase == GamePhase::Playing && state.time_ticks < HEADLESS_TICK_LIMIT {
        tick(&mut state, &input);
        for event in state.drain_events() {
            log::trace!("{:?}", event);
        }
    }

    match state.final_score {
        Some(score) => log::info!(
            "Seed {} crashed after {} ticks with {} points",
            seed,
            state.time_ticks,
            score
        ),
        None => log::info!(
            "Seed {} survived {} ticks: {} points, {} shields left",
            seed,
            state.time_ticks,
            state.points,
            state.shield
        ),
    }
    std::process::ExitCode::SUCCESS
}
