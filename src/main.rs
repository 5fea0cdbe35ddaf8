//! Flappy entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent};

    use flappy::audio::{AudioManager, SoundEffect};
    use flappy::consts::*;
    use flappy::persistence::{KeyValueStore, MemoryStore};
    use flappy::platform::scale::is_desktop_user_agent;
    use flappy::platform::storage::SessionStore;
    use flappy::platform::{FpsCounter, FrameClock, InputState, fit_viewport};
    use flappy::renderer::{RenderState, shapes};
    use flappy::sim::{Game, GamePhase, InputEvent, autopilot};
    use flappy::ui::{Hud, fps_label};
    use flappy::{Settings, Tuning};

    /// Everything the browser frontend owns
    struct Frontend {
        game: Game,
        render_state: Option<RenderState>,
        clock: FrameClock,
        last_time: f64,
        input: InputState,
        audio: AudioManager,
        fps: FpsCounter,
        settings: Settings,
        settings_store: Box<dyn KeyValueStore>,
        /// Demo mode: the autopilot flaps and restarts by itself
        autopilot: bool,
        /// Last HUD pushed to the DOM, to skip redundant writes
        last_hud: Option<Hud>,
    }

    impl Frontend {
        fn new(seed: u64) -> Self {
            let settings_store = open_store();
            let settings = Settings::load(settings_store.as_ref());
            Self {
                game: Game::new(seed, Tuning::default(), open_store()),
                render_state: None,
                clock: FrameClock::new(),
                last_time: 0.0,
                input: InputState::new(),
                audio: AudioManager::new(settings.effective_volume()),
                fps: FpsCounter::default(),
                settings,
                settings_store,
                autopilot: false,
                last_hud: None,
            }
        }

        /// Feed queued input, run simulation ticks, react to events
        fn update(&mut self, dt: f32, time: f64) {
            for event in self.input.drain() {
                self.game.handle_input(event);
            }

            for _ in 0..self.clock.advance(dt) {
                let mut input = self.input.tick_input();
                if self.autopilot {
                    match self.game.phase() {
                        GamePhase::Running => {
                            input.jump = autopilot::wants_jump(&self.game.state, self.game.tuning());
                        }
                        GamePhase::GameOver => self.game.handle_input(InputEvent::JumpPressed),
                        GamePhase::Countdown => {}
                    }
                }
                self.game.tick(&input, SIM_DT);
            }

            // The controller logs its own transitions; only sound is left here
            for event in self.game.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }

            self.fps.record(time);
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = shapes::scene(&self.game.state);
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
        fn update_hud(&mut self, document: &Document) {
            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&fps_label(self.fps.fps())));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            let hud = Hud::from_game(&self.game);
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score));
            }
            if let Some(el) = document.get_element_by_id("high") {
                el.set_text_content(Some(&hud.high));
            }
            if let Some(el) = document.get_element_by_id("countdown") {
                match &hud.countdown {
                    Some(digit) => {
                        let _ = el.set_attribute("class", "");
                        el.set_text_content(Some(digit));
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
            if let Some(el) = document.get_element_by_id("restart-btn") {
                let class = if hud.restart_visible { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            self.last_hud = Some(hud);
        }

        fn save_settings(&mut self) {
            if let Err(e) = self.settings.save(self.settings_store.as_mut()) {
                log::warn!("Failed to save settings: {}", e);
            }
            self.audio.set_volume(self.settings.effective_volume());
        }
    }

    /// Session storage, or an in-memory stand-in when the browser refuses it
    fn open_store() -> Box<dyn KeyValueStore> {
        match SessionStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; high score will not survive a reload", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flappy starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backbuffer at native game resolution; CSS does the scaling
        let dpr = window.device_pixel_ratio();
        let width = (SCREEN_WIDTH as f64 * dpr) as u32;
        let height = (SCREEN_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let container: HtmlElement = document
            .get_element_by_id("game")
            .ok_or("no game container")?
            .dyn_into()?;
        apply_viewport(&window, &container);

        let seed = js_sys::Date::now() as u64;
        let frontend = Rc::new(RefCell::new(Frontend::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
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

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        frontend.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(frontend.clone())?;
        setup_restart_button(&document, frontend.clone())?;
        setup_focus_handlers(&document, frontend.clone())?;
        setup_resize(&container)?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(frontend);

        log::info!("Flappy running!");
        Ok(())
    }

    /// Size and center the game container (canvas plus HUD) for this device
    fn apply_viewport(window: &web_sys::Window, container: &HtmlElement) {
        let avail_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(SCREEN_WIDTH as f64) as f32;
        let avail_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(SCREEN_HEIGHT as f64) as f32;
        let desktop = window
            .navigator()
            .user_agent()
            .map(|ua| is_desktop_user_agent(&ua))
            .unwrap_or(true);

        let vp = fit_viewport(SCREEN_WIDTH, SCREEN_HEIGHT, avail_w, avail_h, desktop);
        let style = container.style();
        for (name, value) in vp.container_style() {
            let _ = style.set_property(name, &value);
        }
        log::debug!("Viewport: {:?}", vp);
    }

    fn setup_resize(container: &HtmlElement) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let container = container.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                apply_viewport(&window, &container);
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(frontend: Rc<RefCell<Frontend>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Pointer down anywhere on the page (mouse and touch)
        {
            let frontend = frontend.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut f = frontend.borrow_mut();
                f.audio.resume();
                f.input.pointer_down();
            });
            window.add_event_listener_with_callback(
                "pointerdown",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Pointer release anywhere ends a hold
        for name in ["pointerup", "pointercancel"] {
            let frontend = frontend.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                frontend.borrow_mut().input.pointer_up();
            });
            window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let frontend = frontend.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut f = frontend.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        f.audio.resume();
                        f.input.key_down();
                    }
                    "i" | "I" => {
                        f.autopilot = !f.autopilot;
                        log::info!("Autopilot: {}", f.autopilot);
                    }
                    "f" | "F" => {
                        f.settings.show_fps = !f.settings.show_fps;
                        f.save_settings();
                    }
                    "m" | "M" => {
                        f.settings.muted = !f.settings.muted;
                        log::info!("Muted: {}", f.settings.muted);
                        f.save_settings();
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " {
                    frontend.borrow_mut().input.key_up();
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(
        document: &Document,
        frontend: Rc<RefCell<Frontend>>,
    ) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("restart-btn") else {
            return Ok(());
        };
        // Handled here instead of by the page listener
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            event.stop_propagation();
            let mut f = frontend.borrow_mut();
            f.audio.resume();
            f.input.pointer_down();
            f.input.pointer_up();
        });
        btn.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_focus_handlers(
        document: &Document,
        frontend: Rc<RefCell<Frontend>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Window blur: drop held input, optionally mute
        {
            let frontend = frontend.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut f = frontend.borrow_mut();
                f.input.release_all();
                if f.settings.mute_on_blur {
                    f.audio.set_volume(0.0);
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let frontend = frontend.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut f = frontend.borrow_mut();
                let volume = f.settings.effective_volume();
                f.audio.set_volume(volume);
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Hidden tab: don't replay the gap as a burst of ticks on return
        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                    let mut f = frontend.borrow_mut();
                    f.clock.reset();
                    f.last_time = 0.0;
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(frontend: Rc<RefCell<Frontend>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(frontend, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(frontend: Rc<RefCell<Frontend>>, time: f64) {
        {
            let mut f = frontend.borrow_mut();

            let dt = if f.last_time > 0.0 {
                ((time - f.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            f.last_time = time;

            f.update(dt, time);
            f.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                f.update_hud(&document);
            }
        }

        request_animation_frame(frontend);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the playable web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let tuning = match std::env::var("FLAPPY_TUNING") {
        Ok(json) => flappy::Tuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring FLAPPY_TUNING: {}", e);
            flappy::Tuning::default()
        }),
        Err(_) => flappy::Tuning::default(),
    };
    let summary = headless::run(seed, tuning, 60.0);
    println!(
        "\nAutopilot ran {:.0}s (seed {}): {} runs, best score {}, high score {}",
        summary.seconds,
        seed,
        summary.runs,
        summary.best_score,
        summary.high_label
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy::Tuning;
    use flappy::consts::SIM_DT;
    use flappy::persistence::MemoryStore;
    use flappy::sim::{Game, GameEvent, GamePhase, InputEvent, TickInput, autopilot};

    pub struct Summary {
        pub seconds: f32,
        pub runs: u32,
        pub best_score: i32,
        pub high_label: String,
    }

    /// Let the autopilot play for `seconds` of game time, restarting after
    /// every crash
    pub fn run(seed: u64, tuning: Tuning, seconds: f32) -> Summary {
        let mut game = Game::new(seed, tuning, Box::new(MemoryStore::new()));
        let ticks = (seconds / SIM_DT).round() as u32;
        let mut runs = 1;
        let mut best_score = 0;

        for _ in 0..ticks {
            let mut input = TickInput::default();
            match game.phase() {
                GamePhase::Running => {
                    input.jump = autopilot::wants_jump(&game.state, game.tuning());
                }
                GamePhase::GameOver => game.handle_input(InputEvent::JumpPressed),
                GamePhase::Countdown => {}
            }
            game.tick(&input, SIM_DT);

            for event in game.drain_events() {
                match event {
                    GameEvent::GameOver { score, .. } => best_score = best_score.max(score),
                    GameEvent::Restarted => runs += 1,
                    other => log::debug!("{:?}", other),
                }
            }
        }
        best_score = best_score.max(game.state.score);

        Summary {
            seconds,
            runs,
            best_score,
            high_label: game.high_score().value().map_or("-".to_string(), |v| v.to_string()),
        }
    }
}
