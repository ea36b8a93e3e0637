//! Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop: a
//! terminal front end on native targets, WebGPU in the browser.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use breakout::platform::{default_store, key_from_dom};
    use breakout::renderer::{self, RenderState, shapes};
    use breakout::{Game, GameConfig, Key};

    /// Game plus the browser-side state needed to drive it
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        last_time: f64,
    }

    impl App {
        fn new(seed: u64) -> Self {
            Self {
                game: Game::with_fixed_rate(GameConfig::default(), seed, default_store()),
                render_state: None,
                last_time: 0.0,
            }
        }

        /// Run whatever ticks are due for this frame
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;
            self.game.advance(dt);
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = shapes::frame(self.game.state());
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
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&renderer::score_label(self.game.score())));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                el.set_text_content(Some(&renderer::high_score_label(self.game.high_score())));
            }

            let overlay = renderer::overlay(self.game.state());
            if let Some(el) = document.get_element_by_id("title") {
                el.set_text_content(overlay.and_then(|o| o.title));
            }
            if let Some(el) = document.get_element_by_id("message") {
                el.set_text_content(overlay.map(|o| o.message));
                let class = match overlay {
                    Some(o) if o.title.is_none() => "result",
                    Some(_) => "prompt",
                    None => "hidden",
                };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    fn js_err(what: &str, e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&format!("{}: {}", what, e))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| js_err("logger", e))?;

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));

        // Canvas backing store matches the playfield at device resolution
        let playfield = {
            let config = app.borrow().game.config().clone();
            Vec2::new(config.width, config.height)
        };
        let dpr = window.device_pixel_ratio();
        let width = (playfield.x as f64 * dpr) as u32;
        let height = (playfield.y as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_err("surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_err("adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, playfield)
            .await
            .map_err(|e| js_err("device", e))?;
        app.borrow_mut().render_state = Some(render_state);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&window, app.clone());
        request_animation_frame(app);

        log::info!("Breakout running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = key_from_dom(&event.key()) else {
                    return;
                };
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                if !event.repeat() {
                    app.borrow_mut().game.press(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = key_from_dom(&event.key()) {
                    app.borrow_mut().game.release(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Losing focus swallows keyup events
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.game.release(Key::Left);
                a.game.release(Key::Right);
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod terminal_game {
    use std::io;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use crossterm::event::{
        self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    };
    use crossterm::execute;
    use crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    };
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    use breakout::platform::{HeldKeys, default_store, key_from_crossterm};
    use breakout::renderer;
    use breakout::{Game, GameConfig, Key};

    /// Seconds without a press (or auto-repeat) before a key counts as released
    const KEY_HOLD_TIMEOUT: f64 = 0.5;

    type Term = Terminal<CrosstermBackend<io::Stdout>>;

    fn load_config() -> GameConfig {
        let Ok(path) = std::env::var("BREAKOUT_CONFIG") else {
            return GameConfig::default();
        };
        match GameConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded config override from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                GameConfig::default()
            }
        }
    }

    pub fn run() -> io::Result<()> {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let mut game = Game::with_fixed_rate(load_config(), seed, default_store());

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        // Real key releases where the terminal can report them
        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::debug!("Keyboard release events: {}", enhanced);
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_loop(&mut terminal, &mut game, enhanced);

        // Restore terminal
        if enhanced {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn run_loop(terminal: &mut Term, game: &mut Game, enhanced: bool) -> io::Result<()> {
        let clock = Instant::now();
        let frame_time = Duration::from_secs_f32(game.config().tick_interval());
        let mut held = HeldKeys::new(KEY_HOLD_TIMEOUT);
        let mut last = Instant::now();

        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                renderer::terminal::render(frame, area, game.state(), game.high_score())
            })?;

            // Drain input, waiting at most one tick for the first event
            let mut timeout = frame_time;
            while event::poll(timeout)? {
                timeout = Duration::ZERO;
                let Event::Key(key) = event::read()? else {
                    continue;
                };
                let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL));
                if quit && key.kind == KeyEventKind::Press {
                    log::info!("Quit with score {}", game.score());
                    return Ok(());
                }
                let Some(k) = key_from_crossterm(key.code) else {
                    continue;
                };
                if k == Key::Action {
                    if key.kind == KeyEventKind::Press {
                        game.press(k);
                    }
                    continue;
                }
                let now = clock.elapsed().as_secs_f64();
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if held.press(k, now) {
                            game.press(k);
                        }
                    }
                    KeyEventKind::Release => {
                        if held.release(k) {
                            game.release(k);
                        }
                    }
                }
            }

            if !enhanced {
                for k in held.expire(clock.elapsed().as_secs_f64()) {
                    game.release(k);
                }
            }

            let now = Instant::now();
            game.advance(now.duration_since(last).as_secs_f32());
            last = now;
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

/// Where the terminal build writes its log: `BREAKOUT_LOG`, else
/// `breakout.log` in the temp directory
#[cfg(not(target_arch = "wasm32"))]
fn log_path(var: Option<std::ffi::OsString>) -> std::path::PathBuf {
    match var {
        Some(path) if !path.is_empty() => path.into(),
        _ => std::env::temp_dir().join("breakout.log"),
    }
}

/// Logs go to a file; stderr would draw over the alternate screen
#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    let path = log_path(std::env::var_os("BREAKOUT_LOG"));
    let mut builder = env_logger::Builder::from_default_env();
    match std::fs::File::create(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    init_logging();
    log::info!("Breakout (terminal) starting...");
    terminal_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
