//! Gravity Stone entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use gravity_stone::audio::WebTones;
    use gravity_stone::persistence::LocalStorageStore;
    use gravity_stone::renderer::CanvasSurface;
    use gravity_stone::sim::{GamePhase, World};
    use gravity_stone::{Session, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session<WebTones, LocalStorageStore>,
        surface: CanvasSurface,
        /// A frame callback is scheduled
        running: bool,
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn container_width(canvas: &HtmlCanvasElement) -> f32 {
        canvas
            .parent_element()
            .map(|p| p.client_width() as f32)
            .unwrap_or(gravity_stone::consts::MAX_WORLD_WIDTH)
    }

    fn apply_world_size(game: &Game) {
        let world = game.session.state().world;
        game.surface
            .resize(world.width as u32, world.height as u32);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gravity Stone starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let surface = CanvasSurface::new(canvas.clone()).expect("no 2d context");

        let seed = js_sys::Date::now() as u64;
        let world = World::fit_to_container(container_width(&canvas));
        let session = Session::new(
            seed,
            Tuning::default(),
            world,
            WebTones::new(),
            LocalStorageStore::new(),
        );
        let game = Rc::new(RefCell::new(Game {
            session,
            surface,
            running: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        {
            let mut g = game.borrow_mut();
            apply_world_size(&g);
            // Paint the idle stone behind the start screen
            let Game {
                session, surface, ..
            } = &mut *g;
            gravity_stone::renderer::render(session.state(), surface);
            update_hud(&g);
            update_mute_button(g.session.is_muted());
        }

        setup_input_handlers(&canvas, game.clone());
        setup_mute_button(game.clone());
        setup_resize(canvas, game);

        log::info!("Gravity Stone running!");
    }

    /// Feed the activate signal and start the frame loop if a run began
    fn activate(game: &Rc<RefCell<Game>>) {
        let start_loop = {
            let mut g = game.borrow_mut();
            g.session.audio().tones().resume();
            let started = g.session.activate(now_ms());
            update_hud(&g);
            let start_loop = started && !g.running;
            if start_loop {
                g.running = true;
            }
            start_loop
        };
        if start_loop {
            request_animation_frame(game.clone());
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer press on the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                activate(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        activate(&game);
                    }
                    "KeyI" => {
                        let mut g = game.borrow_mut();
                        let idle = !g.session.idle_mode();
                        g.session.set_idle_mode(idle);
                        log::info!("Idle mode: {}", idle);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mute_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                let muted = game.borrow_mut().session.toggle_mute();
                update_mute_button(muted);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.session.resize(container_width(&canvas));
            apply_world_size(&g);
            if !g.running {
                let Game {
                    session, surface, ..
                } = &mut *g;
                gravity_stone::renderer::render(session.state(), surface);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let Game {
                session, surface, ..
            } = &mut *g;
            session.frame(time, surface);
            update_hud(&g);
            // The loop ends with the frame that entered GameOver
            g.running = g.session.phase() == GamePhase::Playing;
            g.running
        };

        if keep_going {
            request_animation_frame(game);
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(game: &Game) {
        let session = &game.session;
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some(&session.score().to_string()));
        }
        if let Some(el) = document.get_element_by_id("best-score") {
            el.set_text_content(Some(&session.best_score().to_string()));
        }

        let phase = session.phase();
        if let Some(el) = document.get_element_by_id("start-screen") {
            set_hidden(&el, phase != GamePhase::Start);
        }
        if let Some(el) = document.get_element_by_id("game-over") {
            set_hidden(&el, phase != GamePhase::GameOver);
        }
        if let (Some(el), Some(score)) = (
            document.get_element_by_id("final-score"),
            session.final_score(),
        ) {
            el.set_text_content(Some(&score.to_string()));
        }

        if let Some(body) = document.body() {
            let _ = body
                .style()
                .set_property("background-color", &session.background().to_css());
        }
        let _ = game
            .surface
            .canvas()
            .style()
            .set_property("background-color", &session.canvas_background().to_css());
    }

    fn update_mute_button(muted: bool) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let classes = btn.class_list();
            let _ = if muted {
                classes.add_1("muted")
            } else {
                classes.remove_1("muted")
            };
            let _ = btn.set_attribute("title", if muted { "Unmute Sound" } else { "Mute Sound" });
        }
    }

    fn set_hidden(el: &web_sys::Element, hidden: bool) {
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gravity_stone::audio::SilentTones;
    use gravity_stone::consts::FRAME_MS;
    use gravity_stone::persistence::JsonFileStore;
    use gravity_stone::sim::{GamePhase, World};
    use gravity_stone::{Session, Tuning};

    /// Give up on a demo run after about five minutes of game time
    const MAX_DEMO_FRAMES: u32 = 60 * 60 * 5;

    env_logger::init();
    log::info!("Gravity Stone (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let tuning = std::env::args()
        .nth(1)
        .map(|path| load_tuning(&path))
        .unwrap_or_default();
    let store = JsonFileStore::open(std::env::temp_dir().join("gravity-stone.json"));
    let seed: u64 = rand::random();

    let mut session = Session::new(seed, tuning, World::default(), SilentTones, store);
    session.set_idle_mode(true);
    session.activate(0.0);

    let mut frames = 0;
    while session.phase() == GamePhase::Playing && frames < MAX_DEMO_FRAMES {
        session.step(FRAME_MS);
        frames += 1;
    }

    println!(
        "Demo (seed {}) finished after {} frames: score {}, best {}",
        seed,
        frames,
        session.score(),
        session.best_score()
    );
    println!("Scores saved to {}", session.store().path().display());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> gravity_stone::Tuning {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Cannot read tuning file {}: {} - using defaults", path, e);
            return gravity_stone::Tuning::default();
        }
    };
    match gravity_stone::Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Invalid tuning file {}: {} - using defaults", path, e);
            gravity_stone::Tuning::default()
        }
    }
}
