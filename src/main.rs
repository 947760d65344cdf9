//! Bug Crossing entry point
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

    use bug_crossing::assets::AssetCache;
    use bug_crossing::driver::{GameLoop, LoopControl};
    use bug_crossing::platform::web::{self, DomHud};
    use bug_crossing::renderer::CanvasSurface;
    use bug_crossing::settings::Settings;

    /// Everything a frame touches
    struct Game {
        game_loop: GameLoop,
        surface: CanvasSurface,
        hud: DomHud,
    }

    impl Game {
        fn frame(&mut self, time: f64) -> LoopControl {
            let control = self.game_loop.frame(time, &mut self.surface, &mut self.hud);
            self.hud.update_fps(self.game_loop.fps());
            control
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Bug Crossing starting...");

        let document = web::document().ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("not a canvas"))?;
        let _ = canvas.class_list().add_1("canvas-body");
        match web::query(&document, ".canvas-bg") {
            Some(host) => {
                host.append_child(&canvas)?;
            }
            None => log::warn!("No .canvas-bg container; canvas not attached"),
        }

        let settings = Settings::load();
        let mut surface = CanvasSurface::new(&canvas)?;
        let assets = Rc::new(RefCell::new(AssetCache::new()));
        web::load_sprites(&assets, &mut surface)?;

        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(settings.clone()),
            surface,
            hud: DomHud::new(document.clone(), settings.show_fps),
        }));

        setup_keyboard(game.clone());
        setup_start_button(game.clone(), assets);
        setup_replay_buttons(game);

        log::info!("Bug Crossing ready, waiting for start");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            let mut g = game.borrow_mut();
            match key.as_str() {
                "p" | "P" => {
                    g.game_loop.toggle_collision_policy();
                    g.game_loop.settings().save();
                }
                _ => {
                    if g.game_loop.queue_key(&key) {
                        event.prevent_default();
                    }
                }
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Start reveals the board, then begins the loop once every sprite is in
    fn setup_start_button(game: Rc<RefCell<Game>>, assets: Rc<RefCell<AssetCache>>) {
        let Some(document) = web::document() else {
            return;
        };
        let Some(btn) = web::query(&document, ".btn-start") else {
            log::warn!("No start button found");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow().hud.reveal_board();
            let game = game.clone();
            assets.borrow_mut().on_ready(move || {
                let started = {
                    let mut g = game.borrow_mut();
                    let Game { game_loop, hud, .. } = &mut *g;
                    game_loop.start(hud)
                };
                if started {
                    request_animation_frame(game);
                }
            });
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_replay_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web::document() else {
            return;
        };

        for selector in [".btn-replay", ".btn-try"] {
            let Some(btn) = web::query(&document, selector) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let restarted = {
                    let mut g = game.borrow_mut();
                    let Game { game_loop, hud, .. } = &mut *g;
                    game_loop.replay(hud)
                };
                if restarted {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
        let control = game.borrow_mut().frame(time);
        if control == LoopControl::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bug Crossing (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use bug_crossing::consts::{CELL_HEIGHT, CELL_WIDTH};
    use bug_crossing::driver::{GameLoop, LoopControl, LoopPhase, UiSink};
    use bug_crossing::renderer::RecordingSurface;
    use bug_crossing::settings::{CollisionPolicy, Settings};
    use bug_crossing::sim::{Direction, GameEvent, GameState};

    /// 60 Hz frame clock
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after two simulated minutes
    const MAX_FRAMES: u32 = 60 * 120;
    /// How far ahead (seconds) a bug must be clear before stepping into its lane
    const LOOKAHEAD: f32 = 0.45;

    struct LogSink;

    impl UiSink for LogSink {
        fn emit(&mut self, event: GameEvent) {
            log::info!("HUD: {:?}", event);
        }

        fn lives_reset(&mut self, lives: u8) {
            log::info!("HUD: lives reset to {}", lives);
        }
    }

    /// True if no bug in the lane above will reach the player's cell soon
    fn safe_to_step_up(state: &GameState) -> bool {
        let player = &state.player;
        let target_y = player.pos.y - CELL_HEIGHT;
        state
            .enemies
            .iter()
            .filter(|e| e.pos.y == target_y)
            .all(|e| {
                let reach = e.pos.x + CELL_WIDTH / 2.0 + e.speed * LOOKAHEAD;
                reach <= player.pos.x || e.pos.x >= player.pos.x + CELL_WIDTH / 2.0
            })
    }

    pub fn run() {
        let mut settings = Settings::load();
        if let Some(arg) = std::env::args().nth(1) {
            match CollisionPolicy::from_str(&arg) {
                Some(policy) => settings.collision_policy = policy,
                None => log::warn!("Unknown collision policy {:?}, keeping {}", arg, settings.collision_policy.as_str()),
            }
        }
        log::info!("Collision policy: {}", settings.collision_policy.as_str());
        let mut game = GameLoop::new(settings);
        let mut surface = RecordingSurface::default();
        let mut sink = LogSink;

        game.start(&mut sink);
        let mut now = 0.0;
        let mut frames = 0;
        while frames < MAX_FRAMES {
            if safe_to_step_up(game.state()) {
                game.queue_input(Direction::Up);
            }
            if game.frame(now, &mut surface, &mut sink) == LoopControl::Halt {
                break;
            }
            now += FRAME_MS;
            frames += 1;
        }

        match game.phase() {
            LoopPhase::Won => println!(
                "Crossed in {} frames with {} lives left",
                frames,
                game.state().player.lives
            ),
            LoopPhase::Lost => println!("Out of lives after {} frames", frames),
            phase => println!("Stopped in {:?} after {} frames", phase, frames),
        }
        log::info!("Rendered {} frames", surface.frames);
    }
}
