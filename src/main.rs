//! Bigfoot Dodge entry point
//!
//! Browser: wires the canvas, keyboard and `requestAnimationFrame` to the game loop.
//! Native: runs a headless session on simulated time and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use bigfoot_dodge::platform::{FrameQueue, FrameScheduler, Key, SystemClock};
    use bigfoot_dodge::renderer::{Canvas, Color};
    use bigfoot_dodge::sim::Rect;
    use bigfoot_dodge::{GameLoop, Tuning};

    /// Browser 2D context as a game canvas
    struct Context2d(CanvasRenderingContext2d);

    impl Canvas for Context2d {
        fn clear(&mut self, width: f32, height: f32) {
            self.0.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn fill_rect(&mut self, rect: &Rect, color: Color) {
            self.0.set_fill_style_str(color.css());
            self.0.fill_rect(
                rect.x() as f64,
                rect.y() as f64,
                rect.width() as f64,
                rect.height() as f64,
            );
        }

        fn fill_text(&mut self, text: &str, x: f32, y: f32, size_px: u32, color: Color) {
            self.0.set_fill_style_str(color.css());
            self.0.set_font(&format!("{}px Arial", size_px));
            let _ = self.0.fill_text(text, x as f64, y as f64);
        }
    }

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop<SystemClock, FrameQueue>,
        canvas: Context2d,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bigfoot Dodge starting...");

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let canvas = document
            .get_element_by_id("gameCanvas")
            .expect("No #gameCanvas element")
            .dyn_into::<HtmlCanvasElement>()
            .expect("#gameCanvas is not a canvas");

        let tuning = Tuning::load();
        canvas.set_width(tuning.playfield_width as u32);
        canvas.set_height(tuning.playfield_height as u32);

        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .expect("2D canvas context unavailable");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(seed, tuning, SystemClock::new(), FrameQueue::new()),
            canvas: Context2d(context),
        }));

        setup_input_handlers(game.clone());
        service_frame_requests(&game);

        log::info!("Bigfoot Dodge running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down: movement flags and restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    // Keep arrow keys from scrolling the page
                    event.prevent_default();
                    game.borrow_mut().game_loop.key_down(key);
                    // Restart may have asked for a frame
                    service_frame_requests(&game);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: clear movement flags
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    game.borrow_mut().game_loop.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Turn every outstanding frame request into a `requestAnimationFrame`
    fn service_frame_requests(game: &Rc<RefCell<Game>>) {
        let mut requests = 0;
        {
            let mut g = game.borrow_mut();
            while g.game_loop.scheduler_mut().take_request() {
                requests += 1;
            }
        }
        for _ in 0..requests {
            request_animation_frame(game.clone());
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let Game { game_loop, canvas } = &mut *g;
            game_loop.frame(canvas);
        }

        service_frame_requests(&game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;

    use bigfoot_dodge::platform::{FrameQueue, ManualClock};
    use bigfoot_dodge::renderer::DrawList;
    use bigfoot_dodge::{BigfootMode, GameLoop, Tuning};

    #[derive(Parser)]
    #[command(name = "bigfoot-dodge", about = "Run a headless Bigfoot Dodge session")]
    struct Cli {
        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,

        /// RNG seed (defaults to the current time)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Bigfoot behavior: marker or riser
        #[arg(short, long, value_parser = parse_mode)]
        mode: Option<BigfootMode>,

        /// JSON tuning file (overrides BIGFOOT_TUNING)
        #[arg(short, long)]
        tuning: Option<PathBuf>,

        /// Simulated milliseconds per frame
        #[arg(long, default_value = "16")]
        step_ms: u64,

        /// Stop after this many simulated seconds
        #[arg(long, default_value = "120")]
        max_seconds: u64,
    }

    fn parse_mode(s: &str) -> Result<BigfootMode, String> {
        BigfootMode::from_str(s).ok_or_else(|| format!("unknown mode `{s}` (expected marker or riser)"))
    }

    pub fn run() -> ExitCode {
        let cli = Cli::parse();

        let filter = if cli.verbose { "debug" } else { "info" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

        log::info!("Bigfoot Dodge (native, headless) starting...");

        let mut tuning = match &cli.tuning {
            Some(path) => match Tuning::from_path(path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Failed to load {}: {}", path.display(), e);
                    return ExitCode::FAILURE;
                }
            },
            None => match cli.mode {
                Some(mode) => Tuning::for_mode(mode),
                None => Tuning::load(),
            },
        };
        if let Some(mode) = cli.mode {
            tuning.bigfoot_mode = mode;
        }

        let seed = cli.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

        let clock = ManualClock::new(0);
        let mut game = GameLoop::new(seed, tuning, clock, FrameQueue::new());
        let mut canvas = DrawList::new();
        let summary = game.run_headless(cli.step_ms.max(1), cli.max_seconds * 1000, &mut canvas);

        println!(
            "seed={} score={} frames={} simulated={:.1}s {}",
            seed,
            summary.score,
            summary.frames,
            summary.elapsed_ms as f64 / 1000.0,
            if summary.game_over { "game over" } else { "time limit" }
        );
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
