//! Bubble Stack entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use bubble_stack::scene::{self, Frame};
    use bubble_stack::sim::{GameEvent, Session};
    use bubble_stack::Settings;

    /// Game instance holding all state
    struct Game {
        session: Session,
        ctx: CanvasRenderingContext2d,
        document: Document,
        last_time: f64,
    }

    impl Game {
        fn render(&self) -> Result<(), JsValue> {
            let Frame {
                width,
                height,
                circles,
                message,
            } = scene::frame(&self.session);

            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
            for circle in circles {
                self.ctx.begin_path();
                self.ctx.arc(
                    circle.center.x as f64,
                    circle.center.y as f64,
                    circle.radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                self.ctx.set_fill_style_str(circle.color.hex());
                self.ctx.fill();
                self.ctx.close_path();
            }

            if let Some(el) = self.document.get_element_by_id("message") {
                match message {
                    Some(message) => {
                        el.set_text_content(Some(message.text()));
                        el.set_attribute("class", "")?;
                    }
                    None => el.set_attribute("class", "hidden")?,
                }
            }
            Ok(())
        }
    }

    fn log_events(events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::GameOver { .. } | GameEvent::Started { .. } | GameEvent::Armed => {
                    log::info!("{:?}", event)
                }
                _ => log::debug!("{:?}", event),
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Bubble Stack starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let settings = Settings::load();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(settings.canvas_width as u32);
        canvas.set_height(settings.canvas_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(settings, seed),
            ctx,
            document,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        request_animation_frame(game);

        log::info!("Bubble Stack running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Start / restart click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let events = game.borrow_mut().session.click();
                log_events(&events);
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().session.key_down(&event.key()) {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
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
        {
            let mut g = game.borrow_mut();

            let dt_ms = if g.last_time > 0.0 { time - g.last_time } else { 0.0 };
            g.last_time = time;

            let events = g.session.advance(dt_ms);
            log_events(&events);

            if let Err(e) = g.render() {
                log::warn!("Render error: {:?}", e);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Headless run: an autopilot chases bubbles of its own color until a
/// mismatch lands or the time budget runs out.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bubble_stack::sim::{GameEvent, Session};
    use bubble_stack::Settings;

    env_logger::init();
    log::info!("Bubble Stack (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable version");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut session = Session::new(settings, seed);
    session.click();

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    let mut frames = 0;
    let mut caught = 0;
    while session.is_running() && frames < MAX_FRAMES {
        let (player_x, color) = (session.player().pos.x, session.player().color);
        let target = session
            .falling()
            .iter()
            .filter(|b| b.color == color)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|b| b.pos.x);
        if let Some(x) = target {
            if x < player_x - 2.5 {
                session.move_left();
            } else if x > player_x + 2.5 {
                session.move_right();
            }
        }

        for event in session.advance(FRAME_MS) {
            match event {
                GameEvent::Stacked { .. } => caught += 1,
                GameEvent::GameOver { .. } => log::info!("{:?}", event),
                _ => log::debug!("{:?}", event),
            }
        }
        frames += 1;
    }

    println!(
        "seed {}: {:?} after {} frames, {} bubbles caught",
        seed,
        session.phase(),
        frames,
        caught
    );
}
