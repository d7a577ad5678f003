//! DOM client for Rocket Dodge
//!
//! Binds the `game_core` session to the page: keyboard and button
//! listeners feed it, a `requestAnimationFrame` loop steps it, and
//! [`dom::DomSurface`] shows what it spawns.

#![cfg(target_arch = "wasm32")]

mod dom;
mod hud;
mod input;
mod logging;
mod particles;
mod platform;

use std::cell::RefCell;

use dom::DomSurface;
use game_core::*;
use hud::Hud;
use platform::{LocalStore, PerformanceClock};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement, KeyboardEvent, Window};

/// Main client state
struct App {
    session: Session<PerformanceClock, LocalStore>,
    surface: DomSurface,
    hud: Hud,
    /// Pending `requestAnimationFrame` id, if a frame is scheduled
    frame_id: Option<i32>,
}

impl App {
    fn new(document: &Document, config: Config) -> Result<Self, JsValue> {
        let arena: HtmlElement = hud::by_id(document, "gameArea")?;
        let player: HtmlElement = hud::by_id(document, "playerRocket")?;
        let session = Session::new(
            config,
            PerformanceClock::new(),
            LocalStore::new(),
            GameRng::from_entropy(),
        );

        let app = Self {
            session,
            surface: DomSurface::new(document.clone(), arena, player),
            hud: Hud::new(document)?,
            frame_id: None,
        };
        app.refresh_hud();
        Ok(app)
    }

    fn start(&mut self) -> Result<(), JsValue> {
        if self.session.start(&mut self.surface) {
            self.schedule_frame()?;
        }
        self.refresh_hud();
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<(), JsValue> {
        match self.session.toggle_pause() {
            Some(FsmState::Paused) => self.cancel_frame(),
            Some(FsmState::Running) => self.schedule_frame()?,
            _ => {}
        }
        self.refresh_hud();
        Ok(())
    }

    fn restart(&mut self) -> Result<(), JsValue> {
        self.cancel_frame();
        self.session.restart(&mut self.surface);
        self.schedule_frame()?;
        self.refresh_hud();
        Ok(())
    }

    fn dispatch(&mut self, action: GameAction) -> Result<(), JsValue> {
        let state = self.session.state();
        match action {
            GameAction::Start => self.start(),
            GameAction::Pause if state == FsmState::Running => self.toggle_pause(),
            GameAction::Resume if state == FsmState::Paused => self.toggle_pause(),
            GameAction::Pause | GameAction::Resume => Ok(()),
            GameAction::Restart => self.restart(),
            GameAction::Crash => Err(JsValue::from_str("CRASH is not a UI action")),
        }
    }

    fn on_frame(&mut self) -> Result<(), JsValue> {
        self.frame_id = None;
        let frame = self.session.step(&mut self.surface);
        self.refresh_hud();
        match frame {
            Frame::Continue => self.schedule_frame(),
            Frame::Stop => Ok(()),
        }
    }

    fn schedule_frame(&mut self) -> Result<(), JsValue> {
        if self.frame_id.is_some() {
            return Ok(());
        }
        let window = window()?;
        let id = FRAME_CALLBACK.with(|slot| {
            let mut slot = slot.borrow_mut();
            let callback = slot.get_or_insert_with(|| Closure::new(on_animation_frame));
            window.request_animation_frame(callback.as_ref().unchecked_ref())
        })?;
        self.frame_id = Some(id);
        Ok(())
    }

    fn cancel_frame(&mut self) {
        let Some(id) = self.frame_id.take() else {
            return;
        };
        if let Ok(window) = window() {
            if let Err(err) = window.cancel_animation_frame(id) {
                tracing::warn!(?err, "failed to cancel frame");
            }
        }
    }

    fn refresh_hud(&self) {
        self.hud.refresh(
            self.session.state(),
            self.session.score(),
            self.session.high_score(),
        );
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static FRAME_CALLBACK: RefCell<Option<Closure<dyn FnMut(f64)>>> = const { RefCell::new(None) };
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn with_app<R>(f: impl FnOnce(&mut App) -> Result<R, JsValue>) -> Result<R, JsValue> {
    APP.with(|app| match app.borrow_mut().as_mut() {
        Some(app) => f(app),
        None => Err(JsValue::from_str("Client not initialized")),
    })
}

fn on_animation_frame(_timestamp: f64) {
    if let Err(err) = with_app(App::on_frame) {
        tracing::error!(?err, "frame failed");
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::error!(?err, "ui action failed");
    }
}

/// Register `handler` for `event` on `target` for the lifetime of the page
fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn bind_button(
    document: &Document,
    id: &str,
    action: fn(&mut App) -> Result<(), JsValue>,
) -> Result<(), JsValue> {
    let button: HtmlElement = hud::by_id(document, id)?;
    listen(&button, "click", move |_event| report(with_app(action)))
}

fn bind_key(
    document: &Document,
    event: &str,
    action: fn(&mut App, &str),
) -> Result<(), JsValue> {
    listen(document, event, move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = input::get_key_from_event(event);
        report(with_app(|app| {
            action(app, &key);
            Ok(())
        }));
    })
}

/// Boot the client. `config_json` overrides the default tuning and
/// `log_filter` takes `EnvFilter` directives.
#[wasm_bindgen]
pub fn start_app(config_json: Option<String>, log_filter: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init(log_filter.as_deref());

    let config = match config_json {
        Some(json) => {
            Config::from_json(&json).map_err(|e| JsValue::from_str(&format!("{e:#}")))?
        }
        None => Config::new(),
    };

    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let app = App::new(&document, config)?;
    APP.with(|slot| *slot.borrow_mut() = Some(app));

    bind_key(&document, "keydown", |app, key| {
        app.session.key_down(key, &mut app.surface)
    })?;
    bind_key(&document, "keyup", |app, key| app.session.key_up(key))?;

    bind_button(&document, "startBtn", App::start)?;
    bind_button(&document, "pauseBtn", App::toggle_pause)?;
    bind_button(&document, "restartBtn", App::restart)?;

    tracing::info!("client ready");
    Ok(())
}

/// Drive the session from JS with the UI action strings `START`, `PAUSE`,
/// `RESUME` and `RESTART`
#[wasm_bindgen]
pub fn dispatch(action: &str) -> Result<(), JsValue> {
    let action: GameAction = action.parse().map_err(|e: String| JsValue::from_str(&e))?;
    with_app(|app| app.dispatch(action))
}
