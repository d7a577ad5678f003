//! Score board, buttons and the game over panel

use game_core::FsmState;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlElement};

pub struct Hud {
    score: HtmlElement,
    high_score: HtmlElement,
    game_over: HtmlElement,
    final_score: HtmlElement,
    start_button: HtmlButtonElement,
    pause_button: HtmlButtonElement,
}

impl Hud {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            score: by_id(document, "score")?,
            high_score: by_id(document, "high-score")?,
            game_over: by_id(document, "gameOver")?,
            final_score: by_id(document, "finalScore")?,
            start_button: by_id(document, "startBtn")?,
            pause_button: by_id(document, "pauseBtn")?,
        })
    }

    /// Bring every widget in line with the session
    pub fn refresh(&self, state: FsmState, score: u32, high_score: u32) {
        self.score.set_text_content(Some(&score.to_string()));
        self.high_score.set_text_content(Some(&high_score.to_string()));

        let in_session = state.in_session();
        self.start_button.set_disabled(in_session);
        self.pause_button.set_disabled(!in_session);
        self.pause_button.set_text_content(Some(match state {
            FsmState::Paused => "Resume",
            _ => "Pause",
        }));

        if state == FsmState::GameOver {
            self.final_score.set_text_content(Some(&score.to_string()));
            set_display(&self.game_over, "block");
        } else {
            set_display(&self.game_over, "none");
        }
    }
}

pub(crate) fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
}

fn set_display(element: &HtmlElement, value: &str) {
    if let Err(err) = element.style().set_property("display", value) {
        tracing::warn!(?err, "failed to toggle panel");
    }
}
