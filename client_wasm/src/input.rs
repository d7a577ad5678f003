//! Keyboard input handling

use web_sys::KeyboardEvent;

/// Keys whose browser default (page scroll) must be suppressed
pub fn suppresses_default(key: &str) -> bool {
    matches!(key, " " | "Spacebar")
}

/// Extract key from keyboard event, cancelling the default where needed
pub fn get_key_from_event(event: &KeyboardEvent) -> String {
    let key = event.key();
    if suppresses_default(&key) {
        event.prevent_default();
    }
    key
}
