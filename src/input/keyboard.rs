//! Keyboard classification for the canvas view.

use crate::input::event::KeyEvent;

/// Space bar, by produced key or physical code.
pub fn is_space_key(event: &KeyEvent) -> bool {
    event.code == "Space" || event.key == " "
}

/// Ctrl/Cmd combinations the host page must not see while the canvas is
/// active: zoom in/out/reset, and find, print, save, reload, find-next and
/// history.
pub fn is_zoom_or_browser_shortcut(event: &KeyEvent) -> bool {
    if !event.modifiers.zoom_modifier() {
        return false;
    }

    let key = event.key.as_str();
    let is_zoom_key = matches!(key, "+" | "=" | "-" | "_" | "0")
        || event.code == "NumpadAdd"
        || event.code == "NumpadSubtract";

    let is_browser_action_key = matches!(key.to_ascii_lowercase().as_str(), "f" | "p" | "s" | "r" | "g" | "h");

    is_zoom_key || is_browser_action_key
}
