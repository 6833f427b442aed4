// Keyboard event handling
//
// This module contains the keyboard event handler that processes
// user input and updates the application state accordingly.

use super::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q`, `Esc`, `Ctrl-C` - Quit the application
/// - `Up` / `Down` - Scroll the flow list by one row
/// - `PageUp` / `PageDown` - Scroll the flow list by one page
/// - `Home` / `End` - Jump to the top / bottom of the flow list
pub fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    let page = app.visible_rows.max(1);
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.quit();
            false
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            false
        }
        KeyCode::Up => {
            app.scroll_up(1);
            true
        }
        KeyCode::Down => {
            app.scroll_down(1);
            true
        }
        KeyCode::PageUp => {
            app.scroll_up(page);
            true
        }
        KeyCode::PageDown => {
            app.scroll_down(page);
            true
        }
        KeyCode::Home => {
            app.scroll_to_top();
            true
        }
        KeyCode::End => {
            app.scroll_to_bottom();
            true
        }
        _ => true,
    }
}
