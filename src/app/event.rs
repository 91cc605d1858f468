// Keyboard event handling
//
// This module contains the keyboard event handler that processes
// user input and updates the application state accordingly.

use super::AppState;
use crossterm::event::KeyCode;

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q`, `Esc` - Quit the application
/// - `Space` - Pause / resume the replay
/// - `n`, `.` - Advance a single tick while paused
/// - `+`, `=` - Faster ticks (shorter interval)
/// - `-`, `_` - Slower ticks (longer interval)
/// - `t`, `T` - Toggle node labels
/// - `r`, `R` - Toggle route lines
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        // Quit on 'q', 'Q', or Esc
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.running = false;
            false
        }
        KeyCode::Char(' ') => {
            app.toggle_pause();
            true
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('.') => {
            app.request_single_step();
            true
        }
        // + = faster ticks (decrease interval)
        // - = slower ticks (increase interval)
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.increase_refresh_rate();
            true
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.decrease_refresh_rate();
            true
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_labels();
            true
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.toggle_routes();
            true
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();

        // Test 'q' key
        assert!(app.running);
        let result = handle_key_event(&mut app, KeyCode::Char('q'));
        assert!(!result);
        assert!(!app.running);

        // Reset and test 'Q' key
        app.running = true;
        let result = handle_key_event(&mut app, KeyCode::Char('Q'));
        assert!(!result);
        assert!(!app.running);

        // Reset and test Esc key
        app.running = true;
        let result = handle_key_event(&mut app, KeyCode::Esc);
        assert!(!result);
        assert!(!app.running);
    }

    #[test]
    fn test_toggle_pause() {
        let mut app = test_app();

        assert!(!app.paused);
        handle_key_event(&mut app, KeyCode::Char(' '));
        assert!(app.paused);
        handle_key_event(&mut app, KeyCode::Char(' '));
        assert!(!app.paused);
    }

    #[test]
    fn test_single_step_keys() {
        let mut app = test_app();
        handle_key_event(&mut app, KeyCode::Char(' '));

        assert!(handle_key_event(&mut app, KeyCode::Char('n')));
        assert!(handle_key_event(&mut app, KeyCode::Char('.')));
        assert_eq!(app.pending_steps, 2);
    }

    #[test]
    fn test_toggle_labels() {
        let mut app = test_app();

        // Default: labels enabled
        assert!(app.stage_settings.labels_enabled);

        handle_key_event(&mut app, KeyCode::Char('t'));
        assert!(!app.stage_settings.labels_enabled);

        handle_key_event(&mut app, KeyCode::Char('T'));
        assert!(app.stage_settings.labels_enabled);
    }

    #[test]
    fn test_toggle_routes() {
        let mut app = test_app();

        // Default: route lines disabled
        assert!(!app.stage_settings.routes_enabled);

        handle_key_event(&mut app, KeyCode::Char('r'));
        assert!(app.stage_settings.routes_enabled);

        handle_key_event(&mut app, KeyCode::Char('R'));
        assert!(!app.stage_settings.routes_enabled);
    }

    #[test]
    fn test_refresh_rate_controls() {
        let mut app = test_app();
        let initial_rate = app.refresh_config.refresh_ms;

        // Faster ticks (shorter interval)
        handle_key_event(&mut app, KeyCode::Char('+'));
        assert!(app.refresh_config.refresh_ms < initial_rate);

        // Slower ticks (longer interval)
        handle_key_event(&mut app, KeyCode::Char('-'));
        assert_eq!(app.refresh_config.refresh_ms, initial_rate);
    }

    #[test]
    fn test_unbound_key_keeps_running() {
        let mut app = test_app();
        assert!(handle_key_event(&mut app, KeyCode::Char('z')));
        assert!(app.running);
    }
}
