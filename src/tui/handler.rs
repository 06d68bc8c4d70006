//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers
//! based on the current application state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, FocusedPanel, InputMode, Route};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => Ok(()),
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    app.clear_status();

    // Global keys (work everywhere)
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.quit();
            return Ok(());
        }

        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            app.select_route(Route::ALL[index]);
            return Ok(());
        }

        KeyCode::Char('r') => {
            app.reload();
            app.set_status("Reloaded");
            return Ok(());
        }

        KeyCode::Char('/') if app.route == Route::Customers => {
            app.input_mode = InputMode::Search;
            return Ok(());
        }

        KeyCode::Tab => {
            app.toggle_panel_focus();
            return Ok(());
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.focused_panel = FocusedPanel::Sidebar;
            return Ok(());
        }
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => {
            app.focused_panel = FocusedPanel::Main;
            return Ok(());
        }

        _ => {}
    }

    match app.focused_panel {
        FocusedPanel::Sidebar => handle_sidebar_key(app, key),
        FocusedPanel::Main => handle_main_panel_key(app, key),
    }

    Ok(())
}

/// Handle keys when sidebar is focused
fn handle_sidebar_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.next_route(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_route(),
        _ => {}
    }
}

/// Handle keys when main panel is focused
fn handle_main_panel_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_offset = 0,
        _ => {}
    }
}

/// Handle keys while typing a search term
fn handle_search_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            app.customer_search.pop();
        }
        KeyCode::Char(c) => app.customer_search.push(c),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AtlasPaths;
    use crate::config::settings::Settings;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    #[test]
    fn test_route_navigation() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(AtlasPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        assert_eq!(app.route, Route::Dashboard);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.route, Route::Customers);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.route, Route::Widgets);

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.route, Route::Profile);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_customer_search_mode() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(AtlasPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        // '/' outside customers does nothing special
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Normal);

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Search);

        for c in "acmx".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        // 'q' is text while searching
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.customer_search, "acmq");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_scroll_only_in_main_panel() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(AtlasPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focused_panel, FocusedPanel::Main);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.scroll_offset, 2);
        assert_eq!(app.route, Route::Dashboard);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.scroll_offset, 0);
    }
}
