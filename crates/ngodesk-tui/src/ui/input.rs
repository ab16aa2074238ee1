//! Keyboard input handling for the TUI.
//!
//! Overlays and search mode take input first; everything else goes through
//! the global key map, which applies to whichever screen is active.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use ngodesk_core::api::DocumentAction;
use ngodesk_core::listing::SelectScope;
use ngodesk_core::Screen;

use crate::app::{App, AppState};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingBulk(action) => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.confirm_bulk_action(action);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::Searching => {
            handle_search_input(app, key);
            return Ok(false);
        }
        AppState::Normal | AppState::Quitting => {}
    }

    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if let Some(screen) = Screen::from_index(index) {
                app.go_to_screen(screen);
            }
        }
        KeyCode::Left => app.go_to_screen(app.current_screen.prev()),
        KeyCode::Right => app.go_to_screen(app.current_screen.next()),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::PageDown | KeyCode::Char(']') => app.next_page(),
        KeyCode::PageUp | KeyCode::Char('[') => app.prev_page(),
        KeyCode::Home => app.first_page(),
        KeyCode::End => app.last_page(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => {
            if !app.current_list().query().is_empty() {
                app.finish_search(false);
            }
        }
        KeyCode::Char('f') => app.cycle_facet(),
        KeyCode::Char('F') => app.next_facet_field(),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('S') => app.flip_sort(),
        KeyCode::Char(' ') => app.toggle_row(),
        KeyCode::Char('a') => app.toggle_select_all(SelectScope::Page),
        KeyCode::Char('A') => app.toggle_select_all(SelectScope::Eligible),
        KeyCode::Char('v') => app.toggle_view_mode(),
        KeyCode::Char('x') => app.request_bulk_action(),
        KeyCode::Char('p') => app.open_document(DocumentAction::Preview),
        KeyCode::Char('d') => app.open_document(DocumentAction::Download),
        KeyCode::Char('u') => app.refresh_all_background(),
        _ => {}
    }

    Ok(false)
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.finish_search(false),
        // Keep search query active
        KeyCode::Enter => app.finish_search(true),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ngodesk_core::listing::ViewMode;
    use ngodesk_core::{Config, Dataset, Payload};
    use pretty_assertions::assert_eq;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn demo_app(dir: &tempfile::TempDir) -> App {
        let mut app = App::with_config(Config::default(), dir.path().to_path_buf()).unwrap();
        for dataset in Dataset::ALL {
            app.lists.apply(Payload::demo(dataset));
        }
        app
    }

    #[test]
    fn test_number_keys_switch_screens() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app(&dir);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_screen, Screen::Compliance);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_screen, Screen::GrantArchive);
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_screen, Screen::GrantPortfolio);
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app(&dir);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(!press(&mut app, KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Normal);
        press(&mut app, KeyCode::Char('q'));
        assert!(press(&mut app, KeyCode::Char('y')));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_search_mode_captures_letters() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app(&dir);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('/'));
        // Letters that are normally shortcuts are typed into the query
        for c in "tax".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.state, AppState::Searching);
        assert_eq!(app.current_list().query(), "tax");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.current_list().filtered_count(), 2);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.current_list().filtered_count(), 12);
    }

    #[test]
    fn test_selection_and_view_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app(&dir);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.current_list().selected_count(), 1);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.current_list().selected_count(), 8);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.current_list().selected_count(), 1);

        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.current_list().view_mode(), ViewMode::Grid);
    }

    #[test]
    fn test_bulk_overlay_cancels() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app(&dir);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('A'));
        press(&mut app, KeyCode::Char('x'));
        assert!(matches!(app.state, AppState::ConfirmingBulk(_)));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
        assert!(!app.bulk_in_flight);
    }
}
