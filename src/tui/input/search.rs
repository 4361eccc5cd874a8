use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};
use crate::util::unicode::pop_grapheme;

/// Live search: every keystroke updates the dashboard filter
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel: restore what was there before `/`
        KeyCode::Esc => {
            let before = std::mem::take(&mut app.search_before);
            app.dashboard.set_search_text(before);
            app.edit_buffer.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            app.search_before.clear();
            app.edit_buffer.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            pop_grapheme(&mut app.edit_buffer);
            app.dashboard.set_search_text(app.edit_buffer.clone());
        }
        KeyCode::Char(c) => {
            app.edit_buffer.push(c);
            app.dashboard.set_search_text(app.edit_buffer.clone());
        }
        _ => return,
    }
    // Keep the cursor on a visible row
    let visible = app.dashboard.visible_count();
    app.with_current(|view| {
        if let crate::views::AppView::Home(home) = view {
            home.clamp(visible);
        }
    });
}

#[cfg(test)]
mod tests {
    use crate::tui::app::Mode;
    use crate::tui::app::tests::{sample_wells, test_app};
    use crate::tui::input::tests::{press, type_str};
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn typing_filters_live() {
        let mut app = test_app(sample_wells());
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        type_str(&mut app, "equi");
        assert_eq!(app.dashboard.search_text(), "equi");
        assert_eq!(app.dashboard.visible_ids(), vec![1, 3]);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.dashboard.search_text(), "equ");
    }

    #[test]
    fn enter_keeps_filter_and_esc_restores() {
        let mut app = test_app(sample_wells());
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "brent");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.dashboard.visible_ids(), vec![2]);

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.edit_buffer, "brent");
        type_str(&mut app, "zzz");
        assert_eq!(app.dashboard.visible_count(), 0);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.dashboard.search_text(), "brent");
        assert_eq!(app.dashboard.visible_ids(), vec![2]);
    }

    #[test]
    fn cursor_clamped_when_results_shrink() {
        let mut app = test_app(sample_wells());
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "shell");
        assert_eq!(app.selected_well_id(), Some(2));
    }
}
