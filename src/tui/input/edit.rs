use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};
use crate::util::unicode::pop_grapheme;
use crate::views::AppView;

/// Single-line editing of the focused Well Data field
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.edit_buffer.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.edit_buffer);
            let result = app.with_current(|view| match view {
                AppView::WellData(form) => form.set_field(form.focus, &input),
                _ => Ok(()),
            });
            if let Some(Err(e)) = result {
                app.status_message = Some(e.to_string());
            }
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => pop_grapheme(&mut app.edit_buffer),
        KeyCode::Char(c) => app.edit_buffer.push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::nav::ViewKind;
    use crate::tui::app::Mode;
    use crate::tui::app::tests::{sample_wells, test_app};
    use crate::tui::input::tests::{press, type_str};
    use crate::views::AppView;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    fn start_editing_spud_date(app: &mut crate::tui::app::App) {
        app.open_well(1, ViewKind::WellData);
        for _ in 0..5 {
            press(app, KeyCode::Tab);
        }
        press(app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.edit_buffer, "2024-05-03");
        app.edit_buffer.clear();
    }

    #[test]
    fn invalid_input_reports_and_keeps_draft() {
        let mut app = test_app(sample_wells());
        start_editing_spud_date(&mut app);
        type_str(&mut app, "yesterday");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(
            app.status_message.as_deref(),
            Some("invalid date 'yesterday' (expected YYYY-MM-DD)")
        );
        assert!(matches!(
            app.views.borrow().current_view(),
            Some(AppView::WellData(form)) if form.field_value(form.focus) == "2024-05-03"
        ));
    }

    #[test]
    fn esc_discards_typed_text() {
        let mut app = test_app(sample_wells());
        start_editing_spud_date(&mut app);
        type_str(&mut app, "2025-01-01");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.edit_buffer.is_empty());
        let dirty = crate::nav::WellView::has_unsaved_edits(
            app.views.borrow().current_view().unwrap(),
        );
        assert!(!dirty);
    }

    #[test]
    fn valid_date_updates_draft() {
        let mut app = test_app(sample_wells());
        start_editing_spud_date(&mut app);
        type_str(&mut app, "2023-11-30");
        press(&mut app, KeyCode::Enter);
        assert!(app.status_message.is_none());
        press(&mut app, KeyCode::Esc);
        let spud = app.dashboard.store().borrow().get(1).unwrap().spud_date;
        assert_eq!(spud.format("%Y-%m-%d").to_string(), "2023-11-30");
    }
}
