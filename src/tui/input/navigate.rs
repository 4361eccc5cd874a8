use crossterm::event::{KeyCode, KeyEvent};

use crate::nav::ViewKind;
use crate::tui::app::{App, Mode};
use crate::views::{AppView, GeometryView, WellDataField};

/// Metres added to or taken off a section bottom per keypress
const DEPTH_STEP: f64 = 10.0;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match app.view_state().kind() {
        ViewKind::Home => handle_home(app, key),
        ViewKind::WellData => handle_well_data(app, key),
        ViewKind::Geometry => handle_geometry(app, key),
    }
}

fn move_home_cursor(app: &App, delta: isize) {
    let visible = app.dashboard.visible_count();
    app.with_current(|view| {
        if let AppView::Home(home) = view {
            home.move_by(delta, visible);
        }
    });
}

fn handle_home(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => move_home_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_home_cursor(app, -1),
        KeyCode::Char('/') => {
            app.search_before = app.dashboard.search_text().to_string();
            app.edit_buffer = app.search_before.clone();
            app.mode = Mode::Search;
        }
        KeyCode::Char('s') => {
            let next = app.dashboard.sort_key().next();
            app.dashboard.set_sort_key(next);
            app.status_message = Some(format!("Sort: {}", next.label()));
        }
        KeyCode::Char('c') => {
            app.dashboard.clear_filters();
            app.status_message = Some("Filters cleared".to_string());
        }
        KeyCode::Char('v') => app.dashboard.toggle_view(),
        KeyCode::Char('n') => match app.dashboard.create_new_well() {
            Ok(id) => app.bus.request_well_data(id),
            Err(e) => app.status_message = Some(format!("Cannot create well: {}", e)),
        },
        KeyCode::Enter => {
            if let Some(id) = app.selected_well_id() {
                app.open_well(id, ViewKind::WellData);
            }
        }
        KeyCode::Char('g') => {
            if let Some(id) = app.selected_well_id() {
                app.open_well(id, ViewKind::Geometry);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_well_id()
                && let Some(removed) = app.dashboard.remove_well(id)
            {
                app.status_message = Some(format!("Removed {}", removed.name));
                move_home_cursor(app, 0);
            }
        }
        _ => {}
    }
}

fn handle_well_data(app: &mut App, key: KeyEvent) {
    let well_id = app.view_state().well_id();
    match key.code {
        KeyCode::Esc => app.go_home(),
        KeyCode::Tab | KeyCode::Char('j') | KeyCode::Down => {
            app.with_current(|view| {
                if let AppView::WellData(form) = view {
                    form.focus = form.focus.next();
                }
            });
        }
        KeyCode::BackTab | KeyCode::Char('k') | KeyCode::Up => {
            app.with_current(|view| {
                if let AppView::WellData(form) = view {
                    form.focus = form.focus.prev();
                }
            });
        }
        KeyCode::Enter => {
            let editing = app.with_current(|view| match view {
                AppView::WellData(form) if form.focus == WellDataField::Status => {
                    form.cycle_status();
                    None
                }
                AppView::WellData(form) => Some(form.field_value(form.focus)),
                _ => None,
            });
            if let Some(Some(value)) = editing {
                app.edit_buffer = value;
                app.mode = Mode::Edit;
            }
        }
        KeyCode::Char('r') => {
            app.with_current(|view| {
                if let AppView::WellData(form) = view {
                    form.revert();
                }
            });
        }
        KeyCode::Char('w') => app.save_current(),
        KeyCode::Char('g') => {
            if let Some(id) = well_id {
                app.bus.request_geometry(id);
            }
        }
        _ => {}
    }
}

fn edit_geometry(app: &App, f: impl FnOnce(&mut GeometryView)) {
    app.with_current(|view| {
        if let AppView::Geometry(geometry) = view {
            f(geometry);
        }
    });
}

fn handle_geometry(app: &mut App, key: KeyEvent) {
    let well_id = app.view_state().well_id();
    match key.code {
        KeyCode::Esc => app.go_home(),
        KeyCode::Char('j') | KeyCode::Down => edit_geometry(app, |g| g.move_cursor(1)),
        KeyCode::Char('k') | KeyCode::Up => edit_geometry(app, |g| g.move_cursor(-1)),
        KeyCode::Char('a') => edit_geometry(app, |g| g.add_section()),
        KeyCode::Char('x') => edit_geometry(app, |g| g.remove_selected()),
        KeyCode::Char('+') | KeyCode::Char('=') => edit_geometry(app, |g| g.adjust_bottom(DEPTH_STEP)),
        KeyCode::Char('-') => edit_geometry(app, |g| g.adjust_bottom(-DEPTH_STEP)),
        KeyCode::Char('w') => app.save_current(),
        KeyCode::Char('e') => {
            if let Some(id) = well_id {
                app.bus.request_well_data(id);
            }
        }
        _ => {}
    }
}
