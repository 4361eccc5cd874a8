use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::nav::ViewKind;
use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;
use crate::views::AppView;

const HOME_HINT: &str = "/ search  s sort  v view  n new  Enter edit  g geometry  q quit";
const WELL_DATA_HINT: &str = "Tab next  Enter edit  w save  r revert  g geometry  Esc home";
const GEOMETRY_HINT: &str = "a add  x remove  +/- depth  w save  e data  Esc home";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let line = match app.mode {
        Mode::Navigate => {
            if let Some(err) = app.save_error() {
                Line::from(Span::styled(
                    format!(" Save failed: {}", err),
                    Style::default().fg(app.theme.red).bg(bg),
                ))
            } else if let Some(ref msg) = app.status_message {
                Line::from(Span::styled(
                    format!(" {}", msg),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ))
            } else {
                let hint = match app.view_state().kind() {
                    ViewKind::Home => HOME_HINT,
                    ViewKind::WellData => WELL_DATA_HINT,
                    ViewKind::Geometry => GEOMETRY_HINT,
                };
                Line::from(Span::styled(format!(" {}", hint), dim))
            }
        }
        Mode::Search => prompt_line(app, format!("/{}", app.edit_buffer), "Enter keep  Esc cancel", width),
        Mode::Edit => {
            let label = app
                .with_current(|view| match view {
                    AppView::WellData(form) => form.focus.label(),
                    _ => "Value",
                })
                .unwrap_or("Value");
            prompt_line(
                app,
                format!("{}: {}", label, app.edit_buffer),
                "Enter apply  Esc cancel",
                width,
            )
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Prompt text with a block cursor, and a right-aligned hint when it fits
fn prompt_line<'a>(app: &App, prompt: String, hint: &'a str, width: usize) -> Line<'a> {
    let bg = app.theme.background;
    let mut spans = vec![
        Span::styled(prompt, Style::default().fg(app.theme.text_bright).bg(bg)),
        Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
    ];
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::{sample_wells, test_app};
    use crate::tui::render::test_helpers::*;
    use crate::views::WellDataField;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, app, area);
        })
    }

    #[test]
    fn navigate_shows_view_hints() {
        let app = test_app(sample_wells());
        assert_eq!(render(&app).trim(), HOME_HINT);
        app.open_well(1, ViewKind::Geometry);
        assert_eq!(render(&app).trim(), GEOMETRY_HINT);
    }

    #[test]
    fn status_message_replaces_hints() {
        let mut app = test_app(sample_wells());
        app.status_message = Some("Saved".into());
        assert_eq!(render(&app).trim(), "Saved");
    }

    #[test]
    fn save_error_takes_precedence() {
        let mut app = test_app(sample_wells());
        app.status_message = Some("Saved".into());
        *app.save_error.borrow_mut() = Some("disk full".into());
        assert_eq!(render(&app).trim(), "Save failed: disk full");
    }

    #[test]
    fn search_prompt_with_hint() {
        let mut app = test_app(sample_wells());
        app.mode = Mode::Search;
        app.edit_buffer = "troll".into();
        let output = render(&app);
        assert!(output.starts_with("/troll\u{258C}"));
        assert!(output.trim_end().ends_with("Enter keep  Esc cancel"));
    }

    #[test]
    fn edit_prompt_names_focused_field() {
        let mut app = test_app(sample_wells());
        app.open_well(2, ViewKind::WellData);
        app.with_current(|view| {
            if let AppView::WellData(form) = view {
                form.focus = WellDataField::Operator;
            }
        });
        app.mode = Mode::Edit;
        app.edit_buffer = "Aker".into();
        let output = render(&app);
        assert!(output.starts_with("Operator: Aker\u{258C}"));
        assert!(output.trim_end().ends_with("Enter apply  Esc cancel"));
    }
}
