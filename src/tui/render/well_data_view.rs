use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::nav::WellView;
use crate::tui::app::{App, Mode};
use crate::views::{AppView, WellDataField};

/// Width of the label column
const LABEL_COL: usize = 12;

/// Render the data-entry form for the bound well
pub fn render_well_data_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let views = app.views.borrow();
    let Some(AppView::WellData(form)) = views.current_view() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut title = vec![Span::styled(
        format!(" {}", form.draft().name),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(id) = form.well_id() {
        title.push(Span::styled(format!(" #{}", id), Style::default().fg(app.theme.dim).bg(bg)));
    }
    if form.has_unsaved_edits() {
        title.push(Span::styled("  [unsaved]", Style::default().fg(app.theme.yellow).bg(bg)));
    }
    lines.push(Line::from(title));
    lines.push(Line::from(""));

    for field in WellDataField::ALL {
        let focused = field == form.focus;
        let row_bg = if focused { app.theme.selection_bg } else { bg };
        let label_style = Style::default().fg(app.theme.dim).bg(row_bg);
        let value_style = if focused {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };

        let mut spans = vec![
            Span::styled(if focused { " \u{25B8} " } else { "   " }, Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(format!("{:<width$}", field.label(), width = LABEL_COL), label_style),
        ];
        if focused && app.mode == Mode::Edit {
            spans.push(Span::styled(app.edit_buffer.clone(), value_style));
            spans.push(Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(row_bg)));
        } else if field == WellDataField::Status {
            spans.push(Span::styled(
                form.field_value(field),
                value_style.fg(app.theme.status_color(form.draft().status)),
            ));
        } else {
            spans.push(Span::styled(form.field_value(field), value_style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
