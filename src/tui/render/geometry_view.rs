use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::nav::WellView;
use crate::tui::app::App;
use crate::util::unicode::fit_to_width;
use crate::views::AppView;

const NAME_COL: usize = 16;

/// Render the hole-section table for the bound well
pub fn render_geometry_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let views = app.views.borrow();
    let Some(AppView::Geometry(geometry)) = views.current_view() else {
        return;
    };
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    let mut title = vec![Span::styled(
        format!(" {} geometry", geometry.well_name()),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if geometry.has_unsaved_edits() {
        title.push(Span::styled("  [unsaved]", Style::default().fg(app.theme.yellow).bg(bg)));
    }
    lines.push(Line::from(title));
    lines.push(Line::from(""));

    if geometry.sections().is_empty() {
        lines.push(Line::from(Span::styled(" No hole sections. Press a to add one.", dim)));
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    lines.push(Line::from(Span::styled(
        format!(
            "   {} {:>10} {:>10} {:>10}",
            fit_to_width("Section", NAME_COL),
            "Top (m)",
            "Bottom (m)",
            "Length (m)"
        ),
        dim,
    )));
    for (i, section) in geometry.sections().iter().enumerate() {
        let selected = i == geometry.cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };
        let fg = if selected { app.theme.text_bright } else { app.theme.text };
        lines.push(Line::from(vec![
            Span::styled(
                if selected { " \u{25B8} " } else { "   " },
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ),
            Span::styled(
                format!(
                    "{} {:>10.1} {:>10.1} {:>10.1}",
                    fit_to_width(&section.name, NAME_COL),
                    section.top_md,
                    section.bottom_md,
                    section.length()
                ),
                Style::default().fg(fg).bg(row_bg),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" Total depth: {:.1} m", geometry.total_depth()),
        Style::default().fg(app.theme.text).bg(bg),
    )));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
