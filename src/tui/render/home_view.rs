use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use regex::Regex;

use crate::cli::output::format_stats;
use crate::model::well::Well;
use crate::tui::app::App;
use crate::util::unicode::fit_to_width;
use crate::views::AppView;

use super::push_highlighted_spans;

const NAME_COL: usize = 22;
const OPERATOR_COL: usize = 14;
const FIELD_COL: usize = 12;
const STATUS_COL: usize = 11;
/// Rows taken by one card, including the gap below it
const CARD_HEIGHT: usize = 4;

/// Render the dashboard: statistics, criteria, then the list or cards
pub fn render_home_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let wells = app.dashboard.visible_wells();
    let stats = app.dashboard.stats();
    let search_re = app.search_re();
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let text = Style::default().fg(app.theme.text).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(" {}", format_stats(&stats)),
        text.add_modifier(Modifier::BOLD),
    )));
    let search = app.dashboard.search_text();
    lines.push(Line::from(vec![
        Span::styled(" search: ", dim),
        Span::styled((if search.is_empty() { "-" } else { search }).to_string(), text),
        Span::styled("  sort: ", dim),
        Span::styled(app.dashboard.sort_key().label(), text),
        Span::styled(format!("  {} of {} shown", wells.len(), stats.total), dim),
    ]));
    lines.push(Line::from(""));
    let header_rows = lines.len();

    if wells.is_empty() {
        let msg = if stats.total == 0 {
            " No wells yet. Press n to create one."
        } else {
            " No wells match the current search."
        };
        lines.push(Line::from(Span::styled(msg, dim)));
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    let card_view = app.dashboard.is_card_view();
    let rows_per_item = if card_view { CARD_HEIGHT } else { 1 };
    let capacity = ((area.height as usize).saturating_sub(header_rows) / rows_per_item).max(1);

    let (cursor, offset) = {
        let mut views = app.views.borrow_mut();
        match views.current_view_mut() {
            Some(AppView::Home(home)) => {
                home.clamp(wells.len());
                home.scroll_into_view(capacity);
                (home.cursor, home.scroll_offset)
            }
            _ => (0, 0),
        }
    };

    for (i, well) in wells.iter().enumerate().skip(offset).take(capacity) {
        let selected = i == cursor;
        if card_view {
            lines.extend(card_lines(app, well, selected, search_re.as_ref()));
        } else {
            lines.push(list_line(app, well, selected, search_re.as_ref()));
        }
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn row_bg(app: &App, selected: bool) -> ratatui::style::Color {
    if selected { app.theme.selection_bg } else { app.theme.background }
}

fn list_line<'a>(app: &App, well: &Well, selected: bool, search_re: Option<&Regex>) -> Line<'a> {
    let bg = row_bg(app, selected);
    let base = Style::default().fg(app.theme.text).bg(bg);
    let name_style = if selected {
        base.fg(app.theme.text_bright).add_modifier(Modifier::BOLD)
    } else {
        base
    };
    let hl = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    let mut spans = vec![Span::styled(
        if selected { " \u{25B8} " } else { "   " },
        Style::default().fg(app.theme.highlight).bg(bg),
    )];
    push_highlighted_spans(&mut spans, &fit_to_width(&well.name, NAME_COL), name_style, hl, search_re);
    spans.push(Span::styled("  ", base));
    push_highlighted_spans(&mut spans, &fit_to_width(&well.operator, OPERATOR_COL), base, hl, search_re);
    spans.push(Span::styled("  ", base));
    push_highlighted_spans(&mut spans, &fit_to_width(&well.field, FIELD_COL), base, hl, search_re);
    spans.push(Span::styled("  ", base));
    spans.push(Span::styled(
        fit_to_width(well.status.label(), STATUS_COL),
        base.fg(app.theme.status_color(well.status)),
    ));
    spans.push(Span::styled("  ", base));
    spans.push(Span::styled(
        well.spud_date.format("%Y-%m-%d").to_string(),
        base.fg(app.theme.dim),
    ));
    Line::from(spans)
}

fn card_lines<'a>(app: &App, well: &Well, selected: bool, search_re: Option<&Regex>) -> Vec<Line<'a>> {
    let bg = row_bg(app, selected);
    let base = Style::default().fg(app.theme.text).bg(bg);
    let hl = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    let or_dash = |s: &str| if s.trim().is_empty() { "-".to_string() } else { s.to_string() };

    let mut title = vec![Span::styled(
        if selected { " \u{25B8} " } else { "   " },
        Style::default().fg(app.theme.highlight).bg(bg),
    )];
    push_highlighted_spans(
        &mut title,
        &well.name,
        base.fg(app.theme.text_bright).add_modifier(Modifier::BOLD),
        hl,
        search_re,
    );
    title.push(Span::styled(format!(" #{}", well.id), base.fg(app.theme.dim)));

    let mut place = vec![Span::styled("   ", base)];
    let detail = format!(
        "{} \u{00B7} {} \u{00B7} {}",
        or_dash(&well.operator),
        or_dash(&well.field),
        or_dash(&well.block)
    );
    push_highlighted_spans(&mut place, &detail, base, hl, search_re);

    let mut facts = vec![
        Span::styled("   ", base),
        Span::styled(well.status.label(), base.fg(app.theme.status_color(well.status))),
        Span::styled(format!("  spud {}", well.spud_date.format("%Y-%m-%d")), base.fg(app.theme.dim)),
    ];
    if let Some(td) = well.total_depth() {
        facts.push(Span::styled(format!("  TD {:.0} m", td), base.fg(app.theme.dim)));
    }

    vec![Line::from(title), Line::from(place), Line::from(facts), Line::from("")]
}
