use serde::Serialize;

use crate::model::well::{HoleSection, Well, WellId, WellStatus};
use crate::ops::stats::DashboardStats;
use crate::util::unicode::fit_to_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct WellJson {
    pub id: WellId,
    pub name: String,
    pub operator: String,
    pub field: String,
    pub block: String,
    pub status: WellStatus,
    pub spud_date: String,
    pub last_modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_depth: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub geometry: Vec<HoleSection>,
}

#[derive(Serialize)]
pub struct WellListJson {
    pub search: String,
    pub sort: String,
    pub wells: Vec<WellJson>,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub project: String,
    #[serde(flatten)]
    pub stats: DashboardStats,
}

#[derive(Serialize)]
pub struct CreatedJson {
    pub id: WellId,
    pub name: String,
}

pub fn well_to_json(well: &Well) -> WellJson {
    WellJson {
        id: well.id,
        name: well.name.clone(),
        operator: well.operator.clone(),
        field: well.field.clone(),
        block: well.block.clone(),
        status: well.status,
        spud_date: well.spud_date.format("%Y-%m-%d").to_string(),
        last_modified: well.last_modified.to_rfc3339(),
        total_depth: well.total_depth(),
        geometry: well.geometry.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const NAME_COL: usize = 24;
const OPERATOR_COL: usize = 16;
const STATUS_COL: usize = 11;

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

/// One table row: id, name, operator, status, spud date
pub fn format_well_line(well: &Well) -> String {
    format!(
        "{:>4}  {}  {}  {}  {}",
        well.id,
        fit_to_width(&well.name, NAME_COL),
        fit_to_width(or_dash(&well.operator), OPERATOR_COL),
        fit_to_width(well.status.label(), STATUS_COL),
        well.spud_date.format("%Y-%m-%d")
    )
}

/// Full record view
pub fn format_well_detail(well: &Well) -> Vec<String> {
    let mut lines = vec![
        format!("{} (#{})", well.name, well.id),
        format!("  operator:  {}", or_dash(&well.operator)),
        format!("  field:     {}", or_dash(&well.field)),
        format!("  block:     {}", or_dash(&well.block)),
        format!("  status:    {}", well.status),
        format!("  spud:      {}", well.spud_date.format("%Y-%m-%d")),
        format!("  modified:  {}", well.last_modified.format("%Y-%m-%d %H:%M")),
    ];
    if well.geometry.is_empty() {
        lines.push("  geometry:  none".to_string());
    } else {
        lines.push("  geometry:".to_string());
        for section in &well.geometry {
            lines.push(format!(
                "    {:<12} {:>8.1} - {:>8.1} m",
                section.name, section.top_md, section.bottom_md
            ));
        }
        if let Some(td) = well.total_depth() {
            lines.push(format!("  total depth: {:.1} m", td));
        }
    }
    lines
}

/// Summary line used by `wb stats` and the dashboard header
pub fn format_stats(stats: &DashboardStats) -> String {
    format!(
        "{} wells: {} draft, {} in progress, {} completed, {} archived; {} operators",
        stats.total,
        stats.draft,
        stats.in_progress,
        stats.completed,
        stats.archived,
        stats.distinct_operators
    )
}
