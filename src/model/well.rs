use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned well identifier
pub type WellId = u32;

/// Lifecycle status of a well record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
    Archived,
}

impl WellStatus {
    pub const ALL: [WellStatus; 4] = [
        WellStatus::Draft,
        WellStatus::InProgress,
        WellStatus::Completed,
        WellStatus::Archived,
    ];

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            WellStatus::Draft => "Draft",
            WellStatus::InProgress => "In Progress",
            WellStatus::Completed => "Completed",
            WellStatus::Archived => "Archived",
        }
    }

    /// The status after this one, wrapping around (used by the status picker)
    pub fn next(self) -> WellStatus {
        match self {
            WellStatus::Draft => WellStatus::InProgress,
            WellStatus::InProgress => WellStatus::Completed,
            WellStatus::Completed => WellStatus::Archived,
            WellStatus::Archived => WellStatus::Draft,
        }
    }
}

impl std::fmt::Display for WellStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One section of the drilled hole, depths in metres measured depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleSection {
    pub name: String,
    pub top_md: f64,
    pub bottom_md: f64,
}

impl HoleSection {
    pub fn length(&self) -> f64 {
        self.bottom_md - self.top_md
    }
}

/// A well record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Well {
    pub id: WellId,
    pub name: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub block: String,
    #[serde(default)]
    pub status: WellStatus,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub spud_date: DateTime<Utc>,
    /// Hole sections, top to bottom
    #[serde(default)]
    pub geometry: Vec<HoleSection>,
}

impl Well {
    /// A blank draft well, every timestamp set to `now`
    pub fn new_draft(id: WellId, now: DateTime<Utc>) -> Self {
        Well {
            id,
            name: format!("New Well {}", id),
            operator: String::new(),
            field: String::new(),
            block: String::new(),
            status: WellStatus::Draft,
            created_at: now,
            last_modified: now,
            spud_date: now,
            geometry: Vec::new(),
        }
    }

    /// Record that the content changed at `now`
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_modified = now;
    }

    /// Deepest bottom across all sections, if any
    pub fn total_depth(&self) -> Option<f64> {
        self.geometry
            .iter()
            .map(|s| s.bottom_md)
            .fold(None, |acc, d| Some(acc.map_or(d, |a: f64| a.max(d))))
    }
}
