use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::model::store::RecordStore;
use crate::model::well::{Well, WellId, WellStatus};
use crate::nav::WellView;

/// Editable fields of the well data form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellDataField {
    Name,
    Operator,
    Field,
    Block,
    Status,
    SpudDate,
}

impl WellDataField {
    pub const ALL: [WellDataField; 6] = [
        WellDataField::Name,
        WellDataField::Operator,
        WellDataField::Field,
        WellDataField::Block,
        WellDataField::Status,
        WellDataField::SpudDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WellDataField::Name => "Well Name",
            WellDataField::Operator => "Operator",
            WellDataField::Field => "Field",
            WellDataField::Block => "Block",
            WellDataField::Status => "Status",
            WellDataField::SpudDate => "Spud Date",
        }
    }

    fn index(self) -> usize {
        WellDataField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> WellDataField {
        WellDataField::ALL[(self.index() + 1) % WellDataField::ALL.len()]
    }

    pub fn prev(self) -> WellDataField {
        let len = WellDataField::ALL.len();
        WellDataField::ALL[(self.index() + len - 1) % len]
    }
}

/// Rejected field input
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("well name cannot be empty")]
    EmptyName,
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("unknown status '{0}'")]
    InvalidStatus(String),
}

/// The editable subset of a well record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WellDraft {
    pub name: String,
    pub operator: String,
    pub field: String,
    pub block: String,
    pub status: WellStatus,
    pub spud_date: DateTime<Utc>,
}

impl WellDraft {
    pub fn from_well(well: &Well) -> Self {
        WellDraft {
            name: well.name.clone(),
            operator: well.operator.clone(),
            field: well.field.clone(),
            block: well.block.clone(),
            status: well.status,
            spud_date: well.spud_date,
        }
    }

    pub fn apply_to(&self, well: &mut Well) {
        well.name = self.name.clone();
        well.operator = self.operator.clone();
        well.field = self.field.clone();
        well.block = self.block.clone();
        well.status = self.status;
        well.spud_date = self.spud_date;
    }
}

/// Data-entry form bound to one well
#[derive(Debug, Clone)]
pub struct WellDataView {
    well_id: Option<WellId>,
    draft: WellDraft,
    saved: WellDraft,
    pub focus: WellDataField,
}

impl Default for WellDataView {
    fn default() -> Self {
        WellDataView {
            well_id: None,
            draft: WellDraft::default(),
            saved: WellDraft::default(),
            focus: WellDataField::Name,
        }
    }
}

impl WellDataView {
    pub fn well_id(&self) -> Option<WellId> {
        self.well_id
    }

    pub fn draft(&self) -> &WellDraft {
        &self.draft
    }

    /// Display text for a field
    pub fn field_value(&self, field: WellDataField) -> String {
        match field {
            WellDataField::Name => self.draft.name.clone(),
            WellDataField::Operator => self.draft.operator.clone(),
            WellDataField::Field => self.draft.field.clone(),
            WellDataField::Block => self.draft.block.clone(),
            WellDataField::Status => self.draft.status.label().to_string(),
            WellDataField::SpudDate => self.draft.spud_date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Set a field from typed text
    pub fn set_field(&mut self, field: WellDataField, input: &str) -> Result<(), FieldError> {
        match field {
            WellDataField::Name => {
                let name = input.trim();
                if name.is_empty() {
                    return Err(FieldError::EmptyName);
                }
                self.draft.name = name.to_string();
            }
            WellDataField::Operator => self.draft.operator = input.trim().to_string(),
            WellDataField::Field => self.draft.field = input.trim().to_string(),
            WellDataField::Block => self.draft.block = input.trim().to_string(),
            WellDataField::Status => {
                let wanted = input.trim();
                self.draft.status = WellStatus::ALL
                    .iter()
                    .copied()
                    .find(|s| s.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| FieldError::InvalidStatus(wanted.to_string()))?;
            }
            WellDataField::SpudDate => {
                let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
                    .map_err(|_| FieldError::InvalidDate(input.trim().to_string()))?;
                // Keep the time of day already on record
                let time = self.draft.spud_date.time();
                self.draft.spud_date = date.and_time(time).and_utc();
            }
        }
        Ok(())
    }

    pub fn cycle_status(&mut self) {
        self.draft.status = self.draft.status.next();
    }

    /// Throw away edits since the last load/save
    pub fn revert(&mut self) {
        self.draft = self.saved.clone();
    }
}

impl WellView for WellDataView {
    fn load(&mut self, well: &Well) {
        self.well_id = Some(well.id);
        self.draft = WellDraft::from_well(well);
        self.saved = self.draft.clone();
        self.focus = WellDataField::Name;
    }

    fn has_unsaved_edits(&self) -> bool {
        self.well_id.is_some() && self.draft != self.saved
    }

    fn save_to_record(&mut self, store: &mut RecordStore) {
        let Some(id) = self.well_id else {
            return;
        };
        let draft = self.draft.clone();
        let now = Utc::now();
        let found = store.update(id, |well| {
            draft.apply_to(well);
            well.touch(now);
        });
        if !found {
            debug!(well_id = id, "well removed before its data could be saved");
        }
        self.saved = draft;
    }
}
