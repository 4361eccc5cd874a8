use std::collections::HashSet;

use serde::Serialize;

use crate::model::well::{Well, WellStatus};

/// Aggregate counts over the whole store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub draft: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub archived: usize,
    /// Distinct non-blank operator names (exact match)
    pub distinct_operators: usize,
}

impl DashboardStats {
    pub fn compute(wells: &[Well]) -> Self {
        let mut stats = DashboardStats {
            total: wells.len(),
            ..Default::default()
        };
        let mut operators = HashSet::new();
        for well in wells {
            match well.status {
                WellStatus::Draft => stats.draft += 1,
                WellStatus::InProgress => stats.in_progress += 1,
                WellStatus::Completed => stats.completed += 1,
                WellStatus::Archived => stats.archived += 1,
            }
            if !well.operator.trim().is_empty() {
                operators.insert(well.operator.as_str());
            }
        }
        stats.distinct_operators = operators.len();
        stats
    }

    pub fn count(&self, status: WellStatus) -> usize {
        match status {
            WellStatus::Draft => self.draft,
            WellStatus::InProgress => self.in_progress,
            WellStatus::Completed => self.completed,
            WellStatus::Archived => self.archived,
        }
    }
}
