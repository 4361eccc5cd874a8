use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::well::Well;

/// Which record field a sort key orders by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    LastModified,
    SpudDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The six dashboard sort options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    #[default]
    LastModifiedNewest,
    LastModifiedOldest,
    SpudDateNewest,
    SpudDateOldest,
}

impl SortKey {
    /// In the order the dashboard offers them
    pub const ALL: [SortKey; 6] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::LastModifiedNewest,
        SortKey::LastModifiedOldest,
        SortKey::SpudDateNewest,
        SortKey::SpudDateOldest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::NameAsc => "Well Name (A-Z)",
            SortKey::NameDesc => "Well Name (Z-A)",
            SortKey::LastModifiedNewest => "Last Modified (Newest)",
            SortKey::LastModifiedOldest => "Last Modified (Oldest)",
            SortKey::SpudDateNewest => "Spud Date (Newest)",
            SortKey::SpudDateOldest => "Spud Date (Oldest)",
        }
    }

    /// Command-line spelling
    pub fn slug(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::LastModifiedNewest => "modified-newest",
            SortKey::LastModifiedOldest => "modified-oldest",
            SortKey::SpudDateNewest => "spud-newest",
            SortKey::SpudDateOldest => "spud-oldest",
        }
    }

    pub fn field(self) -> SortField {
        match self {
            SortKey::NameAsc | SortKey::NameDesc => SortField::Name,
            SortKey::LastModifiedNewest | SortKey::LastModifiedOldest => SortField::LastModified,
            SortKey::SpudDateNewest | SortKey::SpudDateOldest => SortField::SpudDate,
        }
    }

    pub fn direction(self) -> SortDirection {
        match self {
            SortKey::NameAsc | SortKey::LastModifiedOldest | SortKey::SpudDateOldest => {
                SortDirection::Ascending
            }
            SortKey::NameDesc | SortKey::LastModifiedNewest | SortKey::SpudDateNewest => {
                SortDirection::Descending
            }
        }
    }

    /// The option after this one, wrapping around
    pub fn next(self) -> SortKey {
        let idx = SortKey::ALL.iter().position(|k| *k == self).unwrap_or(0);
        SortKey::ALL[(idx + 1) % SortKey::ALL.len()]
    }

    /// Order two wells by this key (ties compare equal)
    pub fn compare(self, a: &Well, b: &Well) -> Ordering {
        let ord = match self.field() {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::LastModified => a.last_modified.cmp(&b.last_modified),
            SortField::SpudDate => a.spud_date.cmp(&b.spud_date),
        };
        match self.direction() {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// Accepts the slug (`name-asc`) or the label (`Well Name (A-Z)`), any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortKey::ALL
            .iter()
            .copied()
            .find(|k| k.slug().eq_ignore_ascii_case(wanted) || k.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let valid: Vec<&str> = SortKey::ALL.iter().map(|k| k.slug()).collect();
                format!("unknown sort key '{}' (expected one of: {})", s, valid.join(", "))
            })
    }
}

/// Search text plus sort key; session-local view state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub sort_key: SortKey,
}

/// Whether `well` passes the search filter.
///
/// Empty or whitespace-only text matches everything. Otherwise the text, as
/// typed, must be a case-insensitive substring of name, operator, field or block.
pub fn matches_search(well: &Well, search_text: &str) -> bool {
    if search_text.trim().is_empty() {
        return true;
    }
    let needle = search_text.to_lowercase();
    [&well.name, &well.operator, &well.field, &well.block]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Indices into `wells` of the records passing the filter, in sort order.
///
/// The sort is stable, so equal keys keep store order.
pub fn project_indices(wells: &[Well], criteria: &FilterCriteria) -> Vec<usize> {
    let mut rows: Vec<usize> = wells
        .iter()
        .enumerate()
        .filter(|(_, w)| matches_search(w, &criteria.search_text))
        .map(|(i, _)| i)
        .collect();
    rows.sort_by(|&a, &b| criteria.sort_key.compare(&wells[a], &wells[b]));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap()
    }

    fn well(id: u32, name: &str, modified: u32, spud: u32) -> Well {
        let mut w = Well::new_draft(id, at(1));
        w.name = name.to_string();
        w.last_modified = at(modified);
        w.spud_date = at(spud);
        w
    }

    fn names(wells: &[Well], rows: &[usize]) -> Vec<String> {
        rows.iter().map(|&i| wells[i].name.clone()).collect()
    }

    #[test]
    fn empty_and_blank_search_match_everything() {
        let w = well(1, "Alpha", 1, 1);
        assert!(matches_search(&w, ""));
        assert!(matches_search(&w, "   "));
        assert!(matches_search(&w, "\t"));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut w = well(1, "Alpha-1", 1, 1);
        w.operator = "Shell".into();
        w.field = "Troll".into();
        w.block = "31/2".into();

        assert!(matches_search(&w, "shell"));
        assert!(matches_search(&w, "SHELL"));
        assert!(matches_search(&w, "tRoLl"));
        assert!(matches_search(&w, "31/"));
        assert!(matches_search(&w, "alpha"));
        assert!(!matches_search(&w, "equinor"));
    }

    #[test]
    fn search_text_is_not_trimmed() {
        let w = well(1, "Alpha", 1, 1);
        assert!(!matches_search(&w, "alp "));
    }

    #[test]
    fn name_sort_ignores_case() {
        let wells = vec![well(1, "bravo", 1, 1), well(2, "Alpha", 1, 1), well(3, "charlie", 1, 1)];
        let criteria = FilterCriteria {
            sort_key: SortKey::NameAsc,
            ..Default::default()
        };
        assert_eq!(names(&wells, &project_indices(&wells, &criteria)), vec!["Alpha", "bravo", "charlie"]);

        let criteria = FilterCriteria {
            sort_key: SortKey::NameDesc,
            ..Default::default()
        };
        assert_eq!(names(&wells, &project_indices(&wells, &criteria)), vec!["charlie", "bravo", "Alpha"]);
    }

    #[test]
    fn date_sorts_follow_direction() {
        let wells = vec![well(1, "A", 2, 9), well(2, "B", 5, 3), well(3, "C", 1, 6)];
        let order = |key| {
            let criteria = FilterCriteria {
                sort_key: key,
                ..Default::default()
            };
            names(&wells, &project_indices(&wells, &criteria))
        };
        assert_eq!(order(SortKey::LastModifiedNewest), vec!["B", "A", "C"]);
        assert_eq!(order(SortKey::LastModifiedOldest), vec!["C", "A", "B"]);
        assert_eq!(order(SortKey::SpudDateNewest), vec!["A", "C", "B"]);
        assert_eq!(order(SortKey::SpudDateOldest), vec!["B", "C", "A"]);
    }

    #[test]
    fn every_sort_key_is_stable() {
        // All keys tie; both directions must keep store order
        let wells = vec![
            well(4, "same", 3, 3),
            well(1, "SAME", 3, 3),
            well(9, "Same", 3, 3),
        ];
        for key in SortKey::ALL {
            let criteria = FilterCriteria {
                sort_key: key,
                ..Default::default()
            };
            assert_eq!(project_indices(&wells, &criteria), vec![0, 1, 2], "{}", key);
        }
    }

    #[test]
    fn ties_keep_store_order_among_distinct_keys() {
        let wells = vec![
            well(1, "x1", 2, 1),
            well(2, "x2", 7, 1),
            well(3, "x3", 2, 1),
            well(4, "x4", 7, 1),
        ];
        let criteria = FilterCriteria::default();
        assert_eq!(names(&wells, &project_indices(&wells, &criteria)), vec!["x2", "x4", "x1", "x3"]);
    }

    #[test]
    fn filter_then_sort() {
        let wells = vec![well(1, "Alpha", 1, 1), well(2, "Beta", 2, 1), well(3, "Alpine", 3, 1)];
        let criteria = FilterCriteria {
            search_text: "ALP".into(),
            sort_key: SortKey::NameAsc,
        };
        assert_eq!(names(&wells, &project_indices(&wells, &criteria)), vec!["Alpha", "Alpine"]);
    }

    #[test]
    fn sort_key_parses_slug_and_label() {
        assert_eq!("name-asc".parse::<SortKey>(), Ok(SortKey::NameAsc));
        assert_eq!("SPUD-OLDEST".parse::<SortKey>(), Ok(SortKey::SpudDateOldest));
        assert_eq!("Last Modified (Newest)".parse::<SortKey>(), Ok(SortKey::LastModifiedNewest));
        let err = "sideways".parse::<SortKey>().unwrap_err();
        assert!(err.contains("name-asc"));
    }

    #[test]
    fn default_sort_is_last_modified_newest() {
        assert_eq!(SortKey::default(), SortKey::LastModifiedNewest);
        assert_eq!(SortKey::default().label(), "Last Modified (Newest)");
    }

    #[test]
    fn next_cycles_through_all_keys() {
        let mut key = SortKey::NameAsc;
        let mut seen = vec![key];
        for _ in 0..5 {
            key = key.next();
            seen.push(key);
        }
        assert_eq!(seen, SortKey::ALL.to_vec());
        assert_eq!(key.next(), SortKey::NameAsc);
    }
}
