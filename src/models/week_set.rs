//! Semester week sets
//!
//! A reservation either covers the whole semester or an explicit list of
//! week numbers (1-based). Everything that compares reservations resolves a
//! week set against the semester's week count first.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Weeks of a semester during which a reservation is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeekSet {
    /// Every week of the semester
    FullSemester,
    /// Only the listed week numbers
    Weeks {
        #[schema(value_type = Vec<u16>)]
        weeks: BTreeSet<u16>,
    },
}

impl WeekSet {
    pub fn weeks<I: IntoIterator<Item = u16>>(weeks: I) -> Self {
        WeekSet::Weeks {
            weeks: weeks.into_iter().collect(),
        }
    }

    pub fn is_full_semester(&self) -> bool {
        matches!(self, WeekSet::FullSemester)
    }

    /// Concrete week numbers for a semester of `total_weeks` weeks.
    /// Explicit weeks outside `1..=total_weeks` are dropped.
    pub fn resolve(&self, total_weeks: u16) -> BTreeSet<u16> {
        match self {
            WeekSet::FullSemester => (1..=total_weeks).collect(),
            WeekSet::Weeks { weeks } => weeks
                .iter()
                .copied()
                .filter(|w| (1..=total_weeks).contains(w))
                .collect(),
        }
    }

    /// Resolve a requested week set, rejecting anything that cannot be checked.
    pub fn resolve_request(&self, total_weeks: u16) -> AppResult<BTreeSet<u16>> {
        if total_weeks == 0 {
            return Err(AppError::Validation(
                "Semester has no weeks to check".to_string(),
            ));
        }
        if let WeekSet::Weeks { weeks } = self {
            if weeks.is_empty() {
                return Err(AppError::Validation(
                    "At least one week must be selected".to_string(),
                ));
            }
            if let Some(bad) = weeks.iter().find(|w| **w == 0 || **w > total_weeks) {
                return Err(AppError::Validation(format!(
                    "Week {} is outside the semester (1-{})",
                    bad, total_weeks
                )));
            }
        }
        Ok(self.resolve(total_weeks))
    }

    /// Weeks shared with `requested`, ascending
    pub fn intersection(&self, requested: &BTreeSet<u16>, total_weeks: u16) -> Vec<u16> {
        self.resolve(total_weeks)
            .intersection(requested)
            .copied()
            .collect()
    }
}

/// Format week numbers as compact ranges, e.g. `1-3, 5, 7-8`
pub fn format_week_ranges<'a, I: IntoIterator<Item = &'a u16>>(weeks: I) -> String {
    let sorted: BTreeSet<u16> = weeks.into_iter().copied().collect();
    let mut ranges: Vec<String> = Vec::new();
    let mut iter = sorted.into_iter();

    let Some(first) = iter.next() else {
        return String::new();
    };
    let (mut start, mut end) = (first, first);

    for week in iter {
        if week == end + 1 {
            end = week;
            continue;
        }
        ranges.push(range_label(start, end));
        start = week;
        end = week;
    }
    ranges.push(range_label(start, end));

    ranges.join(", ")
}

fn range_label(start: u16, end: u16) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}
