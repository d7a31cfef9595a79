//! Schedule models (semesters, weekly time slots)

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Semester
// ---------------------------------------------------------------------------

/// An academic semester
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Semester {
    pub id: Uuid,
    pub name: String,
    /// Academic year label, e.g. "2025-2026"
    pub academic_year: Option<String>,
    /// 1 or 2
    pub number: Option<i16>,
    /// Number of teaching weeks; the configured default applies when unset
    pub total_weeks: Option<i16>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Semester {
    /// Week count of this semester, falling back to `default_weeks`
    pub fn week_count(&self, default_weeks: u16) -> u16 {
        self.total_weeks
            .and_then(|w| u16::try_from(w).ok())
            .filter(|w| *w > 0)
            .unwrap_or(default_weeks)
    }
}

// ---------------------------------------------------------------------------
// TimeSlot
// ---------------------------------------------------------------------------

/// A recurring weekly period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TimeSlot {
    pub id: Uuid,
    /// Day of week (1=Monday, 5=Friday)
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// "mati" / "tarda"
    pub slot_type: Option<String>,
}

impl TimeSlot {
    /// Same day and intersecting time ranges. Touching ranges do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day_of_week == other.day_of_week
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }

    /// Whether this slot fully covers `[start, end)` on `day`
    pub fn covers(&self, day: i16, start: NaiveTime, end: NaiveTime) -> bool {
        self.day_of_week == day && self.start_time <= start && end <= self.end_time
    }

    pub fn is_well_formed(&self) -> bool {
        (1..=5).contains(&self.day_of_week) && self.start_time < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: i16, start: (u32, u32), end: (u32, u32)) -> TimeSlot {
        TimeSlot {
            id: Uuid::new_v4(),
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            slot_type: None,
        }
    }

    #[test]
    fn test_overlaps() {
        let afternoon = slot(1, (15, 0), (20, 30));
        assert!(afternoon.overlaps(&slot(1, (15, 0), (19, 30))));
        assert!(afternoon.overlaps(&slot(1, (9, 0), (15, 30))));
        assert!(!afternoon.overlaps(&slot(1, (9, 0), (15, 0))));
        assert!(!afternoon.overlaps(&slot(2, (15, 0), (20, 30))));
    }

    #[test]
    fn test_covers() {
        let morning = slot(2, (9, 0), (14, 30));
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let fourteen = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
        let fifteen = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
        assert!(morning.covers(2, nine, ten));
        assert!(!morning.covers(2, fourteen, fifteen));
        assert!(!morning.covers(3, nine, ten));
    }

    #[test]
    fn test_week_count_fallback() {
        let mut semester = Semester {
            id: Uuid::new_v4(),
            name: "Semestre 2".to_string(),
            academic_year: None,
            number: Some(2),
            total_weeks: None,
            start_date: None,
            end_date: None,
        };
        assert_eq!(semester.week_count(15), 15);
        semester.total_weeks = Some(13);
        assert_eq!(semester.week_count(15), 13);
        semester.total_weeks = Some(0);
        assert_eq!(semester.week_count(15), 15);
    }
}
