//! Classroom reservations and the conflicts they cause

use std::collections::BTreeSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    schedule::TimeSlot,
    week_set::{format_week_ranges, WeekSet},
};

/// Where a booking comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReservationKind {
    /// A subject group's own assignment classroom
    Assignment,
    /// A classroom held for a whole subject group profile
    Profile,
}

impl ReservationKind {
    fn from_column(value: &str) -> Self {
        match value {
            "profile" => ReservationKind::Profile,
            _ => ReservationKind::Assignment,
        }
    }
}

/// A classroom booked for a time slot in a semester, either through an
/// assignment classroom row or a profile classroom assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Assignment id, or profile assignment id for [`ReservationKind::Profile`]
    pub assignment_id: Uuid,
    pub kind: ReservationKind,
    pub classroom_id: Uuid,
    pub semester_id: Uuid,
    pub time_slot: TimeSlot,
    pub weeks: WeekSet,
    /// Display only; the profile name for profile bookings
    pub subject_name: String,
    /// Display only
    pub group_code: Option<String>,
}

impl Reservation {
    /// Conflict caused by this reservation for `slot` during `requested` weeks, if any
    pub fn conflict_with(
        &self,
        slot: &TimeSlot,
        requested: &BTreeSet<u16>,
        total_weeks: u16,
    ) -> Option<ConflictDetail> {
        if !self.time_slot.overlaps(slot) {
            return None;
        }
        let weeks = self.weeks.intersection(requested, total_weeks);
        if weeks.is_empty() {
            return None;
        }
        Some(ConflictDetail {
            assignment_id: self.assignment_id,
            kind: self.kind,
            classroom_id: self.classroom_id,
            subject_name: self.subject_name.clone(),
            group_code: self.group_code.clone(),
            day_of_week: self.time_slot.day_of_week,
            start_time: self.time_slot.start_time,
            end_time: self.time_slot.end_time,
            conflicting_weeks: weeks,
        })
    }
}

/// Why a classroom is not available
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConflictDetail {
    pub assignment_id: Uuid,
    pub kind: ReservationKind,
    pub classroom_id: Uuid,
    pub subject_name: String,
    pub group_code: Option<String>,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Requested weeks already taken, ascending
    pub conflicting_weeks: Vec<u16>,
}

impl ConflictDetail {
    /// Human readable explanation, e.g. "Llenguatges Audiovisuals II (GR3) in weeks 3-4"
    pub fn describe(&self) -> String {
        let group = self
            .group_code
            .as_deref()
            .map(|g| format!(" ({})", g))
            .unwrap_or_default();
        format!(
            "{}{} in weeks {}",
            self.subject_name,
            group,
            format_week_ranges(&self.conflicting_weeks)
        )
    }
}

/// Reservation lookup parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationQuery {
    pub classroom_ids: Vec<Uuid>,
    pub semester_id: Uuid,
    /// Restrict to one weekday (1-5); `None` returns the whole week
    pub day_of_week: Option<i16>,
    /// Assignment or profile assignment being edited, never reported against itself
    pub exclude_assignment_id: Option<Uuid>,
}

/// Flat row as returned by the reservation query
#[derive(Debug, FromRow)]
pub struct ReservationRow {
    pub assignment_id: Uuid,
    /// `assignment` or `profile`
    pub source: String,
    pub classroom_id: Uuid,
    pub semester_id: Uuid,
    pub time_slot_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_type: Option<String>,
    pub is_full_semester: bool,
    pub week_numbers: Vec<i16>,
    pub subject_name: String,
    pub group_code: Option<String>,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        let explicit: BTreeSet<u16> = row
            .week_numbers
            .iter()
            .filter_map(|w| u16::try_from(*w).ok())
            .collect();

        // A partial reservation without week rows covers the whole semester
        let weeks = if row.is_full_semester || explicit.is_empty() {
            WeekSet::FullSemester
        } else {
            WeekSet::Weeks { weeks: explicit }
        };

        Reservation {
            assignment_id: row.assignment_id,
            kind: ReservationKind::from_column(&row.source),
            classroom_id: row.classroom_id,
            semester_id: row.semester_id,
            time_slot: TimeSlot {
                id: row.time_slot_id,
                day_of_week: row.day_of_week,
                start_time: row.start_time,
                end_time: row.end_time,
                slot_type: row.slot_type,
            },
            weeks,
            subject_name: row.subject_name,
            group_code: row.group_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(is_full_semester: bool, weeks: Vec<i16>) -> ReservationRow {
        ReservationRow {
            assignment_id: Uuid::new_v4(),
            source: "assignment".to_string(),
            classroom_id: Uuid::new_v4(),
            semester_id: Uuid::new_v4(),
            time_slot_id: Uuid::new_v4(),
            day_of_week: 1,
            start_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            slot_type: Some("tarda".to_string()),
            is_full_semester,
            week_numbers: weeks,
            subject_name: "Llenguatges Audiovisuals II".to_string(),
            group_code: Some("GR3".to_string()),
        }
    }

    #[test]
    fn test_row_week_sets() {
        assert_eq!(Reservation::from(row(true, vec![])).weeks, WeekSet::FullSemester);
        assert_eq!(Reservation::from(row(false, vec![])).weeks, WeekSet::FullSemester);
        assert_eq!(
            Reservation::from(row(false, vec![2, 1])).weeks,
            WeekSet::weeks([1, 2])
        );
    }

    #[test]
    fn test_conflict_with() {
        let reservation = Reservation::from(row(true, vec![]));
        let requested: BTreeSet<u16> = [3, 4].into_iter().collect();

        let conflict = reservation
            .conflict_with(&reservation.time_slot, &requested, 15)
            .expect("full semester reservation must conflict");
        assert_eq!(conflict.conflicting_weeks, vec![3, 4]);
        assert_eq!(conflict.describe(), "Llenguatges Audiovisuals II (GR3) in weeks 3-4");

        let mut other_day = reservation.time_slot.clone();
        other_day.day_of_week = 2;
        assert!(reservation.conflict_with(&other_day, &requested, 15).is_none());
    }

    #[test]
    fn test_profile_rows_keep_their_kind() {
        let mut profile = row(false, vec![5]);
        profile.source = "profile".to_string();
        profile.group_code = None;
        let reservation = Reservation::from(profile);
        assert_eq!(reservation.kind, ReservationKind::Profile);

        let requested: BTreeSet<u16> = [5].into_iter().collect();
        let conflict = reservation
            .conflict_with(&reservation.time_slot, &requested, 15)
            .expect("profile booking must conflict");
        assert_eq!(conflict.kind, ReservationKind::Profile);
        assert_eq!(Reservation::from(row(true, vec![])).kind, ReservationKind::Assignment);
    }

    #[test]
    fn test_disjoint_weeks_do_not_conflict() {
        let reservation = Reservation::from(row(false, vec![1, 2]));
        let requested: BTreeSet<u16> = [3, 4].into_iter().collect();
        assert!(reservation
            .conflict_with(&reservation.time_slot, &requested, 15)
            .is_none());
    }
}
