//! Classroom occupancy statistics over the weekday hourly grid

use std::sync::Arc;

use chrono::NaiveTime;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        occupancy::{CellAssignment, ClassroomOccupancy, HourlyCell},
        reservation::{Reservation, ReservationQuery},
    },
    repository::ScheduleStore,
};

const FIRST_HOUR: u32 = 8;
const LAST_HOUR: u32 = 21;
const AFTERNOON_FROM: u32 = 14;
const WEEKDAYS: std::ops::RangeInclusive<i16> = 1..=5;

#[derive(Clone)]
pub struct OccupancyService {
    store: Arc<dyn ScheduleStore>,
}

impl OccupancyService {
    pub fn new(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    pub async fn classroom_occupancy(&self, classroom_id: Uuid, semester_id: Uuid) -> AppResult<ClassroomOccupancy> {
        self.store
            .classroom(classroom_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Classroom {} not found", classroom_id)))?;
        self.store
            .semester(semester_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Semester {} not found", semester_id)))?;

        let reservations = self
            .store
            .reservations(&ReservationQuery {
                classroom_ids: vec![classroom_id],
                semester_id,
                day_of_week: None,
                exclude_assignment_id: None,
            })
            .await?;

        Ok(compute_occupancy(classroom_id, semester_id, &reservations))
    }
}

/// Mark each hourly cell covered by a reservation and derive percentages
pub fn compute_occupancy(
    classroom_id: Uuid,
    semester_id: Uuid,
    reservations: &[Reservation],
) -> ClassroomOccupancy {
    let mut cells = Vec::new();
    for day in WEEKDAYS {
        for hour in FIRST_HOUR..LAST_HOUR {
            let (Some(start), Some(end)) = (
                NaiveTime::from_hms_opt(hour, 0, 0),
                NaiveTime::from_hms_opt(hour + 1, 0, 0),
            ) else {
                continue;
            };
            let holder = reservations
                .iter()
                .find(|r| r.time_slot.covers(day, start, end));
            cells.push(HourlyCell {
                day_of_week: day,
                start_time: start,
                end_time: end,
                is_occupied: holder.is_some(),
                assignment: holder.map(|r| CellAssignment {
                    assignment_id: r.assignment_id,
                    subject_name: r.subject_name.clone(),
                    group_code: r.group_code.clone(),
                }),
            });
        }
    }

    let afternoon = NaiveTime::from_hms_opt(AFTERNOON_FROM, 0, 0).unwrap_or(NaiveTime::MIN);
    let morning: Vec<&HourlyCell> = cells.iter().filter(|c| c.start_time < afternoon).collect();
    let evening: Vec<&HourlyCell> = cells.iter().filter(|c| c.start_time >= afternoon).collect();

    ClassroomOccupancy {
        classroom_id,
        semester_id,
        morning_occupancy: percentage(morning.iter().filter(|c| c.is_occupied).count(), morning.len()),
        afternoon_occupancy: percentage(evening.iter().filter(|c| c.is_occupied).count(), evening.len()),
        total_occupancy: percentage(cells.iter().filter(|c| c.is_occupied).count(), cells.len()),
        cells,
    }
}

/// Rounded half up, 0 for an empty grid
fn percentage(occupied: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((occupied * 100 + total / 2) / total).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{reservation::ReservationKind, schedule::TimeSlot, week_set::WeekSet};

    fn reservation(day: i16, start: (u32, u32), end: (u32, u32)) -> Reservation {
        Reservation {
            assignment_id: Uuid::new_v4(),
            kind: ReservationKind::Assignment,
            classroom_id: Uuid::new_v4(),
            semester_id: Uuid::new_v4(),
            time_slot: TimeSlot {
                id: Uuid::new_v4(),
                day_of_week: day,
                start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
                slot_type: None,
            },
            weeks: WeekSet::FullSemester,
            subject_name: "Dibuix".to_string(),
            group_code: Some("GR1".to_string()),
        }
    }

    #[test]
    fn test_empty_grid() {
        let occupancy = compute_occupancy(Uuid::new_v4(), Uuid::new_v4(), &[]);
        assert_eq!(occupancy.cells.len(), 65);
        assert_eq!(occupancy.total_occupancy, 0);
        assert!(occupancy.cells.iter().all(|c| !c.is_occupied));
    }

    #[test]
    fn test_morning_slot_fills_whole_hours_only() {
        // 09:00-14:30 covers 09..14, the 14:00-15:00 cell is only half covered
        let occupancy = compute_occupancy(
            Uuid::new_v4(),
            Uuid::new_v4(),
            &[reservation(1, (9, 0), (14, 30))],
        );
        let monday: Vec<&HourlyCell> = occupancy
            .cells
            .iter()
            .filter(|c| c.day_of_week == 1 && c.is_occupied)
            .collect();
        assert_eq!(monday.len(), 5);
        assert_eq!(monday[0].assignment.as_ref().unwrap().subject_name, "Dibuix");

        // 5 of 30 morning cells, 0 of 35 afternoon cells
        assert_eq!(occupancy.morning_occupancy, 17);
        assert_eq!(occupancy.afternoon_occupancy, 0);
        assert_eq!(occupancy.total_occupancy, 8);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 3), 100);
    }
}
