//! Classroom availability checks
//!
//! A classroom is free for a slot when none of its reservations in the same
//! semester overlaps the slot during any of the requested weeks. Failing to
//! read the reservations yields [`Availability::Unknown`], never "available".

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    config::SchedulingConfig,
    error::{AppError, AppResult},
    models::{
        availability::{Availability, AvailabilityRequest},
        reservation::{ConflictDetail, Reservation, ReservationQuery},
        schedule::{Semester, TimeSlot},
        week_set::WeekSet,
    },
    repository::ScheduleStore,
};

/// Slot, semester and weeks of a check, validated and resolved
#[derive(Debug, Clone)]
pub struct SlotContext {
    pub time_slot: TimeSlot,
    pub semester: Semester,
    pub total_weeks: u16,
    pub weeks: BTreeSet<u16>,
}

#[derive(Clone)]
pub struct AvailabilityService {
    store: Arc<dyn ScheduleStore>,
    default_total_weeks: u16,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn ScheduleStore>, config: &SchedulingConfig) -> Self {
        Self {
            store,
            default_total_weeks: config.default_total_weeks,
        }
    }

    /// Check one classroom.
    ///
    /// Invalid input and unknown ids are errors; backend failures become
    /// [`Availability::Unknown`].
    pub async fn check(&self, request: &AvailabilityRequest) -> AppResult<Availability> {
        let context = match self
            .resolve_context(request.time_slot_id, request.semester_id, &request.weeks)
            .await
        {
            Ok(context) => context,
            Err(e) if is_lookup_failure(&e) => return Ok(unknown(request.classroom_id, e)),
            Err(e) => return Err(e),
        };

        match self.store.classroom(request.classroom_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(AppError::NotFound(format!(
                    "Classroom {} not found",
                    request.classroom_id
                )))
            }
            Err(e) => return Ok(unknown(request.classroom_id, e)),
        }

        match self
            .conflicts_for(&[request.classroom_id], &context, request.exclude_assignment_id)
            .await
        {
            Ok(mut by_classroom) => {
                let conflicts = by_classroom.remove(&request.classroom_id).unwrap_or_default();
                tracing::debug!(
                    "Classroom {} has {} conflicts in {} requested weeks",
                    request.classroom_id,
                    conflicts.len(),
                    context.weeks.len()
                );
                Ok(Availability::from_conflicts(conflicts))
            }
            Err(e) => Ok(unknown(request.classroom_id, e)),
        }
    }

    /// Validate the requested weeks and load the slot and semester.
    ///
    /// An explicitly empty week list is rejected before anything is queried.
    pub async fn resolve_context(
        &self,
        time_slot_id: Uuid,
        semester_id: Uuid,
        weeks: &WeekSet,
    ) -> AppResult<SlotContext> {
        if let WeekSet::Weeks { weeks } = weeks {
            if weeks.is_empty() {
                return Err(AppError::Validation(
                    "At least one week must be selected".to_string(),
                ));
            }
        }

        let time_slot = self
            .store
            .time_slot(time_slot_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Time slot {} not found", time_slot_id)))?;
        if !time_slot.is_well_formed() {
            return Err(AppError::Validation(format!(
                "Time slot {} is not a weekday range with start before end",
                time_slot_id
            )));
        }

        let semester = self
            .store
            .semester(semester_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Semester {} not found", semester_id)))?;

        let total_weeks = semester.week_count(self.default_total_weeks);
        let weeks = weeks.resolve_request(total_weeks)?;

        Ok(SlotContext {
            time_slot,
            semester,
            total_weeks,
            weeks,
        })
    }

    /// Conflicts of many classrooms from a single reservation query.
    /// Classrooms without conflicts are absent from the map.
    pub async fn conflicts_for(
        &self,
        classroom_ids: &[Uuid],
        context: &SlotContext,
        exclude_assignment_id: Option<Uuid>,
    ) -> AppResult<HashMap<Uuid, Vec<ConflictDetail>>> {
        if classroom_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = ReservationQuery {
            classroom_ids: classroom_ids.to_vec(),
            semester_id: context.semester.id,
            day_of_week: Some(context.time_slot.day_of_week),
            exclude_assignment_id,
        };
        let reservations = self.store.reservations(&query).await?;

        Ok(find_conflicts(
            &reservations,
            &context.time_slot,
            &context.weeks,
            context.total_weeks,
            exclude_assignment_id,
        ))
    }
}

/// Group the conflicts `reservations` cause for `slot` during `requested` weeks by classroom
pub fn find_conflicts(
    reservations: &[Reservation],
    slot: &TimeSlot,
    requested: &BTreeSet<u16>,
    total_weeks: u16,
    exclude_assignment_id: Option<Uuid>,
) -> HashMap<Uuid, Vec<ConflictDetail>> {
    let mut by_classroom: HashMap<Uuid, Vec<ConflictDetail>> = HashMap::new();
    for reservation in reservations {
        if exclude_assignment_id == Some(reservation.assignment_id) {
            continue;
        }
        if let Some(conflict) = reservation.conflict_with(slot, requested, total_weeks) {
            by_classroom
                .entry(reservation.classroom_id)
                .or_default()
                .push(conflict);
        }
    }
    by_classroom
}

/// Backend errors, as opposed to bad input or missing records
pub(crate) fn is_lookup_failure(error: &AppError) -> bool {
    matches!(error, AppError::Database(_) | AppError::Unavailable(_))
}

fn unknown(classroom_id: Uuid, error: AppError) -> Availability {
    tracing::warn!(
        "Availability of classroom {} unknown: {}",
        classroom_id,
        error
    );
    Availability::Unknown {
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    use crate::{
        models::{classroom::Classroom, reservation::ReservationKind},
        repository::{memory::MemoryStore, MockScheduleStore},
    };

    struct Fixture {
        store: Arc<MemoryStore>,
        service: AvailabilityService,
        semester_id: Uuid,
        slot: TimeSlot,
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn classroom(code: &str) -> Classroom {
        Classroom {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: code.to_string(),
            capacity: 30,
            classroom_type: Some("Polivalent".to_string()),
            building: None,
            floor: None,
            is_available: true,
            created_at: None,
        }
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let semester = Semester {
            id: Uuid::new_v4(),
            name: "Semestre 2".to_string(),
            academic_year: Some("2025-2026".to_string()),
            number: Some(2),
            total_weeks: None,
            start_date: None,
            end_date: None,
        };
        let slot = TimeSlot {
            id: Uuid::new_v4(),
            day_of_week: 1,
            start_time: time(15, 0),
            end_time: time(20, 30),
            slot_type: Some("tarda".to_string()),
        };
        let semester_id = semester.id;
        store.add_semester(semester);
        store.add_time_slot(slot.clone());
        let service = AvailabilityService::new(store.clone(), &SchedulingConfig::default());
        Fixture {
            store,
            service,
            semester_id,
            slot,
        }
    }

    fn reserve(f: &Fixture, classroom: &Classroom, weeks: WeekSet, subject: &str) -> Uuid {
        let assignment_id = Uuid::new_v4();
        f.store.add_reservation(Reservation {
            assignment_id,
            kind: ReservationKind::Assignment,
            classroom_id: classroom.id,
            semester_id: f.semester_id,
            time_slot: f.slot.clone(),
            weeks,
            subject_name: subject.to_string(),
            group_code: Some("GR1".to_string()),
        });
        assignment_id
    }

    fn request(f: &Fixture, classroom: &Classroom, weeks: WeekSet) -> AvailabilityRequest {
        AvailabilityRequest {
            classroom_id: classroom.id,
            time_slot_id: f.slot.id,
            semester_id: f.semester_id,
            weeks,
            exclude_assignment_id: None,
        }
    }

    #[tokio::test]
    async fn test_full_semester_reservation_blocks_partial_request() {
        let f = fixture();
        let l12 = classroom("L1.2");
        f.store.add_classroom(l12.clone());
        reserve(&f, &l12, WeekSet::FullSemester, "Llenguatges Audiovisuals II");

        let result = f
            .service
            .check(&request(&f, &l12, WeekSet::weeks([3, 4])))
            .await
            .unwrap();

        assert_eq!(result.is_available(), Some(false));
        let Availability::Conflict { conflicts } = result else {
            panic!("expected conflict");
        };
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].subject_name, "Llenguatges Audiovisuals II");
        assert_eq!(conflicts[0].conflicting_weeks, vec![3, 4]);
    }

    #[tokio::test]
    async fn test_empty_classroom_is_available() {
        let f = fixture();
        let p19 = classroom("P1.9");
        f.store.add_classroom(p19.clone());

        let result = f
            .service
            .check(&request(&f, &p19, WeekSet::weeks([5])))
            .await
            .unwrap();
        assert_eq!(result, Availability::Available);
    }

    #[tokio::test]
    async fn test_disjoint_week_sets_do_not_conflict() {
        let f = fixture();
        let room = classroom("G0.3");
        f.store.add_classroom(room.clone());
        let first = reserve(&f, &room, WeekSet::weeks([1, 2, 3]), "Color I");
        let second = reserve(&f, &room, WeekSet::weeks([4, 5, 6]), "Color II");

        let mut check = request(&f, &room, WeekSet::weeks([1, 2, 3]));
        check.exclude_assignment_id = Some(first);
        assert_eq!(f.service.check(&check).await.unwrap(), Availability::Available);

        let mut check = request(&f, &room, WeekSet::weeks([4, 5, 6]));
        check.exclude_assignment_id = Some(second);
        assert_eq!(f.service.check(&check).await.unwrap(), Availability::Available);
    }

    #[tokio::test]
    async fn test_excluded_assignment_is_ignored() {
        let f = fixture();
        let room = classroom("P1.6");
        f.store.add_classroom(room.clone());
        let own = reserve(&f, &room, WeekSet::FullSemester, "Tipografia");

        let mut check = request(&f, &room, WeekSet::FullSemester);
        assert_eq!(f.service.check(&check).await.unwrap().is_available(), Some(false));

        check.exclude_assignment_id = Some(own);
        assert_eq!(f.service.check(&check).await.unwrap(), Availability::Available);
    }

    #[tokio::test]
    async fn test_overlapping_slot_on_same_day_conflicts() {
        let f = fixture();
        let room = classroom("P0.5");
        f.store.add_classroom(room.clone());
        let mut early = f.slot.clone();
        early.id = Uuid::new_v4();
        early.start_time = time(13, 0);
        early.end_time = time(16, 0);
        f.store.add_reservation(Reservation {
            assignment_id: Uuid::new_v4(),
            kind: ReservationKind::Assignment,
            classroom_id: room.id,
            semester_id: f.semester_id,
            time_slot: early,
            weeks: WeekSet::weeks([2]),
            subject_name: "Fotografia".to_string(),
            group_code: None,
        });

        let result = f
            .service
            .check(&request(&f, &room, WeekSet::weeks([2])))
            .await
            .unwrap();
        assert_eq!(result.is_available(), Some(false));
    }

    #[tokio::test]
    async fn test_profile_booking_blocks_classroom() {
        let f = fixture();
        let room = classroom("P1.4");
        f.store.add_classroom(room.clone());
        let profile_assignment = Uuid::new_v4();
        f.store.add_reservation(Reservation {
            assignment_id: profile_assignment,
            kind: ReservationKind::Profile,
            classroom_id: room.id,
            semester_id: f.semester_id,
            time_slot: f.slot.clone(),
            weeks: WeekSet::weeks([1, 2, 3, 4]),
            subject_name: "Perfil Disseny Gràfic".to_string(),
            group_code: None,
        });

        let mut check = request(&f, &room, WeekSet::weeks([3, 9]));
        match f.service.check(&check).await.unwrap() {
            Availability::Conflict { conflicts } => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].kind, ReservationKind::Profile);
                assert_eq!(conflicts[0].conflicting_weeks, vec![3]);
            }
            other => panic!("expected conflict, got {:?}", other),
        }

        check.exclude_assignment_id = Some(profile_assignment);
        assert_eq!(f.service.check(&check).await.unwrap(), Availability::Available);
    }

    #[tokio::test]
    async fn test_invalid_weeks_are_rejected() {
        let f = fixture();
        let room = classroom("P1.1");
        f.store.add_classroom(room.clone());

        let empty = f.service.check(&request(&f, &room, WeekSet::weeks([]))).await;
        assert!(matches!(empty, Err(AppError::Validation(_))));

        let beyond = f.service.check(&request(&f, &room, WeekSet::weeks([16]))).await;
        assert!(matches!(beyond, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let f = fixture();
        let ghost = classroom("X9.9");

        let missing_room = f.service.check(&request(&f, &ghost, WeekSet::FullSemester)).await;
        assert!(matches!(missing_room, Err(AppError::NotFound(_))));

        f.store.add_classroom(ghost.clone());
        let mut check = request(&f, &ghost, WeekSet::FullSemester);
        check.time_slot_id = Uuid::new_v4();
        assert!(matches!(f.service.check(&check).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_unknown() {
        let f = fixture();
        let room = classroom("P2.4");
        let slot = f.slot.clone();
        let semester_id = f.semester_id;

        let mut mock = MockScheduleStore::new();
        mock.expect_time_slot()
            .returning(move |_| Ok(Some(slot.clone())));
        mock.expect_semester().returning(move |id| {
            Ok(Some(Semester {
                id,
                name: "Semestre 1".to_string(),
                academic_year: None,
                number: Some(1),
                total_weeks: Some(15),
                start_date: None,
                end_date: None,
            }))
        });
        let existing = room.clone();
        mock.expect_classroom()
            .returning(move |_| Ok(Some(existing.clone())));
        mock.expect_reservations()
            .returning(|_| Err(AppError::Unavailable("connection refused".to_string())));

        let service = AvailabilityService::new(Arc::new(mock), &SchedulingConfig::default());
        let result = service
            .check(&AvailabilityRequest {
                classroom_id: room.id,
                time_slot_id: f.slot.id,
                semester_id,
                weeks: WeekSet::weeks([1]),
                exclude_assignment_id: None,
            })
            .await
            .unwrap();

        assert_eq!(result.is_available(), None);
        assert!(matches!(result, Availability::Unknown { .. }));
    }

    #[tokio::test]
    async fn test_semester_week_count_limits_full_semester() {
        let f = fixture();
        let room = classroom("L0.1");
        f.store.add_classroom(room.clone());
        let short = Semester {
            id: Uuid::new_v4(),
            name: "Intensiu".to_string(),
            academic_year: None,
            number: None,
            total_weeks: Some(4),
            start_date: None,
            end_date: None,
        };
        let short_id = short.id;
        f.store.add_semester(short);

        let mut check = request(&f, &room, WeekSet::weeks([5]));
        check.semester_id = short_id;
        assert!(matches!(f.service.check(&check).await, Err(AppError::Validation(_))));
    }
}
