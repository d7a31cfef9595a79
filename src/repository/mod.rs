//! Repository layer for database operations
//!
//! [`ScheduleStore`] is the read-only query surface the scheduling services
//! depend on. [`Repository`] answers it from PostgreSQL, [`memory::MemoryStore`]
//! from in-process collections.

pub mod catalog;
pub mod classrooms;
pub mod memory;
pub mod reservations;
pub mod schedules;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        classroom::{Classroom, ClassroomFilter},
        equipment::{
            ClassroomEquipment, ClassroomSoftware, EquipmentType, GroupProfile,
            ProfileSoftwareRequirement, Software, SoftwareRequirement, StudentGroup,
        },
        reservation::{Reservation, ReservationQuery},
        schedule::{Semester, TimeSlot},
    },
};

/// Backend queries used by availability checks and alternative searches.
///
/// Every multi-classroom method takes the whole candidate id list so callers
/// issue one query per concern instead of one per classroom.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Cheap round trip to check the backend is reachable
    async fn ping(&self) -> AppResult<()>;

    async fn semester(&self, id: Uuid) -> AppResult<Option<Semester>>;

    async fn time_slot(&self, id: Uuid) -> AppResult<Option<TimeSlot>>;

    async fn classroom(&self, id: Uuid) -> AppResult<Option<Classroom>>;

    /// Classrooms matching `filter`, ordered by code
    async fn classrooms(&self, filter: &ClassroomFilter) -> AppResult<Vec<Classroom>>;

    /// Distinct non-null classroom type labels, sorted
    async fn classroom_types(&self) -> AppResult<Vec<String>>;

    /// Reservations with their effective week sets
    async fn reservations(&self, query: &ReservationQuery) -> AppResult<Vec<Reservation>>;

    async fn classroom_equipment(&self, classroom_ids: &[Uuid]) -> AppResult<Vec<ClassroomEquipment>>;

    async fn classroom_software(&self, classroom_ids: &[Uuid]) -> AppResult<Vec<ClassroomSoftware>>;

    async fn equipment_types(&self) -> AppResult<Vec<EquipmentType>>;

    async fn software_catalog(&self) -> AppResult<Vec<Software>>;

    async fn subject_software(&self, subject_id: Uuid) -> AppResult<Vec<SoftwareRequirement>>;

    async fn student_group(&self, id: Uuid) -> AppResult<Option<StudentGroup>>;

    /// Profiles of `subject_id` that `student_group_id` belongs to, ordered by name
    async fn group_profiles(&self, subject_id: Uuid, student_group_id: Uuid) -> AppResult<Vec<GroupProfile>>;

    /// Software requirements of the given profiles, required first
    async fn profile_software(&self, profile_ids: &[Uuid]) -> AppResult<Vec<ProfileSoftwareRequirement>>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub classrooms: classrooms::ClassroomsRepository,
    pub reservations: reservations::ReservationsRepository,
    pub schedules: schedules::SchedulesRepository,
    pub catalog: catalog::CatalogRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            classrooms: classrooms::ClassroomsRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            catalog: catalog::CatalogRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl ScheduleStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Unavailable(format!("Database not reachable: {}", e)))?;
        Ok(())
    }

    async fn semester(&self, id: Uuid) -> AppResult<Option<Semester>> {
        self.schedules.get_semester(id).await
    }

    async fn time_slot(&self, id: Uuid) -> AppResult<Option<TimeSlot>> {
        self.schedules.get_time_slot(id).await
    }

    async fn classroom(&self, id: Uuid) -> AppResult<Option<Classroom>> {
        self.classrooms.get_by_id(id).await
    }

    async fn classrooms(&self, filter: &ClassroomFilter) -> AppResult<Vec<Classroom>> {
        self.classrooms.list(filter).await
    }

    async fn classroom_types(&self) -> AppResult<Vec<String>> {
        self.classrooms.distinct_types().await
    }

    async fn reservations(&self, query: &ReservationQuery) -> AppResult<Vec<Reservation>> {
        self.reservations.find(query).await
    }

    async fn classroom_equipment(&self, classroom_ids: &[Uuid]) -> AppResult<Vec<ClassroomEquipment>> {
        self.catalog.equipment_for_classrooms(classroom_ids).await
    }

    async fn classroom_software(&self, classroom_ids: &[Uuid]) -> AppResult<Vec<ClassroomSoftware>> {
        self.catalog.software_for_classrooms(classroom_ids).await
    }

    async fn equipment_types(&self) -> AppResult<Vec<EquipmentType>> {
        self.catalog.list_equipment_types().await
    }

    async fn software_catalog(&self) -> AppResult<Vec<Software>> {
        self.catalog.list_software().await
    }

    async fn subject_software(&self, subject_id: Uuid) -> AppResult<Vec<SoftwareRequirement>> {
        self.catalog.subject_software(subject_id).await
    }

    async fn student_group(&self, id: Uuid) -> AppResult<Option<StudentGroup>> {
        self.catalog.get_student_group(id).await
    }

    async fn group_profiles(&self, subject_id: Uuid, student_group_id: Uuid) -> AppResult<Vec<GroupProfile>> {
        self.catalog.profiles_for_group(subject_id, student_group_id).await
    }

    async fn profile_software(&self, profile_ids: &[Uuid]) -> AppResult<Vec<ProfileSoftwareRequirement>> {
        self.catalog.profile_software(profile_ids).await
    }
}
