//! Schedules repository (semesters, time slots)

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::schedule::{Semester, TimeSlot},
};

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: Pool<Postgres>,
}

impl SchedulesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a semester by ID
    pub async fn get_semester(&self, id: Uuid) -> AppResult<Option<Semester>> {
        let row = sqlx::query_as::<_, Semester>("SELECT * FROM semesters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Get a time slot by ID
    pub async fn get_time_slot(&self, id: Uuid) -> AppResult<Option<TimeSlot>> {
        let row = sqlx::query_as::<_, TimeSlot>(
            "SELECT id, day_of_week, start_time, end_time, slot_type FROM time_slots WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
