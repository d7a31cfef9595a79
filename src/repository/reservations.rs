//! Reservations repository (assignment and profile classroom bookings with their weeks)

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::reservation::{Reservation, ReservationQuery, ReservationRow},
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Reservations of all requested classrooms in one round trip, week
    /// numbers aggregated per booking
    pub async fn find(&self, query: &ReservationQuery) -> AppResult<Vec<Reservation>> {
        if query.classroom_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT * FROM (
                SELECT a.id AS assignment_id,
                       'assignment'::text AS source,
                       ac.classroom_id,
                       a.semester_id,
                       ts.id AS time_slot_id,
                       ts.day_of_week,
                       ts.start_time,
                       ts.end_time,
                       ts.slot_type,
                       ac.is_full_semester,
                       COALESCE(
                           ARRAY_AGG(acw.week_number ORDER BY acw.week_number)
                               FILTER (WHERE acw.week_number IS NOT NULL),
                           '{}'
                       )::smallint[] AS week_numbers,
                       s.name AS subject_name,
                       sg.name AS group_code
                FROM assignment_classrooms ac
                JOIN assignments a ON a.id = ac.assignment_id
                JOIN time_slots ts ON ts.id = a.time_slot_id
                JOIN subjects s ON s.id = a.subject_id
                LEFT JOIN student_groups sg ON sg.id = a.student_group_id
                LEFT JOIN assignment_classroom_weeks acw ON acw.assignment_classroom_id = ac.id
                WHERE ac.classroom_id = ANY($1)
                  AND a.semester_id = $2
                  AND ($3::smallint IS NULL OR ts.day_of_week = $3)
                  AND ($4::uuid IS NULL OR a.id <> $4)
                GROUP BY ac.id, a.id, ts.id, s.name, sg.name

                UNION ALL

                SELECT pca.id AS assignment_id,
                       'profile'::text AS source,
                       pca.classroom_id,
                       pca.semester_id,
                       ts.id AS time_slot_id,
                       ts.day_of_week,
                       ts.start_time,
                       ts.end_time,
                       ts.slot_type,
                       pca.is_full_semester,
                       COALESCE(
                           ARRAY_AGG(paw.week_number ORDER BY paw.week_number)
                               FILTER (WHERE paw.week_number IS NOT NULL),
                           '{}'
                       )::smallint[] AS week_numbers,
                       p.name AS subject_name,
                       NULL::varchar AS group_code
                FROM profile_classroom_assignments pca
                JOIN subject_group_profiles p ON p.id = pca.profile_id
                JOIN time_slots ts ON ts.id = pca.time_slot_id
                LEFT JOIN profile_assignment_weeks paw ON paw.profile_assignment_id = pca.id
                WHERE pca.classroom_id = ANY($1)
                  AND pca.semester_id = $2
                  AND ($3::smallint IS NULL OR ts.day_of_week = $3)
                  AND ($4::uuid IS NULL OR pca.id <> $4)
                GROUP BY pca.id, ts.id, p.name
            ) reservations
            ORDER BY classroom_id, day_of_week, start_time
            "#,
        )
        .bind(&query.classroom_ids)
        .bind(query.semester_id)
        .bind(query.day_of_week)
        .bind(query.exclude_assignment_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            "Loaded {} reservations for {} classrooms",
            rows.len(),
            query.classroom_ids.len()
        );

        Ok(rows.into_iter().map(Reservation::from).collect())
    }
}
