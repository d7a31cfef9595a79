//! Classrooms repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::classroom::{Classroom, ClassroomFilter, ClassroomType},
};

#[derive(Clone)]
pub struct ClassroomsRepository {
    pool: Pool<Postgres>,
}

impl ClassroomsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get classroom by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Classroom>> {
        let row = sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// List classrooms matching a static filter, ordered by code
    pub async fn list(&self, filter: &ClassroomFilter) -> AppResult<Vec<Classroom>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        let known_labels: Vec<String> = ClassroomType::KNOWN
            .iter()
            .map(|k| k.label().to_lowercase())
            .chain(std::iter::once("informatica".to_string()))
            .collect();

        match filter.classroom_type {
            Some(ClassroomType::Other) => {
                conditions.push(format!("(type IS NOT NULL AND LOWER(type) <> ALL(${}))", idx));
                idx += 1;
            }
            Some(_) => {
                conditions.push(format!("LOWER(type) = ANY(${})", idx));
                idx += 1;
            }
            None => {}
        }
        if filter.min_capacity.is_some() {
            conditions.push(format!("capacity >= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT * FROM classrooms {} ORDER BY code", where_clause);

        let mut builder = sqlx::query_as::<_, Classroom>(&query);
        match filter.classroom_type {
            Some(ClassroomType::Other) => builder = builder.bind(known_labels),
            Some(kind) => builder = builder.bind(type_spellings(kind)),
            None => {}
        }
        if let Some(min) = filter.min_capacity {
            builder = builder.bind(min);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        tracing::debug!("Classroom catalog query returned {} rows", rows.len());
        Ok(rows)
    }

    /// Distinct type labels in use
    pub async fn distinct_types(&self) -> AppResult<Vec<String>> {
        let types: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT type FROM classrooms WHERE type IS NOT NULL ORDER BY type",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(types)
    }
}

/// Lower-cased labels a stored type may use for `kind`
fn type_spellings(kind: ClassroomType) -> Vec<String> {
    let mut spellings = vec![kind.label().to_lowercase()];
    if kind == ClassroomType::Informatica {
        spellings.push("informatica".to_string());
    }
    spellings
}
