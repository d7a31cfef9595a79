//! Equipment, software and student group lookups

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::equipment::{
        ClassroomEquipment, ClassroomSoftware, EquipmentType, GroupProfile,
        ProfileSoftwareRequirement, Software, SoftwareRequirement, StudentGroup,
    },
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: Pool<Postgres>,
}

impl CatalogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Equipment of several classrooms at once
    pub async fn equipment_for_classrooms(&self, classroom_ids: &[Uuid]) -> AppResult<Vec<ClassroomEquipment>> {
        if classroom_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, ClassroomEquipment>(
            r#"
            SELECT ce.classroom_id, et.id, et.name, et.category
            FROM classroom_equipment ce
            JOIN equipment_types et ON et.id = ce.equipment_type_id
            WHERE ce.classroom_id = ANY($1)
            ORDER BY et.name
            "#,
        )
        .bind(classroom_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Software of several classrooms at once
    pub async fn software_for_classrooms(&self, classroom_ids: &[Uuid]) -> AppResult<Vec<ClassroomSoftware>> {
        if classroom_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, ClassroomSoftware>(
            r#"
            SELECT cs.classroom_id, sw.id, sw.name, sw.version, sw.category
            FROM classroom_software cs
            JOIN software sw ON sw.id = cs.software_id
            WHERE cs.classroom_id = ANY($1)
            ORDER BY sw.name
            "#,
        )
        .bind(classroom_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List all equipment types
    pub async fn list_equipment_types(&self) -> AppResult<Vec<EquipmentType>> {
        let rows = sqlx::query_as::<_, EquipmentType>(
            "SELECT id, name, category FROM equipment_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List the software catalog
    pub async fn list_software(&self) -> AppResult<Vec<Software>> {
        let rows = sqlx::query_as::<_, Software>(
            "SELECT id, name, version, category FROM software ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Software a subject needs, required first
    pub async fn subject_software(&self, subject_id: Uuid) -> AppResult<Vec<SoftwareRequirement>> {
        let rows = sqlx::query_as::<_, SoftwareRequirement>(
            r#"
            SELECT sw.id, sw.name, sw.version, sw.category, ss.is_required
            FROM subject_software ss
            JOIN software sw ON sw.id = ss.software_id
            WHERE ss.subject_id = $1
            ORDER BY ss.is_required DESC, sw.name
            "#,
        )
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a student group by ID
    pub async fn get_student_group(&self, id: Uuid) -> AppResult<Option<StudentGroup>> {
        let row = sqlx::query_as::<_, StudentGroup>(
            "SELECT id, name, max_students FROM student_groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn profiles_for_group(&self, subject_id: Uuid, student_group_id: Uuid) -> AppResult<Vec<GroupProfile>> {
        let rows = sqlx::query_as::<_, GroupProfile>(
            r#"
            SELECT p.id, p.subject_id, p.name
            FROM subject_group_profiles p
            JOIN subject_group_profile_members m ON m.profile_id = p.id
            WHERE p.subject_id = $1 AND m.student_group_id = $2
            ORDER BY p.name
            "#,
        )
        .bind(subject_id)
        .bind(student_group_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn profile_software(&self, profile_ids: &[Uuid]) -> AppResult<Vec<ProfileSoftwareRequirement>> {
        if profile_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, ProfileSoftwareRequirement>(
            r#"
            SELECT ps.profile_id, sw.id, sw.name, sw.version, sw.category, ps.is_required
            FROM subject_group_profile_software ps
            JOIN software sw ON sw.id = ps.software_id
            WHERE ps.profile_id = ANY($1)
            ORDER BY ps.is_required DESC, sw.name
            "#,
        )
        .bind(profile_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
