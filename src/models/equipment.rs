//! Equipment, software and the requirements built on them

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Equipment type (projector, computers, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentType {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
}

/// Installed software package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Software {
    pub id: Uuid,
    pub name: String,
    pub version: Option<String>,
    pub category: Option<String>,
}

/// Equipment type present in a classroom
#[derive(Debug, Clone, FromRow)]
pub struct ClassroomEquipment {
    pub classroom_id: Uuid,
    #[sqlx(flatten)]
    pub equipment: EquipmentType,
}

/// Software installed in a classroom
#[derive(Debug, Clone, FromRow)]
pub struct ClassroomSoftware {
    pub classroom_id: Uuid,
    #[sqlx(flatten)]
    pub software: Software,
}

/// Software a subject needs in its classrooms
#[derive(Debug, Clone, FromRow)]
pub struct SoftwareRequirement {
    #[sqlx(flatten)]
    pub software: Software,
    /// Missing required software is an error, missing optional software a warning
    pub is_required: bool,
}

/// Student group
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentGroup {
    pub id: Uuid,
    pub name: String,
    pub max_students: Option<i32>,
}

/// Profile grouping student groups of one subject that share classrooms and software
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GroupProfile {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub name: String,
}

/// Software a group profile needs in its classrooms
#[derive(Debug, Clone, FromRow)]
pub struct ProfileSoftwareRequirement {
    pub profile_id: Uuid,
    #[sqlx(flatten)]
    pub software: Software,
    pub is_required: bool,
}
