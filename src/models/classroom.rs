//! Classroom model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of classroom as labelled in the catalog.
///
/// Serialized in snake_case; the stored labels ("Informàtica", "Taller", ...)
/// are accepted on input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClassroomType {
    #[serde(alias = "Polivalent")]
    Polivalent,
    #[serde(alias = "Taller")]
    Taller,
    #[serde(alias = "Informàtica", alias = "informàtica", alias = "Informatica")]
    Informatica,
    #[serde(alias = "Projectes")]
    Projectes,
    #[serde(alias = "Seminari")]
    Seminari,
    /// Any label outside the known set
    #[serde(alias = "Other")]
    Other,
}

impl ClassroomType {
    pub const KNOWN: [ClassroomType; 5] = [
        ClassroomType::Polivalent,
        ClassroomType::Taller,
        ClassroomType::Informatica,
        ClassroomType::Projectes,
        ClassroomType::Seminari,
    ];

    /// Label stored in the `classrooms.type` column
    pub fn label(&self) -> &'static str {
        match self {
            ClassroomType::Polivalent => "Polivalent",
            ClassroomType::Taller => "Taller",
            ClassroomType::Informatica => "Informàtica",
            ClassroomType::Projectes => "Projectes",
            ClassroomType::Seminari => "Seminari",
            ClassroomType::Other => "Other",
        }
    }

    /// Parse a stored label; matching ignores case and the accent in "Informàtica"
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "polivalent" => ClassroomType::Polivalent,
            "taller" => ClassroomType::Taller,
            "informàtica" | "informatica" => ClassroomType::Informatica,
            "projectes" => ClassroomType::Projectes,
            "seminari" => ClassroomType::Seminari,
            _ => ClassroomType::Other,
        }
    }
}

impl std::fmt::Display for ClassroomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classroom record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Classroom {
    pub id: Uuid,
    /// Short code, e.g. "P1.6"
    pub code: String,
    pub name: String,
    /// Seats
    pub capacity: i32,
    /// Raw type label
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub classroom_type: Option<String>,
    pub building: Option<String>,
    pub floor: Option<i16>,
    /// Whether the classroom is in service
    pub is_available: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Classroom {
    pub fn kind(&self) -> Option<ClassroomType> {
        self.classroom_type.as_deref().map(ClassroomType::from_label)
    }
}

/// Static filter over the classroom catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassroomFilter {
    pub classroom_type: Option<ClassroomType>,
    pub min_capacity: Option<i32>,
}

impl ClassroomFilter {
    pub fn matches(&self, classroom: &Classroom) -> bool {
        if let Some(kind) = self.classroom_type {
            if classroom.kind() != Some(kind) {
                return false;
            }
        }
        match self.min_capacity {
            Some(min) if min > 0 => classroom.capacity >= min,
            _ => true,
        }
    }
}
