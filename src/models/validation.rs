//! Assignment validation request and report

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::week_set::WeekSet;

/// Proposed classroom for a subject group
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AssignmentValidationRequest {
    pub subject_id: Uuid,
    pub student_group_id: Option<Uuid>,
    pub classroom_id: Uuid,
    pub time_slot_id: Option<Uuid>,
    /// Defaults to the full semester
    pub weeks: Option<WeekSet>,
    pub semester_id: Option<Uuid>,
    pub exclude_assignment_id: Option<Uuid>,
}

/// Errors block the assignment, warnings only inform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
