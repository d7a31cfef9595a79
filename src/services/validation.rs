//! Assignment validation: software, capacity and timetable conflicts

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use super::availability::AvailabilityService;
use crate::{
    error::{AppError, AppResult},
    models::{
        availability::{Availability, AvailabilityRequest},
        equipment::Software,
        validation::{AssignmentValidationRequest, ValidationReport},
        week_set::{format_week_ranges, WeekSet},
    },
    repository::ScheduleStore,
};

#[derive(Clone)]
pub struct ValidationService {
    store: Arc<dyn ScheduleStore>,
    availability: AvailabilityService,
}

impl ValidationService {
    pub fn new(store: Arc<dyn ScheduleStore>, availability: AvailabilityService) -> Self {
        Self { store, availability }
    }

    pub async fn validate(&self, request: &AssignmentValidationRequest) -> AppResult<ValidationReport> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let classroom = self
            .store
            .classroom(request.classroom_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Classroom {} not found", request.classroom_id))
            })?;

        // Software: group profiles take precedence over the subject's own list
        let profiles = match request.student_group_id {
            Some(group_id) => self.store.group_profiles(request.subject_id, group_id).await?,
            None => Vec::new(),
        };
        if profiles.is_empty() {
            let requirements = self.store.subject_software(request.subject_id).await?;
            if !requirements.is_empty() {
                let installed = self.installed_software(classroom.id).await?;
                let (missing_required, missing_optional) = missing_software(
                    requirements.iter().map(|r| (&r.software, r.is_required)),
                    &installed,
                );
                if !missing_required.is_empty() {
                    errors.push(format!(
                        "Classroom {} lacks required software: {}",
                        classroom.code,
                        missing_required.join(", ")
                    ));
                }
                if !missing_optional.is_empty() {
                    warnings.push(format!(
                        "Classroom {} lacks recommended software: {}",
                        classroom.code,
                        missing_optional.join(", ")
                    ));
                }
            }
        } else {
            let profile_ids: Vec<Uuid> = profiles.iter().map(|p| p.id).collect();
            let requirements = self.store.profile_software(&profile_ids).await?;
            if !requirements.is_empty() {
                let installed = self.installed_software(classroom.id).await?;
                for profile in &profiles {
                    let (missing_required, missing_optional) = missing_software(
                        requirements
                            .iter()
                            .filter(|r| r.profile_id == profile.id)
                            .map(|r| (&r.software, r.is_required)),
                        &installed,
                    );
                    if !missing_required.is_empty() {
                        errors.push(format!(
                            "Classroom {} lacks required software for profile \"{}\": {}",
                            classroom.code,
                            profile.name,
                            missing_required.join(", ")
                        ));
                    }
                    if !missing_optional.is_empty() {
                        warnings.push(format!(
                            "Classroom {} lacks recommended software for profile \"{}\": {}",
                            classroom.code,
                            profile.name,
                            missing_optional.join(", ")
                        ));
                    }
                }
            }
        }

        // Capacity
        if let Some(group_id) = request.student_group_id {
            let group = self
                .store
                .student_group(group_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Student group {} not found", group_id)))?;
            if let Some(max) = group.max_students {
                if classroom.capacity < max {
                    warnings.push(format!(
                        "Classroom capacity ({}) is below the group maximum ({})",
                        classroom.capacity, max
                    ));
                }
            }
        }

        // Timetable
        if let (Some(time_slot_id), Some(semester_id)) = (request.time_slot_id, request.semester_id) {
            let availability = self
                .availability
                .check(&AvailabilityRequest {
                    classroom_id: classroom.id,
                    time_slot_id,
                    semester_id,
                    weeks: request.weeks.clone().unwrap_or(WeekSet::FullSemester),
                    exclude_assignment_id: request.exclude_assignment_id,
                })
                .await?;

            match availability {
                Availability::Available => {}
                Availability::Conflict { conflicts } => {
                    if let Some(first) = conflicts.first() {
                        errors.push(format!(
                            "Classroom is already assigned to {}{} in weeks: {}",
                            first.subject_name,
                            first
                                .group_code
                                .as_deref()
                                .map(|g| format!(" ({})", g))
                                .unwrap_or_default(),
                            format_week_ranges(&first.conflicting_weeks)
                        ));
                    }
                }
                Availability::Unknown { reason } => {
                    errors.push(format!("Could not verify classroom availability: {}", reason));
                }
            }
        }

        tracing::debug!(
            "Validated assignment of subject {} to classroom {}: {} errors, {} warnings",
            request.subject_id,
            classroom.code,
            errors.len(),
            warnings.len()
        );

        Ok(ValidationReport::new(errors, warnings))
    }

    async fn installed_software(&self, classroom_id: Uuid) -> AppResult<HashSet<Uuid>> {
        Ok(self
            .store
            .classroom_software(&[classroom_id])
            .await?
            .into_iter()
            .map(|row| row.software.id)
            .collect())
    }
}

/// Names of missing required and missing optional software
fn missing_software<'a>(
    requirements: impl IntoIterator<Item = (&'a Software, bool)>,
    installed: &HashSet<Uuid>,
) -> (Vec<String>, Vec<String>) {
    let mut required = Vec::new();
    let mut optional = Vec::new();
    for (software, is_required) in requirements {
        if installed.contains(&software.id) {
            continue;
        }
        if is_required {
            required.push(software.name.clone());
        } else {
            optional.push(software.name.clone());
        }
    }
    (required, optional)
}
