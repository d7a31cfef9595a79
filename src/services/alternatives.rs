//! Alternative classroom search
//!
//! Data is loaded in batches: one catalog query, one equipment query, one
//! software query and one reservation query for all candidates. A failing
//! batch fails the whole search, so no candidate is ever reported from
//! partial data.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::{
    availability::AvailabilityService,
    generations::SearchGenerations,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        availability::{
            AlternativeCriteria, AlternativeSearchRequest, AlternativeSearchResponse,
            CandidateClassroom,
        },
        equipment::{EquipmentType, Software},
        week_set::WeekSet,
    },
    repository::ScheduleStore,
};

#[derive(Clone)]
pub struct AlternativesService {
    store: Arc<dyn ScheduleStore>,
    availability: AvailabilityService,
    generations: Arc<SearchGenerations>,
}

impl AlternativesService {
    pub fn new(store: Arc<dyn ScheduleStore>, availability: AvailabilityService) -> Self {
        Self {
            store,
            availability,
            generations: Arc::new(SearchGenerations::new()),
        }
    }

    /// Run a search request. Keyed searches overtaken by a newer search for
    /// the same key fail with [`AppError::Superseded`].
    pub async fn search(&self, request: &AlternativeSearchRequest) -> AppResult<AlternativeSearchResponse> {
        request.validate()?;

        let guard = request.search_key.as_deref().map(|k| self.generations.begin(k));
        if guard.is_some() {
            tracing::debug!("{} keyed alternative searches in flight", self.generations.in_flight());
        }

        let result = self
            .find(
                &request.criteria(),
                request.time_slot_id,
                request.semester_id,
                &request.weeks,
                request.exclude_assignment_id,
            )
            .await;

        let mut generation = None;
        if let Some(guard) = guard {
            let ticket = guard.ticket().clone();
            if !guard.finish() {
                tracing::info!(
                    "Discarding alternative search '{}' generation {}",
                    ticket.key,
                    ticket.generation
                );
                return Err(AppError::Superseded(ticket.generation));
            }
            generation = Some(ticket.generation);
        }

        let candidates = result?;
        let available_count = candidates.iter().filter(|c| c.is_available).count();

        Ok(AlternativeSearchResponse {
            generation,
            available_count,
            total_count: candidates.len(),
            candidates,
        })
    }

    /// Classrooms meeting `criteria`, available ones first, then by code
    pub async fn find(
        &self,
        criteria: &AlternativeCriteria,
        time_slot_id: Uuid,
        semester_id: Uuid,
        weeks: &WeekSet,
        exclude_assignment_id: Option<Uuid>,
    ) -> AppResult<Vec<CandidateClassroom>> {
        let context = self
            .availability
            .resolve_context(time_slot_id, semester_id, weeks)
            .await?;

        let classrooms = self.store.classrooms(&criteria.catalog_filter()).await?;
        if classrooms.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = classrooms.iter().map(|c| c.id).collect();

        let (equipment_rows, software_rows) = tokio::try_join!(
            self.store.classroom_equipment(&ids),
            self.store.classroom_software(&ids)
        )?;

        let mut equipment: HashMap<Uuid, Vec<EquipmentType>> = HashMap::new();
        for row in equipment_rows {
            equipment.entry(row.classroom_id).or_default().push(row.equipment);
        }
        let mut software: HashMap<Uuid, Vec<Software>> = HashMap::new();
        for row in software_rows {
            software.entry(row.classroom_id).or_default().push(row.software);
        }

        let qualifying: Vec<_> = classrooms
            .into_iter()
            .filter(|c| {
                let owned_equipment: HashSet<Uuid> = equipment
                    .get(&c.id)
                    .map(|items| items.iter().map(|e| e.id).collect())
                    .unwrap_or_default();
                let owned_software: HashSet<Uuid> = software
                    .get(&c.id)
                    .map(|items| items.iter().map(|s| s.id).collect())
                    .unwrap_or_default();
                meets_requirements(&criteria.equipment_type_ids, &owned_equipment)
                    && meets_requirements(&criteria.software_ids, &owned_software)
            })
            .collect();

        let qualifying_ids: Vec<Uuid> = qualifying.iter().map(|c| c.id).collect();
        let mut conflicts = self
            .availability
            .conflicts_for(&qualifying_ids, &context, exclude_assignment_id)
            .await?;

        let mut candidates: Vec<CandidateClassroom> = qualifying
            .into_iter()
            .map(|classroom| {
                let blocking = conflicts.remove(&classroom.id).unwrap_or_default();
                CandidateClassroom {
                    equipment: equipment.remove(&classroom.id).unwrap_or_default(),
                    software: software.remove(&classroom.id).unwrap_or_default(),
                    is_available: blocking.is_empty(),
                    conflicts: blocking,
                    classroom,
                }
            })
            .collect();

        sort_candidates(&mut candidates);

        tracing::info!(
            "Alternative search matched {} classrooms ({} available)",
            candidates.len(),
            candidates.iter().filter(|c| c.is_available).count()
        );

        Ok(candidates)
    }
}

/// Every required id is possessed
pub fn meets_requirements(required: &[Uuid], possessed: &HashSet<Uuid>) -> bool {
    required.iter().all(|id| possessed.contains(id))
}

/// Available first, then classroom code ascending. Stable.
pub fn sort_candidates(candidates: &mut [CandidateClassroom]) {
    candidates.sort_by(|a, b| {
        b.is_available
            .cmp(&a.is_available)
            .then_with(|| a.classroom.code.cmp(&b.classroom.code))
    });
}
