//! Business logic services

pub mod alternatives;
pub mod availability;
pub mod catalog;
pub mod generations;
pub mod occupancy;
pub mod validation;

use std::sync::Arc;

use crate::{config::SchedulingConfig, repository::ScheduleStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub alternatives: alternatives::AlternativesService,
    pub validation: validation::ValidationService,
    pub occupancy: occupancy::OccupancyService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn ScheduleStore>, scheduling: &SchedulingConfig) -> Self {
        let availability = availability::AvailabilityService::new(store.clone(), scheduling);
        Self {
            alternatives: alternatives::AlternativesService::new(store.clone(), availability.clone()),
            validation: validation::ValidationService::new(store.clone(), availability.clone()),
            occupancy: occupancy::OccupancyService::new(store.clone()),
            catalog: catalog::CatalogService::new(store),
            availability,
        }
    }
}
