//! Filter catalog for the alternative search

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{availability::FilterOptions, classroom::ClassroomType},
    repository::ScheduleStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ScheduleStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    /// Classroom types, equipment types and software to offer as filters
    pub async fn filter_options(&self) -> AppResult<FilterOptions> {
        let (labels, equipment_types, software) = tokio::try_join!(
            self.store.classroom_types(),
            self.store.equipment_types(),
            self.store.software_catalog()
        )?;

        let classroom_types: BTreeSet<ClassroomType> =
            labels.iter().map(|l| ClassroomType::from_label(l)).collect();

        Ok(FilterOptions {
            classroom_types: classroom_types.into_iter().collect(),
            equipment_types,
            software,
        })
    }

    /// Whether the backend answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
