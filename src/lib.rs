//! Aules classroom scheduling server
//!
//! Answers "is this classroom free?" for a weekly time slot and a set of semester
//! weeks, and ranks alternative classrooms when it is not.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
