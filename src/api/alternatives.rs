//! Alternative classroom search endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::availability::{AlternativeSearchRequest, AlternativeSearchResponse, FilterOptions},
};

/// Search classrooms that could replace a conflicting one
#[utoipa::path(
    post,
    path = "/alternatives/search",
    tag = "alternatives",
    request_body = AlternativeSearchRequest,
    responses(
        (status = 200, description = "Candidates, available first", body = AlternativeSearchResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "A newer search with the same key replaced this one", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_alternatives(
    State(state): State<crate::AppState>,
    Json(request): Json<AlternativeSearchRequest>,
) -> AppResult<Json<AlternativeSearchResponse>> {
    let response = state.services.alternatives.search(&request).await?;
    Ok(Json(response))
}

/// Values available for the search filters
#[utoipa::path(
    get,
    path = "/alternatives/filter-options",
    tag = "alternatives",
    responses(
        (status = 200, description = "Filter options", body = FilterOptions)
    )
)]
pub async fn filter_options(State(state): State<crate::AppState>) -> AppResult<Json<FilterOptions>> {
    let options = state.services.catalog.filter_options().await?;
    Ok(Json(options))
}
