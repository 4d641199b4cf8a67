use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use std::sync::Arc;

use fyyur_db::entities::venue;
use fyyur_db::AppState;
use fyyur_directory::views::{ListingSummary, LocationGroup, VenueDetail};
use fyyur_directory::{form_options, venues, FormOptions, VenueForm};

use super::{reject, request_now, ApiError, EditFormResponse, SearchForm, SearchResponse};

/// GET /venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LocationGroup>>, ApiError> {
    let groups = venues::list_grouped_by_location(&state.db, &request_now())
        .await
        .map_err(reject)?;
    Ok(Json(groups))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResponse<ListingSummary>>, ApiError> {
    let results = venues::search(&state.db, &form.search_term, &request_now())
        .await
        .map_err(reject)?;
    Ok(Json(SearchResponse {
        search_term: form.search_term,
        results,
    }))
}

/// GET /venues/{id}
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>, ApiError> {
    let detail = venues::get_detail(&state.db, id, &request_now())
        .await
        .map_err(reject)?;
    Ok(Json(detail))
}

/// GET /venues/create
pub async fn new_venue_form() -> Json<FormOptions> {
    Json(form_options())
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Json(form): Json<VenueForm>,
) -> Result<(StatusCode, Json<venue::Model>), ApiError> {
    let created = venues::create(&state.db, form).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /venues/{id}/edit
pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EditFormResponse<VenueForm>>, ApiError> {
    let form = venues::get_for_edit(&state.db, id).await.map_err(reject)?;
    Ok(Json(EditFormResponse {
        id,
        form,
        options: form_options(),
    }))
}

/// POST /venues/{id}/edit
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(form): Json<VenueForm>,
) -> Result<Json<venue::Model>, ApiError> {
    let updated = venues::update(&state.db, id, form).await.map_err(reject)?;
    Ok(Json(updated))
}

/// DELETE /venues/{id}
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    venues::delete(&state.db, id).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}
