use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use std::sync::Arc;

use fyyur_db::entities::artist;
use fyyur_db::AppState;
use fyyur_directory::views::{ArtistDetail, ArtistListItem, ListingSummary};
use fyyur_directory::{artists, form_options, ArtistForm, FormOptions};

use super::{reject, request_now, ApiError, EditFormResponse, SearchForm, SearchResponse};

/// GET /artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistListItem>>, ApiError> {
    let items = artists::list(&state.db).await.map_err(reject)?;
    Ok(Json(items))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResponse<ListingSummary>>, ApiError> {
    let results = artists::search(&state.db, &form.search_term, &request_now())
        .await
        .map_err(reject)?;
    Ok(Json(SearchResponse {
        search_term: form.search_term,
        results,
    }))
}

/// GET /artists/{id}
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let detail = artists::get_detail(&state.db, id, &request_now())
        .await
        .map_err(reject)?;
    Ok(Json(detail))
}

/// GET /artists/create
pub async fn new_artist_form() -> Json<FormOptions> {
    Json(form_options())
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ArtistForm>,
) -> Result<(StatusCode, Json<artist::Model>), ApiError> {
    let created = artists::create(&state.db, form).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /artists/{id}/edit
pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EditFormResponse<ArtistForm>>, ApiError> {
    let form = artists::get_for_edit(&state.db, id).await.map_err(reject)?;
    Ok(Json(EditFormResponse {
        id,
        form,
        options: form_options(),
    }))
}

/// POST /artists/{id}/edit
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(form): Json<ArtistForm>,
) -> Result<Json<artist::Model>, ApiError> {
    let updated = artists::update(&state.db, id, form).await.map_err(reject)?;
    Ok(Json(updated))
}
