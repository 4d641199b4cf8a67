use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use fyyur_db::entities::show;
use fyyur_db::AppState;
use fyyur_directory::forms::ShowDefaults;
use fyyur_directory::views::ShowListing;
use fyyur_directory::{shows, ShowForm};

use super::{reject, request_now, ApiError};

/// GET /shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowListing>>, ApiError> {
    let listings = shows::list(&state.db).await.map_err(reject)?;
    Ok(Json(listings))
}

/// GET /shows/create
pub async fn new_show_form() -> Json<ShowDefaults> {
    Json(shows::defaults(&request_now()))
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ShowForm>,
) -> Result<(StatusCode, Json<show::Model>), ApiError> {
    let created = shows::create(&state.db, form).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(created)))
}
