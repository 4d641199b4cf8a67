//! HTTP surface for the Fyyur directory.

pub mod api;
pub mod config;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use fyyur_db::AppState;

#[derive(Serialize)]
pub struct ApiStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// Every directory route, with request tracing and security headers.
///
/// CORS is left to the caller since it depends on deployment config.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/venues", get(api::venues::list_venues))
        .route("/venues/search", post(api::venues::search_venues))
        .route(
            "/venues/create",
            get(api::venues::new_venue_form).post(api::venues::create_venue),
        )
        .route(
            "/venues/{id}",
            get(api::venues::get_venue).delete(api::venues::delete_venue),
        )
        .route(
            "/venues/{id}/edit",
            get(api::venues::edit_venue_form).post(api::venues::update_venue),
        )
        .route("/artists", get(api::artists::list_artists))
        .route("/artists/search", post(api::artists::search_artists))
        .route(
            "/artists/create",
            get(api::artists::new_artist_form).post(api::artists::create_artist),
        )
        .route("/artists/{id}", get(api::artists::get_artist))
        .route(
            "/artists/{id}/edit",
            get(api::artists::edit_artist_form).post(api::artists::update_artist),
        )
        .route("/shows", get(api::shows::list_shows))
        .route(
            "/shows/create",
            get(api::shows::new_show_form).post(api::shows::create_show),
        )
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
