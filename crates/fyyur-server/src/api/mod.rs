pub mod artists;
pub mod shows;
pub mod venues;

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use fyyur_directory::{DirectoryError, FormOptions, Timestamp};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps a directory failure onto one status code per error kind.
///
/// Store failures were already logged with their cause by the directory;
/// clients only get a generic message.
pub fn reject(err: DirectoryError) -> ApiError {
    let (status, error, issues) = match err {
        DirectoryError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string(), Vec::new()),
        DirectoryError::ValidationFailed(issues) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please check your inputs!".to_string(),
            issues,
        ),
        DirectoryError::PersistenceFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An error occurred. Your changes could not be saved.".to_string(),
            Vec::new(),
        ),
    };
    (status, Json(ErrorResponse { error, issues }))
}

/// The instant every show in this request is classified against.
pub fn request_now() -> Timestamp {
    chrono::Utc::now().fixed_offset()
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse<T> {
    pub search_term: String,
    #[serde(flatten)]
    pub results: fyyur_directory::views::SearchResults<T>,
}

/// Pre-filled edit form for an existing listing.
#[derive(Debug, Serialize)]
pub struct EditFormResponse<F> {
    pub id: i32,
    pub form: F,
    pub options: FormOptions,
}
