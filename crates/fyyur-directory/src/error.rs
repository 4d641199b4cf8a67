//! Error taxonomy shared by every directory operation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    #[error("persistence failed: {0}")]
    PersistenceFailed(#[from] sea_orm::DbErr),
}

impl DirectoryError {
    pub fn venue_not_found(id: i32) -> Self {
        Self::NotFound { entity: "venue", id }
    }

    pub fn artist_not_found(id: i32) -> Self {
        Self::NotFound { entity: "artist", id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
