//! Venue, artist and show directory queries.
//!
//! Read operations take the evaluation instant `now` explicitly so that a
//! single request classifies every show against the same moment. Writes run
//! in one transaction each and fail with a [`DirectoryError`].

pub mod artists;
pub mod error;
pub mod forms;
pub mod locations;
pub mod shows;
mod store;
pub mod timeline;
pub mod venues;
pub mod views;

pub use error::{DirectoryError, Result};
pub use forms::{form_options, ArtistForm, FormOptions, ShowForm, VenueForm};
pub use timeline::Timestamp;
