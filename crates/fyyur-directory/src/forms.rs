//! Listing forms and their business validation.
//!
//! Forms deserialize leniently (every field defaults) so that a missing
//! field is reported alongside every other issue instead of failing the
//! whole request body. `validate` collects all problems into a single
//! [`DirectoryError::ValidationFailed`].

use chrono::{NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use fyyur_db::entities::{artist, venue, GenreList};

use crate::error::{DirectoryError, Result};
use crate::timeline::Timestamp;

/// Venues may list at most this many genres when first created.
pub const MAX_VENUE_GENRES: usize = 4;

pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const STATE_CHOICES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}$").expect("phone pattern compiles")
});

/// Choice lists offered by the create and edit forms.
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

pub fn form_options() -> FormOptions {
    FormOptions {
        genres: GENRE_CHOICES,
        states: STATE_CHOICES,
    }
}

/// Whether a listing is being created or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Venue fields after validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: GenreList,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn validate(self, mode: WriteMode) -> Result<VenueFields> {
        let mut issues = Issues::default();

        let name = issues.required("name", &self.name);
        let city = issues.required("city", &self.city);
        let state = issues.state(&self.state);
        let address = issues.required("address", &self.address);
        let phone = issues.phone(self.phone.as_deref());
        let genres = issues.genres(&self.genres);
        if mode == WriteMode::Create && genres.len() > MAX_VENUE_GENRES {
            issues.push(format!(
                "at most {MAX_VENUE_GENRES} genres may be selected, got {}",
                genres.len()
            ));
        }
        let website_link = issues.link("website_link", self.website_link.as_deref());
        let facebook_link = issues.link("facebook_link", self.facebook_link.as_deref());
        let image_link = issues.link("image_link", self.image_link.as_deref());

        issues.finish(VenueFields {
            name,
            city,
            state,
            address,
            phone,
            genres,
            website_link,
            facebook_link,
            image_link,
            seeking_talent: self.seeking_talent,
            seeking_description: optional(self.seeking_description.as_deref()),
        })
    }
}

impl From<venue::Model> for VenueForm {
    fn from(v: venue::Model) -> Self {
        Self {
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone,
            genres: v.genres.0,
            website_link: v.website_link,
            facebook_link: v.facebook_link,
            image_link: v.image_link,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: GenreList,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn validate(self) -> Result<ArtistFields> {
        let mut issues = Issues::default();

        let name = issues.required("name", &self.name);
        let city = issues.required("city", &self.city);
        let state = issues.state(&self.state);
        let phone = issues.phone(self.phone.as_deref());
        let genres = issues.genres(&self.genres);
        let website_link = issues.link("website_link", self.website_link.as_deref());
        let facebook_link = issues.link("facebook_link", self.facebook_link.as_deref());
        let image_link = issues.link("image_link", self.image_link.as_deref());

        issues.finish(ArtistFields {
            name,
            city,
            state,
            phone,
            genres,
            website_link,
            facebook_link,
            image_link,
            seeking_venue: self.seeking_venue,
            seeking_description: optional(self.seeking_description.as_deref()),
        })
    }
}

impl From<artist::Model> for ArtistForm {
    fn from(a: artist::Model) -> Self {
        Self {
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone,
            genres: a.genres.0,
            website_link: a.website_link,
            facebook_link: a.facebook_link,
            image_link: a.image_link,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: Option<i32>,
    pub venue_id: Option<i32>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowFields {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: Timestamp,
}

impl ShowForm {
    /// Checks the shape of the submitted values only; whether the artist and
    /// venue exist is left to the store.
    pub fn validate(self) -> Result<ShowFields> {
        let mut issues = Issues::default();

        if self.artist_id.is_none() {
            issues.push("artist_id is required");
        }
        if self.venue_id.is_none() {
            issues.push("venue_id is required");
        }
        let start_time = parse_start_time(&self.start_time);
        if start_time.is_none() {
            issues.push(format!(
                "start_time {:?} is not a valid date and time",
                self.start_time
            ));
        }

        match (self.artist_id, self.venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if issues.is_empty() => {
                Ok(ShowFields {
                    artist_id,
                    venue_id,
                    start_time,
                })
            }
            _ => Err(DirectoryError::ValidationFailed(issues.0)),
        }
    }
}

/// Default values for a new show form.
#[derive(Debug, Clone, Serialize)]
pub struct ShowDefaults {
    pub start_time: Timestamp,
}

/// Parses an RFC 3339 timestamp, or a naive `YYYY-MM-DD HH:MM[:SS]` value
/// (space or `T` separated) taken as UTC.
pub fn parse_start_time(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(t) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(t);
    }
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Default)]
struct Issues(Vec<String>);

impl Issues {
    fn push(&mut self, issue: impl Into<String>) {
        self.0.push(issue.into());
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn required(&mut self, field: &str, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.push(format!("{field} is required"));
        }
        value.to_string()
    }

    fn state(&mut self, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.push("state is required");
        } else if !STATE_CHOICES.contains(&value) {
            self.push(format!("state {value:?} is not a valid choice"));
        }
        value.to_string()
    }

    fn phone(&mut self, value: Option<&str>) -> Option<String> {
        let phone = optional(value)?;
        if !PHONE_PATTERN.is_match(&phone) {
            self.push(format!("phone {phone:?} must look like xxx-xxx-xxxx"));
        }
        Some(phone)
    }

    fn genres(&mut self, values: &[String]) -> GenreList {
        let genres = GenreList::normalized(values);
        if genres.is_empty() {
            self.push("at least one genre is required");
        }
        for genre in genres.iter() {
            if !GENRE_CHOICES.contains(&genre) {
                self.push(format!("genre {genre:?} is not a valid choice"));
            }
        }
        genres
    }

    fn link(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let link = optional(value)?;
        match url::Url::parse(&link) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => self.push(format!("{field} must be an http(s) URL")),
        }
        Some(link)
    }

    fn finish<T>(self, value: T) -> Result<T> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(DirectoryError::ValidationFailed(self.0))
        }
    }
}
