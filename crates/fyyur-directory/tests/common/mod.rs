// Shared fixtures for directory integration tests
#![allow(dead_code)]

use chrono::{Duration, Utc};
use fyyur_db::entities::{artist, show, venue};
use fyyur_db::sea_orm::DatabaseConnection;
use fyyur_db::DatabaseConfig;
use fyyur_directory::{artists, shows, venues, ArtistForm, ShowForm, Timestamp, VenueForm};
use fyyur_migration::{Migrator, MigratorTrait};

/// A freshly migrated in-memory database.
pub async fn test_db() -> DatabaseConnection {
    let db = fyyur_db::connect(&DatabaseConfig::sqlite_memory())
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn now() -> Timestamp {
    Utc::now().fixed_offset()
}

pub fn days_from_now(days: i64) -> Timestamp {
    now() + Duration::days(days)
}

pub fn venue_form(name: &str, city: &str, state: &str, genres: &[&str]) -> VenueForm {
    VenueForm {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        image_link: Some(format!("https://img.example.com/{}.jpg", name.len())),
        seeking_talent: true,
        seeking_description: Some("Looking for local acts".to_string()),
        ..Default::default()
    }
}

pub fn artist_form(name: &str) -> ArtistForm {
    ArtistForm {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: Some("326-123-5000".to_string()),
        genres: vec!["Rock n Roll".to_string()],
        image_link: Some("https://img.example.com/artist.jpg".to_string()),
        ..Default::default()
    }
}

pub async fn seed_venue(db: &DatabaseConnection, name: &str, city: &str, state: &str) -> venue::Model {
    venues::create(db, venue_form(name, city, state, &["Jazz"]))
        .await
        .expect("create venue")
}

pub async fn seed_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    artists::create(db, artist_form(name))
        .await
        .expect("create artist")
}

pub fn show_form(artist_id: i32, venue_id: i32, start_time: Timestamp) -> ShowForm {
    ShowForm {
        artist_id: Some(artist_id),
        venue_id: Some(venue_id),
        start_time: start_time.to_rfc3339(),
    }
}

pub async fn seed_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start_time: Timestamp,
) -> show::Model {
    shows::create(db, show_form(artist_id, venue_id, start_time))
        .await
        .expect("create show")
}
