mod common;

use chrono::{TimeZone, Utc};
use fyyur_db::entities::show;
use fyyur_db::sea_orm::{EntityTrait, PaginatorTrait};
use fyyur_directory::{shows, DirectoryError, ShowForm};

use common::*;

#[tokio::test]
async fn test_list_joins_venue_and_artist() {
    let db = test_db().await;
    let hop = seed_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let petals = seed_artist(&db, "Guns N Petals").await;
    let sax = seed_artist(&db, "The Wild Sax Band").await;
    let start = Utc.with_ymd_and_hms(2035, 5, 21, 21, 30, 0).unwrap().fixed_offset();
    seed_show(&db, petals.id, hop.id, start).await;
    seed_show(&db, sax.id, hop.id, days_from_now(-5)).await;

    let listed = shows::list(&db).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].venue_name, "The Musical Hop");
    assert_eq!(listed[0].artist_name, "Guns N Petals");
    assert_eq!(listed[0].start_time, start);
    assert_eq!(listed[1].artist_id, sax.id);
}

#[tokio::test]
async fn test_list_empty() {
    let db = test_db().await;
    assert!(shows::list(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_dangling_ids_fail_persistence_and_roll_back() {
    let db = test_db().await;
    let hop = seed_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

    let err = shows::create(&db, show_form(77, hop.id, days_from_now(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::PersistenceFailed(_)));
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_accepts_naive_start_time() {
    let db = test_db().await;
    let hop = seed_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = seed_artist(&db, "Guns N Petals").await;

    let created = shows::create(
        &db,
        ShowForm {
            artist_id: Some(artist.id),
            venue_id: Some(hop.id),
            start_time: "2035-06-15 21:00:00".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.start_time.to_rfc3339(), "2035-06-15T21:00:00+00:00");
}

#[tokio::test]
async fn test_malformed_form_is_validation_failure() {
    let db = test_db().await;
    let err = shows::create(&db, ShowForm::default()).await.unwrap_err();
    match err {
        DirectoryError::ValidationFailed(issues) => assert_eq!(issues.len(), 3),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_defaults_start_now() {
    let instant = now();
    assert_eq!(shows::defaults(&instant).start_time, instant);
}
