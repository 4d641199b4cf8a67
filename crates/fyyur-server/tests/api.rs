mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;

use common::*;

fn in_days(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

#[tokio::test]
async fn test_healthz_sets_security_headers() {
    let app = test_app().await;
    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
}

#[tokio::test]
async fn test_booking_flow_over_http() {
    let app = test_app().await;
    let venue_id = create_id(&app, "/venues/create", venue_body("Test Hall", "Denver", "CO")).await;
    let artist_id = create_id(&app, "/artists/create", artist_body("Guns N Petals")).await;
    create_id(
        &app,
        "/shows/create",
        json!({ "artist_id": artist_id, "venue_id": venue_id, "start_time": in_days(30) }),
    )
    .await;
    create_id(
        &app,
        "/shows/create",
        json!({ "artist_id": artist_id, "venue_id": venue_id, "start_time": "2019-05-21 21:30" }),
    )
    .await;

    let (status, groups) = get(&app, "/venues").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        groups,
        json!([{
            "city": "Denver",
            "state": "CO",
            "venues": [{ "id": venue_id, "name": "Test Hall", "num_upcoming_shows": 1 }]
        }])
    );

    let (status, detail) = get(&app, &format!("/venues/{venue_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["past_shows_count"], 1);
    assert_eq!(detail["upcoming_shows_count"], 1);
    assert_eq!(detail["upcoming_shows"][0]["artist_name"], "Guns N Petals");
    assert_eq!(detail["genres"], json!(["Jazz", "Folk"]));

    let (status, detail) = get(&app, &format!("/artists/{artist_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["past_shows"][0]["venue_name"], "Test Hall");

    let (status, listings) = get(&app, "/shows").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listings.as_array().unwrap().len(), 2);
    assert_eq!(listings[1]["start_time"], "2019-05-21T21:30:00Z");
}

#[tokio::test]
async fn test_search_echoes_term() {
    let app = test_app().await;
    create_id(&app, "/venues/create", venue_body("The Musical Hop", "San Francisco", "CA")).await;
    create_id(&app, "/venues/create", venue_body("Park Square Live Music & Coffee", "San Francisco", "CA")).await;

    let (status, body) = post_search(&app, "/venues/search", "Hop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_term"], "Hop");
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "The Musical Hop");

    let (_, body) = post_search(&app, "/venues/search", "music").await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_artist_search_without_term_matches_all() {
    let app = test_app().await;
    create_id(&app, "/artists/create", artist_body("Guns N Petals")).await;
    create_id(&app, "/artists/create", artist_body("Matt Quevedo")).await;

    let request = Request::post("/artists/search")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_term"], "");
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_missing_listing_is_404() {
    let app = test_app().await;

    let (status, body) = get(&app, "/venues/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "venue 42 not found");

    let (status, _) = get(&app, "/artists/42/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_json(&app, "/artists/42/edit", artist_body("Nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, "/venues/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_venue_is_422_with_issues() {
    let app = test_app().await;
    let mut body = venue_body("Too Many Genres", "Denver", "CO");
    body["genres"] = json!(["Jazz", "Folk", "Blues", "Soul", "Funk"]);
    body["state"] = json!("ZZ");

    let (status, response) = post_json(&app, "/venues/create", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["issues"].as_array().unwrap().len(), 2);

    let (_, groups) = get(&app, "/venues").await;
    assert_eq!(groups, json!([]));
}

#[tokio::test]
async fn test_show_with_unknown_artist_is_500() {
    let app = test_app().await;
    let venue_id = create_id(&app, "/venues/create", venue_body("Test Hall", "Denver", "CO")).await;

    let (status, body) = post_json(
        &app,
        "/shows/create",
        json!({ "artist_id": 999, "venue_id": venue_id, "start_time": in_days(3) }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["issues"].is_null());

    let (_, listings) = get(&app, "/shows").await;
    assert_eq!(listings, json!([]));
}

#[tokio::test]
async fn test_edit_venue_round_trip() {
    let app = test_app().await;
    let venue_id = create_id(&app, "/venues/create", venue_body("Test Hall", "Denver", "CO")).await;

    let (status, edit) = get(&app, &format!("/venues/{venue_id}/edit")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edit["id"], venue_id);
    assert_eq!(edit["form"]["name"], "Test Hall");
    assert!(edit["options"]["states"].as_array().unwrap().len() == 51);

    let mut form = edit["form"].clone();
    form["name"] = json!("Test Hall Annex");
    form["seeking_talent"] = json!(false);
    let (status, updated) = post_json(&app, &format!("/venues/{venue_id}/edit"), form).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Test Hall Annex");
    assert_eq!(updated["seeking_talent"], false);
}

#[tokio::test]
async fn test_delete_venue_removes_it_and_its_shows() {
    let app = test_app().await;
    let venue_id = create_id(&app, "/venues/create", venue_body("Test Hall", "Denver", "CO")).await;
    let artist_id = create_id(&app, "/artists/create", artist_body("Guns N Petals")).await;
    create_id(
        &app,
        "/shows/create",
        json!({ "artist_id": artist_id, "venue_id": venue_id, "start_time": in_days(7) }),
    )
    .await;

    let (status, body) = delete(&app, &format!("/venues/{venue_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = get(&app, &format!("/venues/{venue_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, listings) = get(&app, "/shows").await;
    assert_eq!(listings, json!([]));

    let (_, artist) = get(&app, &format!("/artists/{artist_id}")).await;
    assert_eq!(artist["upcoming_shows_count"], 0);
}

#[tokio::test]
async fn test_create_pages_offer_choices() {
    let app = test_app().await;

    let (status, options) = get(&app, "/artists/create").await;
    assert_eq!(status, StatusCode::OK);
    assert!(options["genres"]
        .as_array()
        .unwrap()
        .contains(&json!("Hip-Hop")));

    let (status, defaults) = get(&app, "/shows/create").await;
    assert_eq!(status, StatusCode::OK);
    assert!(defaults["start_time"].is_string());
}
