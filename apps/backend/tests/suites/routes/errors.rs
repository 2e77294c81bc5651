use std::time::Duration;

use actix_web::test;
use serde_json::json;
use spyroom::config::rooms::RoomSettings;
use spyroom::domain::deck::WordDeck;
use spyroom::services::registry::RoomRegistry;
use spyroom::state::app_state::AppState;

use crate::common::assert_problem;

#[actix_web::test]
async fn unknown_room_is_404() {
    let app = init_app!(AppState::with_defaults());
    let req = test::TestRequest::get().uri("/api/rooms/NOPE1234").to_request();
    let problem = assert_problem(test::call_service(&app, req).await, 404, "ROOM_NOT_FOUND").await;
    assert!(problem["detail"].as_str().unwrap().contains("NOPE1234"));
}

#[actix_web::test]
async fn bad_team_is_400() {
    let state = AppState::with_defaults();
    let room = state.registry.create().unwrap();
    room.join(1, "one").unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/api/rooms/{}/captains/green", room.code()))
        .set_json(json!({"user_id": 1}))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 400, "INVALID_TEAM").await;
}

#[actix_web::test]
async fn captain_for_stranger_is_404() {
    let state = AppState::with_defaults();
    let room = state.registry.create().unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/api/rooms/{}/captains/red", room.code()))
        .set_json(json!({"user_id": 77}))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 404, "NOT_A_MEMBER").await;
}

#[actix_web::test]
async fn occupied_seat_is_409() {
    let state = AppState::with_defaults();
    let room = state.registry.create().unwrap();
    room.join(1, "one").unwrap();
    room.join(2, "two").unwrap();
    room.assign_captain(spyroom::domain::colors::Team::Blue, 1)
        .unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/api/rooms/{}/captains/blue", room.code()))
        .set_json(json!({"user_id": 2}))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 409, "SEAT_TAKEN").await;
    assert!(room.view_for(Some(1)).unwrap().has_ownership());
    assert!(!room.view_for(Some(2)).unwrap().has_ownership());
}

#[actix_web::test]
async fn malformed_body_is_400() {
    let state = AppState::with_defaults();
    let room = state.registry.create().unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/api/rooms/{}/members", room.code()))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"user_id\": \"not a number\"}")
        .to_request();
    assert_problem(test::call_service(&app, req).await, 400, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn full_registry_is_503() {
    let settings = RoomSettings {
        max_rooms: 1,
        max_age: Duration::from_secs(60),
        finished_grace: Duration::from_secs(30),
        sweep_interval: Duration::from_secs(60),
    };
    let state = AppState::new(std::sync::Arc::new(RoomRegistry::new(
        WordDeck::builtin(),
        settings,
    )));
    let app = init_app!(state);

    let first = test::call_service(&app, test::TestRequest::post().uri("/api/rooms").to_request()).await;
    assert!(first.status().is_success());
    let second = test::call_service(&app, test::TestRequest::post().uri("/api/rooms").to_request()).await;
    assert_problem(second, 503, "REGISTRY_FULL").await;
}
