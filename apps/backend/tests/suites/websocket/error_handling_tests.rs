use std::time::Duration;

use serde_json::json;
use spyroom::state::app_state::AppState;

use super::{connect_member, drain};
use crate::support::rooms::{active_room, BLUE_OPERATIVE, RED_CAPTAIN, RED_OPERATIVE};
use crate::support::server::{start_test_server, wait_for_connections, RECV_TIMEOUT};

const QUIET: Duration = Duration::from_millis(200);

#[actix_web::test]
async fn errors_reach_only_the_sender() {
    let state = AppState::with_defaults();
    let room = active_room(&state);
    let server = start_test_server(state).await.unwrap();

    let (mut red, _) = connect_member(&server, room.code(), RED_OPERATIVE).await;
    let (mut blue, _) = connect_member(&server, room.code(), BLUE_OPERATIVE).await;
    wait_for_connections(&room, 2, RECV_TIMEOUT).await.unwrap();
    drain(&mut red).await;
    drain(&mut blue).await;

    blue.send_json(&json!({"action": "click_card", "index": 0}))
        .await
        .unwrap();
    let err = blue.recv_json(RECV_TIMEOUT).await.unwrap().unwrap();
    assert_eq!(err["type"], "error");
    assert_eq!(err["kind"], "wrong_turn");

    red.expect_silence(QUIET).await.unwrap();
    assert!(room.view_for(None).unwrap().public.revealed.iter().all(|r| !r));
    server.shutdown(&room, vec![red, blue]).await;
}

#[actix_web::test]
async fn out_of_range_and_double_reveal() {
    let state = AppState::with_defaults();
    let room = active_room(&state);
    let server = start_test_server(state).await.unwrap();

    let (mut red, _) = connect_member(&server, room.code(), RED_OPERATIVE).await;
    drain(&mut red).await;

    red.send_json(&json!({"action": "click_card", "index": 25}))
        .await
        .unwrap();
    let err = red.recv_type("error", RECV_TIMEOUT).await.unwrap();
    assert_eq!(err["kind"], "out_of_range");

    let captain_view = room.view_for(Some(RED_CAPTAIN)).unwrap();
    let own = captain_view
        .ownership
        .as_ref()
        .unwrap()
        .iter()
        .position(|c| *c == spyroom::domain::colors::CardColor::Red)
        .unwrap();
    red.send_json(&json!({"action": "click_card", "index": own}))
        .await
        .unwrap();
    red.recv_type("card_revealed", RECV_TIMEOUT).await.unwrap();

    red.send_json(&json!({"action": "click_card", "index": own}))
        .await
        .unwrap();
    let err = red.recv_type("error", RECV_TIMEOUT).await.unwrap();
    assert_eq!(err["kind"], "already_revealed");
    server.shutdown(&room, vec![red]).await;
}

#[actix_web::test]
async fn malformed_input_keeps_the_connection_open() {
    let state = AppState::with_defaults();
    let room = active_room(&state);
    let server = start_test_server(state).await.unwrap();

    let (mut client, _) = connect_member(&server, room.code(), RED_OPERATIVE).await;
    client.send_text("{not json").await.unwrap();
    let err = client.recv_type("error", RECV_TIMEOUT).await.unwrap();
    assert_eq!(err["kind"], "protocol");

    client
        .send_json(&json!({"action": "teleport"}))
        .await
        .unwrap();
    let err = client.recv_type("error", RECV_TIMEOUT).await.unwrap();
    assert_eq!(err["kind"], "protocol");

    client.send_json(&json!({"action": "ping"})).await.unwrap();
    client.recv_type("pong", RECV_TIMEOUT).await.unwrap();
    server.shutdown(&room, vec![client]).await;
}

#[actix_web::test]
async fn operatives_cannot_give_hints() {
    let state = AppState::with_defaults();
    let room = active_room(&state);
    let server = start_test_server(state).await.unwrap();

    let (mut client, _) = connect_member(&server, room.code(), RED_OPERATIVE).await;
    client
        .send_json(&json!({"action": "give_hint", "word": "sneaky", "count": 1}))
        .await
        .unwrap();
    let err = client.recv_type("error", RECV_TIMEOUT).await.unwrap();
    assert_eq!(err["kind"], "not_spymaster");
    server.shutdown(&room, vec![client]).await;
}

#[actix_web::test]
async fn start_twice_is_rejected() {
    let state = AppState::with_defaults();
    let room = active_room(&state);
    let server = start_test_server(state).await.unwrap();

    let (mut client, _) = connect_member(&server, room.code(), RED_CAPTAIN).await;
    client
        .send_json(&json!({"action": "start_game"}))
        .await
        .unwrap();
    let err = client.recv_type("error", RECV_TIMEOUT).await.unwrap();
    assert_eq!(err["kind"], "already_started");
    server.shutdown(&room, vec![client]).await;
}

#[actix_web::test]
async fn out_of_range_hint_counts_are_invalid_hints() {
    let state = AppState::with_defaults();
    let room = active_room(&state);
    let server = start_test_server(state).await.unwrap();

    let (mut client, _) = connect_member(&server, room.code(), RED_CAPTAIN).await;
    for count in [10, 256, -1] {
        client
            .send_json(&json!({"action": "give_hint", "word": "orchard", "count": count}))
            .await
            .unwrap();
        let err = client.recv_type("error", RECV_TIMEOUT).await.unwrap();
        assert_eq!(err["kind"], "invalid_hint", "count {count}");
    }
    assert!(room.view_for(None).unwrap().public.hint.is_none());
    server.shutdown(&room, vec![client]).await;
}
