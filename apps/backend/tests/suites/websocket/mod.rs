mod error_handling_tests;

use std::time::Duration;

use serde_json::{json, Value};
use spyroom_test_support::WsClient;

use crate::support::server::{TestServer, RECV_TIMEOUT};

/// Connects and consumes the `init` message, returning it with the client.
pub async fn connect_member(server: &TestServer, room: &str, user_id: i64) -> (WsClient, Value) {
    let mut client = WsClient::connect(&server.ws_url(room, user_id))
        .await
        .expect("websocket connect");
    let init = client
        .recv_type("init", RECV_TIMEOUT)
        .await
        .expect("init message");
    (client, init)
}

/// Round-trips a ping so everything queued before it has been read.
pub async fn drain(client: &mut WsClient) {
    tokio::time::sleep(Duration::from_millis(50)).await;
    client
        .send_json(&json!({"action": "ping"}))
        .await
        .expect("send ping");
    client
        .recv_type("pong", RECV_TIMEOUT)
        .await
        .expect("pong");
}

/// Index of the first card of `color` per a spymaster's key, skipping revealed ones.
pub fn find_card(captain_view: &Value, color: &str) -> i64 {
    let colors = captain_view["colors"].as_array().expect("spymaster key");
    let revealed = captain_view["revealed"].as_array().expect("revealed flags");
    colors
        .iter()
        .zip(revealed)
        .position(|(c, open)| c == color && open.as_bool() == Some(false))
        .expect("card of requested color") as i64
}
