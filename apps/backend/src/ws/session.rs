use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::membership::ParticipantId;
use crate::errors::domain::GameError;
use crate::services::room::{Action, Room};
use crate::ws::protocol::{ClientMsg, Envelope, RoomEvent, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// One websocket connection attached to one room.
pub struct RoomWsSession {
    conn_id: Uuid,
    user_id: ParticipantId,
    room: Arc<Room>,
    last_heartbeat: Instant,
}

impl RoomWsSession {
    pub fn new(conn_id: Uuid, user_id: ParticipantId, room: Arc<Room>) -> Self {
        Self {
            conn_id,
            user_id,
            room,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &Envelope) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn reply(ctx: &mut ws::WebsocketContext<Self>, msg: ServerMsg) {
        Self::send_json(ctx, &Envelope::now(msg));
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, kind: &str, message: impl Into<String>) {
        Self::reply(
            ctx,
            ServerMsg::Error {
                kind: kind.to_string(),
                message: message.into(),
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    user_id = actor.user_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let cmd = match serde_json::from_str::<ClientMsg>(text) {
            Ok(cmd) => cmd,
            Err(err) => {
                debug!(conn_id = %self.conn_id, error = %err, "[WS SESSION] unparseable message");
                Self::send_error(ctx, "protocol", format!("Unrecognized message: {err}"));
                return;
            }
        };

        let action = match cmd {
            ClientMsg::Ping => {
                Self::reply(ctx, ServerMsg::Pong);
                return;
            }
            ClientMsg::GetState => {
                match self.room.view_for(Some(self.user_id)) {
                    Ok(game_state) => Self::reply(ctx, ServerMsg::State { game_state }),
                    Err(err) => self.reject(ctx, &err),
                }
                return;
            }
            ClientMsg::ClickCard { index } => Action::Reveal { index },
            ClientMsg::StartGame => Action::Start,
            ClientMsg::GiveHint { word, count } => Action::Hint { word, count },
            ClientMsg::EndTurn => Action::EndTurn,
            ClientMsg::ResetGame => Action::Reset,
        };

        if let Err(err) = self.room.submit(self.user_id, action) {
            self.reject(ctx, &err);
        }
    }

    /// Reports a rejected action to this connection only.
    fn reject(&self, ctx: &mut ws::WebsocketContext<Self>, err: &GameError) {
        warn!(
            conn_id = %self.conn_id,
            user_id = self.user_id,
            room = %self.room.code(),
            kind = err.kind(),
            "[WS SESSION] action rejected: {err}"
        );
        Self::send_error(ctx, err.kind(), err.to_string());
        if matches!(err, GameError::RoomNotFound(_)) {
            ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Away)));
            ctx.stop();
        }
    }
}

impl Actor for RoomWsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            user_id = self.user_id,
            room = %self.room.code(),
            "[WS SESSION] started"
        );

        let recipient = ctx.address().recipient::<RoomEvent>();
        if let Err(err) = self.room.attach(self.conn_id, self.user_id, recipient) {
            Self::send_error(ctx, err.kind(), err.to_string());
            ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Policy)));
            ctx.stop();
            return;
        }

        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.room.detach(self.conn_id);
        info!(
            conn_id = %self.conn_id,
            user_id = self.user_id,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for RoomWsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, "protocol", "Binary frames are not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    user_id = self.user_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<RoomEvent> for RoomWsSession {
    type Result = ();

    fn handle(&mut self, msg: RoomEvent, ctx: &mut Self::Context) -> Self::Result {
        let closes = msg.closes_connection();
        Self::send_json(ctx, &msg.0);
        if closes {
            ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Away)));
            ctx.stop();
        }
    }
}
