//! Websocket transport for rooms.
//!
//! `upgrade` validates the query and membership before switching protocols, so
//! rejected clients get a plain HTTP error rather than a socket that closes.

pub mod hub;
pub mod protocol;
pub mod session;

use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::membership::ParticipantId;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;
use crate::ws::session::RoomWsSession;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub room: String,
    pub user_id: ParticipantId,
}

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let query = web::Query::<WsQuery>::from_query(req.query_string())
        .map_err(|e| AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query: {e}")))?
        .into_inner();

    let room = app_state.registry.get(&query.room).map_err(AppError::from)?;
    if !room.is_member(query.user_id) {
        return Err(AppError::forbidden(
            ErrorCode::NotAMember,
            format!("User {} has not joined room {}", query.user_id, room.code()),
        )
        .into());
    }

    let conn_id = Uuid::new_v4();
    info!(room = %room.code(), user_id = query.user_id, %conn_id, "websocket upgrade");
    ws::start(RoomWsSession::new(conn_id, query.user_id, room), &req, stream)
}
