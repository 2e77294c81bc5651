//! Room management endpoints used by the chat-bot caller.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::colors::Team;
use crate::domain::membership::ParticipantId;
use crate::error::AppError;
use crate::extractors::{CurrentRoom, ValidatedJson};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedRoom {
    pub room_code: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub user_id: ParticipantId,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CaptainRequest {
    pub user_id: ParticipantId,
}

async fn create_room(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let room = app_state.registry.create()?;
    info!(room = %room.code(), "room created via API");
    Ok(HttpResponse::Created().json(CreatedRoom {
        room_code: room.code().to_string(),
    }))
}

async fn list_rooms(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.registry.list()))
}

async fn get_room(room: CurrentRoom) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(room.summary()))
}

async fn join_room(
    room: CurrentRoom,
    body: ValidatedJson<JoinRequest>,
) -> Result<HttpResponse, AppError> {
    let JoinRequest {
        user_id,
        display_name,
    } = body.into_inner();
    let member = room.join(user_id, &display_name)?;
    Ok(HttpResponse::Ok().json(member))
}

async fn leave_room(
    room: CurrentRoom,
    path: web::Path<(String, ParticipantId)>,
) -> Result<HttpResponse, AppError> {
    let (_, user_id) = path.into_inner();
    room.leave(user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

async fn assign_captain(
    room: CurrentRoom,
    path: web::Path<(String, String)>,
    body: ValidatedJson<CaptainRequest>,
) -> Result<HttpResponse, AppError> {
    let (_, team) = path.into_inner();
    let team: Team = team.parse()?;
    let member = room.assign_captain(team, body.user_id)?;
    Ok(HttpResponse::Ok().json(member))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_room))
        .route("", web::get().to(list_rooms))
        .route("/{code}", web::get().to(get_room))
        .route("/{code}/members", web::post().to(join_room))
        .route("/{code}/members/{user_id}", web::delete().to(leave_room))
        .route("/{code}/captains/{team}", web::put().to(assign_captain));
}
