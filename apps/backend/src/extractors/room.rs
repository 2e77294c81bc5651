use std::ops::Deref;
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::services::room::Room;
use crate::state::app_state::AppState;

/// The room named by the `{code}` path segment.
///
/// Resolves through the registry, so a missing or closed room is a 404 before
/// the handler runs.
pub struct CurrentRoom(pub Arc<Room>);

impl Deref for CurrentRoom {
    type Target = Room;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentRoom {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}

fn resolve(req: &HttpRequest) -> Result<CurrentRoom, AppError> {
    let code = req.match_info().get("code").ok_or_else(|| {
        AppError::bad_request(
            crate::errors::ErrorCode::BadRequest,
            "Missing room code parameter",
        )
    })?;
    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;
    let room = app_state.registry.get(code)?;
    Ok(CurrentRoom(room))
}
