use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// JSON body extractor whose failures render as problem details (400
/// `BAD_REQUEST`) instead of actix's plain-text default.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let is_json = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        let body = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            if !is_json {
                return Err(AppError::bad_request(
                    ErrorCode::BadRequest,
                    "Expected Content-Type: application/json",
                ));
            }
            let body = body.await.map_err(|e| {
                AppError::bad_request(ErrorCode::BadRequest, format!("Failed to read body: {e}"))
            })?;
            serde_json::from_slice(&body).map(ValidatedJson).map_err(|e| {
                debug!(error = %e, "rejected JSON body");
                AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON: {e}"))
            })
        })
    }
}
