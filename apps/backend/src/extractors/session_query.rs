use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::Deserialize;

use crate::domain::ids::SessionId;
use crate::error::AppError;
use crate::errors::ErrorCode;

#[derive(Deserialize)]
struct RawSessionQuery {
    session_id: Option<String>,
}

/// `?session_id=` query parameter, parsed into a [`SessionId`].
///
/// Only the shape is checked here; whether the session exists is the
/// service's call, so unknown ids still reach it and become 404s.
#[derive(Debug, Clone)]
pub struct SessionQuery(pub SessionId);

impl SessionQuery {
    pub fn into_inner(self) -> SessionId {
        self.0
    }
}

impl FromRequest for SessionQuery {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<SessionQuery, AppError> {
    let raw = web::Query::<RawSessionQuery>::from_query(req.query_string())
        .map_err(|_| AppError::bad_request(ErrorCode::BadRequest, "Malformed query string"))?
        .into_inner();

    let value = raw.session_id.ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidSessionId,
            "Missing session_id query parameter",
        )
    })?;

    Ok(SessionQuery(SessionId::parse(&value)?))
}
