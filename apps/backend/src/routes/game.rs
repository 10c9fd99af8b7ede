//! Session endpoints. Handlers only translate between the wire shape and
//! the coordination services.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ParticipantId, SessionId};
use crate::domain::session::{JoinOutcome, MoveRecord, SessionState};
use crate::error::AppError;
use crate::extractors::{SessionQuery, ValidatedJson};
use crate::services::{matchmaking, move_gate, sessions};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinResponse {
    pub session_id: String,
    pub player_id: String,
}

impl From<JoinOutcome> for JoinResponse {
    fn from(outcome: JoinOutcome) -> Self {
        Self {
            session_id: outcome.session_id.into_string(),
            player_id: outcome.participant_id.into_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateResponse {
    pub players: u32,
    pub moves: u32,
    pub phase: String,
}

impl From<SessionState> for StateResponse {
    fn from(state: SessionState) -> Self {
        Self {
            players: state.occupancy,
            moves: state.moves_recorded,
            phase: state.phase.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub session_id: String,
    pub player_id: String,
    pub choice: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultEntry {
    pub player: String,
    pub choice: String,
}

impl From<MoveRecord> for ResultEntry {
    fn from(record: MoveRecord) -> Self {
        Self {
            player: record.participant_id.into_string(),
            choice: record.choice.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultsResponse {
    pub results: Vec<ResultEntry>,
}

async fn join(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let outcome = matchmaking::join(app_state.store(), app_state.config().capacity).await?;
    Ok(HttpResponse::Ok().json(JoinResponse::from(outcome)))
}

async fn state(
    app_state: web::Data<AppState>,
    query: SessionQuery,
) -> Result<HttpResponse, AppError> {
    let session_id = query.into_inner();
    let state = sessions::get_state(
        app_state.store(),
        app_state.config().capacity,
        &session_id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(StateResponse::from(state)))
}

async fn submit_move(
    app_state: web::Data<AppState>,
    body: ValidatedJson<MoveRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let session_id = SessionId::parse(&body.session_id)?;
    let participant_id = ParticipantId::parse(&body.player_id)?;

    let state = move_gate::submit_move(
        app_state.store(),
        app_state.config(),
        &session_id,
        &participant_id,
        &body.choice,
    )
    .await?;
    Ok(HttpResponse::Ok().json(StateResponse::from(state)))
}

async fn results(
    app_state: web::Data<AppState>,
    query: SessionQuery,
) -> Result<HttpResponse, AppError> {
    let session_id = query.into_inner();
    let records = sessions::get_results(app_state.store(), &session_id).await?;
    let response = ResultsResponse {
        results: records.into_iter().map(ResultEntry::from).collect(),
    };
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/join", web::post().to(join))
        .route("/state", web::get().to(state))
        .route("/move", web::post().to(submit_move))
        .route("/result", web::get().to(results));
}
