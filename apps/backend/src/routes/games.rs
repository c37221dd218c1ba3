//! Session HTTP routes (the polling interface).

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::domain::session::PlayerId;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::turn::TurnAction;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::http::etag::{if_none_match_matches, session_etag};
use crate::services::game_flow::GameFlowMutationResult;
use crate::services::games::SeatClaim;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    #[serde(default)]
    player_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest {
    #[serde(default)]
    session_code: String,
    #[serde(default)]
    player_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartRequest {
    #[serde(default)]
    session_code: String,
    #[serde(default)]
    player_id: Option<PlayerId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TurnRequest {
    #[serde(default)]
    session_code: String,
    #[serde(default)]
    player_id: Option<PlayerId>,
    #[serde(default)]
    action: TurnAction,
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    #[serde(default)]
    code: String,
}

/// Body returned to whoever created or joined a session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeatResponse {
    session_code: String,
    player_id: PlayerId,
    game: GameSnapshot,
}

fn snapshot_response(game: &GameSnapshot) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((ETAG, session_etag(&game.session_code, game.version)))
        .json(game)
}

fn seat_response(claim: SeatClaim) -> HttpResponse {
    let game = claim.mutation.snapshot;
    HttpResponse::Ok()
        .insert_header((ETAG, session_etag(&game.session_code, game.version)))
        .json(SeatResponse {
            session_code: game.session_code.clone(),
            player_id: claim.player_id,
            game,
        })
}

/// Push every HTTP mutation to the session's WebSocket subscribers.
fn publish(app_state: &AppState, result: &GameFlowMutationResult) {
    app_state.realtime.publish_mutation(result);
}

/// POST /api/game/create
async fn create_session(
    JsonBody(body): JsonBody<CreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let claim = app_state.games.create_session(&body.player_name)?;
    publish(&app_state, &claim.mutation);
    Ok(seat_response(claim))
}

/// POST /api/game/join
async fn join_session(
    JsonBody(body): JsonBody<JoinRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let claim = app_state
        .games
        .join_session(&body.session_code, &body.player_name)?;
    publish(&app_state, &claim.mutation);
    Ok(seat_response(claim))
}

/// POST /api/game/start
///
/// Starting a running game answers with the current snapshot.
async fn start_game(
    JsonBody(body): JsonBody<StartRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .games
        .start_game(&body.session_code, body.player_id)?;
    publish(&app_state, &result);
    Ok(snapshot_response(&result.snapshot))
}

/// POST /api/game/turn
async fn take_turn(
    JsonBody(body): JsonBody<TurnRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .game_flow
        .take_turn(&body.session_code, body.action, body.player_id)?;
    publish(&app_state, &result);
    Ok(snapshot_response(&result.snapshot))
}

/// GET /api/game/status?code=
///
/// Returns the snapshot with an ETag; a matching `If-None-Match` yields
/// `304 Not Modified` with no body.
async fn status(
    http_req: HttpRequest,
    query: web::Query<StatusQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state.games.status(&query.code)?;
    let etag_value = session_etag(&game.session_code, game.version);

    let not_modified = http_req
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|client_etag| if_none_match_matches(client_etag, &etag_value));

    if not_modified {
        return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag_value))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag_value))
        .json(game))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/create").route(web::post().to(create_session)))
        .service(web::resource("/join").route(web::post().to(join_session)))
        .service(web::resource("/start").route(web::post().to(start_game)))
        .service(web::resource("/turn").route(web::post().to(take_turn)))
        .service(web::resource("/status").route(web::get().to(status)));
}
