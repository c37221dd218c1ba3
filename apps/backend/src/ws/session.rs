use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::session::PlayerId;
use crate::domain::turn::TurnAction;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::services::games::SeatClaim;
use crate::state::app_state::AppState;
use crate::utils::join_code::normalize_code;
use crate::ws::hub::{GameSessionRegistry, HubEvent};
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = Uuid::new_v4();
    let registry = app_state.websocket_registry();
    let session = WsSession::new(conn_id, app_state, registry);
    ws::start(session, &req, stream)
}

/// The session and seat a connection occupies once it has created or joined.
#[derive(Debug, Clone)]
struct Membership {
    session_code: String,
    player_id: PlayerId,
}

pub struct WsSession {
    conn_id: Uuid,
    app_state: web::Data<AppState>,
    registry: Arc<GameSessionRegistry>,
    membership: Option<Membership>,

    /// Highest broadcast version forwarded to the client.
    last_version: u64,

    last_heartbeat: Instant,
}

impl WsSession {
    fn new(
        conn_id: Uuid,
        app_state: web::Data<AppState>,
        registry: Arc<GameSessionRegistry>,
    ) -> Self {
        Self {
            conn_id,
            app_state,
            registry,
            membership: None,
            last_version: 0,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "could not encode server message"),
        }
    }

    fn send_error(
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_json(ctx, &ServerMsg::error(code, message));
    }

    fn send_domain_error(&self, ctx: &mut ws::WebsocketContext<Self>, err: &DomainError) {
        debug!(
            conn_id = %self.conn_id,
            code = %err.code(),
            detail = err.detail(),
            "ws request rejected"
        );
        Self::send_error(ctx, err.code(), err.detail());
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_error(ctx, code, message);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if actor.last_heartbeat.elapsed() > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "ws peer silent, closing");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    /// Resolve the session a start/turn request targets. A connection can
    /// only act inside the session it belongs to.
    fn target_session(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        requested: Option<&str>,
    ) -> Option<Membership> {
        let Some(membership) = self.membership.clone() else {
            Self::send_error(
                ctx,
                ErrorCode::BadRequest,
                "Create or join a session first",
            );
            return None;
        };
        if let Some(raw) = requested {
            if normalize_code(raw) != membership.session_code {
                Self::send_error(
                    ctx,
                    ErrorCode::BadRequest,
                    format!("Not a member of session {}", normalize_code(raw)),
                );
                return None;
            }
        }
        Some(membership)
    }

    /// Join the broadcast group, answer privately, then fan the seat claim
    /// out to the whole group (including this connection).
    fn claim_seat(
        &mut self,
        ctx: &mut ws::WebsocketContext<Self>,
        claim: SeatClaim,
        created: bool,
    ) {
        let session_code = claim.mutation.session_code().to_string();
        self.registry
            .register(&session_code, self.conn_id, ctx.address().recipient());
        self.membership = Some(Membership {
            session_code: session_code.clone(),
            player_id: claim.player_id,
        });

        info!(
            conn_id = %self.conn_id,
            session_code = %session_code,
            player_id = %claim.player_id,
            created,
            "ws connection seated"
        );

        let game = claim.mutation.snapshot.clone();
        let reply = if created {
            ServerMsg::SessionCreated {
                session_code,
                player_id: claim.player_id,
                game,
            }
        } else {
            ServerMsg::SessionJoined {
                session_code,
                player_id: claim.player_id,
                game,
            }
        };
        Self::send_json(ctx, &reply);
        self.registry.publish_mutation(&claim.mutation);
    }

    fn handle_client_msg(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match cmd {
            ClientMsg::CreateSession { player_name } => {
                if self.membership.is_some() {
                    Self::send_error(ctx, ErrorCode::BadRequest, "Already in a session");
                    return;
                }
                match self.app_state.games.create_session(&player_name) {
                    Ok(claim) => self.claim_seat(ctx, claim, true),
                    Err(err) => self.send_domain_error(ctx, &err),
                }
            }

            ClientMsg::JoinSession {
                session_code,
                player_name,
            } => {
                if self.membership.is_some() {
                    Self::send_error(ctx, ErrorCode::BadRequest, "Already in a session");
                    return;
                }
                match self.app_state.games.join_session(&session_code, &player_name) {
                    Ok(claim) => self.claim_seat(ctx, claim, false),
                    Err(err) => self.send_domain_error(ctx, &err),
                }
            }

            ClientMsg::StartGame { session_code } => {
                let Some(membership) = self.target_session(ctx, session_code.as_deref()) else {
                    return;
                };
                match self
                    .app_state
                    .games
                    .start_game(&membership.session_code, Some(membership.player_id))
                {
                    Ok(result) if result.is_noop() => {
                        Self::send_json(
                            ctx,
                            &ServerMsg::GameUpdated {
                                game: result.snapshot,
                            },
                        );
                    }
                    Ok(result) => {
                        self.registry.publish_mutation(&result);
                    }
                    Err(err) => self.send_domain_error(ctx, &err),
                }
            }

            ClientMsg::PlayerTurn {
                session_code,
                player_id,
                action,
            } => {
                let Some(membership) = self.target_session(ctx, session_code.as_deref()) else {
                    return;
                };
                if player_id.is_some_and(|id| id != membership.player_id) {
                    Self::send_error(
                        ctx,
                        ErrorCode::BadRequest,
                        "playerId does not match this connection",
                    );
                    return;
                }
                self.take_turn(ctx, &membership, action);
            }
        }
    }

    fn take_turn(
        &mut self,
        ctx: &mut ws::WebsocketContext<Self>,
        membership: &Membership,
        action: TurnAction,
    ) {
        match self.app_state.game_flow.take_turn(
            &membership.session_code,
            action,
            Some(membership.player_id),
        ) {
            Ok(result) => {
                self.registry.publish_mutation(&result);
            }
            Err(err) => self.send_domain_error(ctx, &err),
        }
    }

    /// Vacate the seat held by this connection and tell the rest of the group.
    fn leave_session(&mut self) {
        let Some(membership) = self.membership.take() else {
            return;
        };
        self.registry
            .unregister(&membership.session_code, self.conn_id);

        match self
            .app_state
            .games
            .leave_session(&membership.session_code, membership.player_id)
        {
            Ok(left) if left.session_removed => {
                self.registry.drop_group(&membership.session_code);
            }
            Ok(left) => {
                self.registry.publish_mutation(&left.mutation);
            }
            Err(err) => {
                // Already swept or removed; nothing left to notify.
                debug!(
                    conn_id = %self.conn_id,
                    session_code = %membership.session_code,
                    code = %err.code(),
                    "seat already gone on disconnect"
                );
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "ws connection opened");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.leave_session();
        info!(conn_id = %self.conn_id, "ws connection closed");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, frame: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "ws protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Protocol)));
                ctx.stop();
                return;
            }
        };

        // Any frame proves the peer is alive.
        self.last_heartbeat = Instant::now();

        match frame {
            ws::Message::Text(text) => match serde_json::from_str::<ClientMsg>(&text) {
                Ok(cmd) => self.handle_client_msg(cmd, ctx),
                Err(err) => {
                    debug!(conn_id = %self.conn_id, error = %err, "ws frame is not a client message");
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON");
                }
            },
            ws::Message::Ping(payload) => ctx.pong(&payload),
            ws::Message::Binary(_) => {
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary frames are not supported");
            }
            ws::Message::Close(reason) => {
                ctx.close(reason);
                ctx.stop();
            }
            ws::Message::Pong(_) | ws::Message::Continuation(_) | ws::Message::Nop => {}
        }
    }
}

impl Handler<HubEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, event: HubEvent, ctx: &mut Self::Context) -> Self::Result {
        let version = event.snapshot.version;
        if version <= self.last_version {
            debug!(
                conn_id = %self.conn_id,
                version,
                last_version = self.last_version,
                "stale broadcast skipped"
            );
            return;
        }
        self.last_version = version;
        Self::send_json(ctx, &ServerMsg::broadcast(&event));
    }
}
