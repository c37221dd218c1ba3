use serde::{Deserialize, Serialize};

use crate::domain::session::PlayerId;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::turn::TurnAction;
use crate::errors::ErrorCode;
use crate::ws::hub::{BroadcastKind, HubEvent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMsg {
    #[serde(rename_all = "camelCase")]
    CreateSession { player_name: String },

    #[serde(rename_all = "camelCase")]
    JoinSession {
        session_code: String,
        player_name: String,
    },

    /// `sessionCode` is optional; the connection's own session is used.
    #[serde(rename_all = "camelCase")]
    StartGame {
        #[serde(default)]
        session_code: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    PlayerTurn {
        #[serde(default)]
        session_code: Option<String>,
        #[serde(default)]
        player_id: Option<PlayerId>,
        #[serde(default)]
        action: TurnAction,
    },
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMsg {
    /// Private to the creating connection.
    #[serde(rename_all = "camelCase")]
    SessionCreated {
        session_code: String,
        player_id: PlayerId,
        game: GameSnapshot,
    },

    /// Private to the joining connection.
    #[serde(rename_all = "camelCase")]
    SessionJoined {
        session_code: String,
        player_id: PlayerId,
        game: GameSnapshot,
    },

    GameUpdated {
        game: GameSnapshot,
    },

    GameStarted {
        game: GameSnapshot,
    },

    GameOver {
        game: GameSnapshot,
    },

    Error {
        code: ErrorCode,
        message: String,
    },
}

impl ServerMsg {
    pub fn broadcast(event: &HubEvent) -> Self {
        let game = (*event.snapshot).clone();
        match event.kind {
            BroadcastKind::GameUpdated => ServerMsg::GameUpdated { game },
            BroadcastKind::GameStarted => ServerMsg::GameStarted { game },
            BroadcastKind::GameOver => ServerMsg::GameOver { game },
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMsg::Error {
            code,
            message: message.into(),
        }
    }
}
