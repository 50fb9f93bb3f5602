use serde::{Deserialize, Serialize};

use crate::cards::VictoryCondition;
use crate::engine::{Applied, GameState, OfferedCard, PlayerId, Reply, SessionId, WinRecord};

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub host_name: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    pub session_id: SessionId,
    pub host_player_id: PlayerId,
}

#[derive(Debug, Deserialize)]
pub struct JoinGameRequest {
    pub player_name: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JoinGameResponse {
    pub session_id: SessionId,
    pub player_id: PlayerId,
}

/// Response to any action: the post-action snapshot (absent when the action
/// deleted the session) plus whatever extra data the action produced.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub state: Option<GameState>,
    pub new_log_entries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offered_victory_conditions: Option<Vec<VictoryCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offered_cards: Option<Vec<OfferedCard>>,
}

impl ActionResponse {
    pub fn from_applied(applied: Applied, session_gone: bool) -> Self {
        let mut response = Self {
            state: if session_gone {
                None
            } else {
                Some(applied.state)
            },
            new_log_entries: applied.new_log_entries,
            offered_victory_conditions: None,
            offered_cards: None,
        };
        match applied.reply {
            Reply::Snapshot => {}
            Reply::VcOffer(offer) => response.offered_victory_conditions = Some(offer),
            Reply::DrawOffer(offer) => response.offered_cards = Some(offer),
        }
        response
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub records: Vec<WinRecord>,
}
