use serde::{Deserialize, Serialize};

use super::errors::{ActionError, InvariantCheck, StateError};
use super::rules::GAME_LOG_CAP;
use super::types::*;
use crate::cards::{EventCard, VictoryCondition, ZoneName};

/// Full authoritative state of one game session. Cloned, mutated and saved
/// as a unit; the engine never mutates a stored copy in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub session_id: SessionId,
    /// Optional shared lobby password, checked on join.
    pub password: Option<String>,
    pub created_at: Timestamp,
    /// Seat order of arrival; the player at index 0 is the host.
    pub players: Vec<Player>,
    /// Shuffled once at game start, fixed for the rest of the session.
    pub turn_order: Vec<PlayerId>,
    /// Whose VC pick or turn it is. `None` only in the lobby.
    pub current_player_id: Option<PlayerId>,
    pub turn_phase: TurnPhase,
    pub round: u32,
    /// Shared table-wide suspicion track.
    pub suspicion: u32,
    /// House-rule cap on suspicion swings per turn, shown to clients.
    pub max_suspicion_adjustment: u32,
    pub zones: Vec<Zone>,
    pub active_event: Option<EventCard>,
    pub upcoming_event: Option<EventCard>,
    /// Remaining face-down events; front is the next to come up.
    pub event_deck: Vec<EventCard>,
    /// Victory Conditions not yet assigned to any player.
    pub available_victory_conditions: Vec<VictoryCondition>,
    /// Masks currently highlighted on clients after Reveal actions.
    pub currently_revealed_masks: Vec<RevealedMask>,
    /// Mask types the current player has already revealed this turn.
    pub revealed_mask_types_this_turn: Vec<MaskType>,
    /// At most one hand-reveal broadcast at a time.
    pub revealed_hand: Option<RevealedHand>,
    /// Newest-first, capped at [`GAME_LOG_CAP`] entries.
    pub game_log: Vec<String>,
}

impl GameState {
    pub fn player(&self, id: PlayerId) -> Result<&Player, ActionError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(ActionError::PlayerNotFound)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, ActionError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ActionError::PlayerNotFound)
    }

    pub fn host(&self) -> Option<&Player> {
        self.players.first()
    }

    pub fn is_host(&self, id: PlayerId) -> bool {
        self.host().map(|p| p.id == id).unwrap_or(false)
    }

    pub fn zone(&self, name: ZoneName) -> Result<&Zone, ActionError> {
        self.zones
            .iter()
            .find(|z| z.name == name)
            .ok_or(ActionError::Invariant("zone missing from session"))
    }

    pub fn zone_mut(&mut self, name: ZoneName) -> Result<&mut Zone, ActionError> {
        self.zones
            .iter_mut()
            .find(|z| z.name == name)
            .ok_or(ActionError::Invariant("zone missing from session"))
    }

    pub fn is_current_player(&self, id: PlayerId) -> bool {
        self.current_player_id == Some(id)
    }

    /// Prepends fresh log lines, newest first, and trims to the cap.
    pub fn push_log(&mut self, entries: &[String]) {
        for entry in entries {
            self.game_log.insert(0, entry.clone());
        }
        self.game_log.truncate(GAME_LOG_CAP);
    }

    /// Every card instance currently tracked by the session, across hands,
    /// masks and zone decks.
    pub fn all_instance_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for p in &self.players {
            ids.extend(p.hand.iter().map(|c| c.instance_id.as_str()));
            for (_, slot) in p.masks.iter() {
                if let Some(card) = slot {
                    ids.push(card.instance_id.as_str());
                }
            }
        }
        for z in &self.zones {
            ids.extend(z.secret_deck.iter().map(|c| c.instance_id.as_str()));
        }
        ids
    }
}

impl InvariantCheck for GameState {
    fn validate_invariants(&self) -> Result<(), StateError> {
        let mut ids = self.all_instance_ids();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != total {
            return Err(StateError::InvariantViolation("duplicate card instance"));
        }
        if self.game_log.len() > GAME_LOG_CAP {
            return Err(StateError::InvariantViolation("game log over cap"));
        }
        if self.turn_phase != TurnPhase::Lobby {
            let mut order: Vec<_> = self.turn_order.iter().collect();
            let mut seated: Vec<_> = self.players.iter().map(|p| &p.id).collect();
            order.sort_unstable();
            seated.sort_unstable();
            if order != seated {
                return Err(StateError::InvariantViolation(
                    "turn order is not a permutation of the seated players",
                ));
            }
            match self.current_player_id {
                Some(id) if self.players.iter().any(|p| p.id == id) => {}
                _ => {
                    return Err(StateError::InvariantViolation(
                        "current player is not seated",
                    ))
                }
            }
        }
        if self.round == 0 {
            return Err(StateError::InvariantViolation("round must start at 1"));
        }
        Ok(())
    }
}
