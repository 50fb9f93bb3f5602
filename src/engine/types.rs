use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cards::{VictoryCondition, ZoneName};

pub type SessionId = Uuid;
pub type PlayerId = Uuid;

/// One of the four player resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Gold,
    Trust,
    Information,
    Secrecy,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Gold => "gold",
            Resource::Trust => "trust",
            Resource::Information => "information",
            Resource::Secrecy => "secrecy",
        };
        f.write_str(name)
    }
}

/// The four named mask slots. Eclipse is exempt from Reveal actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskType {
    Solar,
    Lunar,
    Shadow,
    Eclipse,
}

impl MaskType {
    pub const ALL: [MaskType; 4] = [
        MaskType::Solar,
        MaskType::Lunar,
        MaskType::Shadow,
        MaskType::Eclipse,
    ];
}

impl fmt::Display for MaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaskType::Solar => "solar",
            MaskType::Lunar => "lunar",
            MaskType::Shadow => "shadow",
            MaskType::Eclipse => "eclipse",
        };
        f.write_str(name)
    }
}

/// Reference to one physical card in play. `base_id` keys into the reference
/// data; `instance_id` is unique per copy for the lifetime of the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    pub base_id: String,
    pub instance_id: String,
}

/// A player's four mask slots, each holding at most one Secret.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Masks {
    pub solar: Option<CardRef>,
    pub lunar: Option<CardRef>,
    pub shadow: Option<CardRef>,
    pub eclipse: Option<CardRef>,
}

impl Masks {
    pub fn slot(&self, mask: MaskType) -> &Option<CardRef> {
        match mask {
            MaskType::Solar => &self.solar,
            MaskType::Lunar => &self.lunar,
            MaskType::Shadow => &self.shadow,
            MaskType::Eclipse => &self.eclipse,
        }
    }

    pub fn slot_mut(&mut self, mask: MaskType) -> &mut Option<CardRef> {
        match mask {
            MaskType::Solar => &mut self.solar,
            MaskType::Lunar => &mut self.lunar,
            MaskType::Shadow => &mut self.shadow,
            MaskType::Eclipse => &mut self.eclipse,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaskType, &Option<CardRef>)> {
        MaskType::ALL.into_iter().map(move |m| (m, self.slot(m)))
    }
}

/// An unanswered request to look at this player's hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRevealRequest {
    pub player_id: PlayerId,
    pub player_name: String,
}

/// The single-slot hand-reveal broadcast, scoped to one requester.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedHand {
    pub for_player_id: PlayerId,
    pub target_player_name: String,
    pub hand: Vec<CardRef>,
}

/// One mask currently pulsing on clients after a Reveal action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedMask {
    pub player_id: PlayerId,
    pub mask_type: MaskType,
    pub revealed_by_player_id: PlayerId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub gold: u32,
    pub trust: u32,
    pub information: u32,
    pub secrecy: u32,
    pub hand: Vec<CardRef>,
    pub masks: Masks,
    pub current_zone: ZoneName,
    pub victory_condition: Option<VictoryCondition>,
    pub is_victory_condition_revealed: bool,
    pub is_eliminated: bool,
    pub pending_hand_reveal_request_from: Option<HandRevealRequest>,
    pub has_moved_this_turn: bool,
}

impl Player {
    pub fn resource(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Gold => self.gold,
            Resource::Trust => self.trust,
            Resource::Information => self.information,
            Resource::Secrecy => self.secrecy,
        }
    }

    /// Applies a signed delta, clamping the result at zero.
    pub fn adjust_resource(&mut self, resource: Resource, delta: i32) -> u32 {
        let slot = match resource {
            Resource::Gold => &mut self.gold,
            Resource::Trust => &mut self.trust,
            Resource::Information => &mut self.information,
            Resource::Secrecy => &mut self.secrecy,
        };
        *slot = slot.saturating_add_signed(delta);
        *slot
    }
}

/// One map zone with its draw deck. Front of `secret_deck` is the top card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub name: ZoneName,
    pub borders: Vec<ZoneName>,
    pub secret_deck: Vec<CardRef>,
}

/// The turn/phase machine. `Lobby` and `VcSelection` replace the original
/// design's sentinel-event sub-state with explicit phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Lobby,
    VcSelection,
    Draw,
    ReturnExploits,
    ExploitSecrets,
    RevealSecrets,
    EndOfTurn,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TurnPhase::Lobby => "Lobby",
            TurnPhase::VcSelection => "VC Selection",
            TurnPhase::Draw => "Draw",
            TurnPhase::ReturnExploits => "Return Exploits",
            TurnPhase::ExploitSecrets => "Exploit Secrets",
            TurnPhase::RevealSecrets => "Reveal Secrets",
            TurnPhase::EndOfTurn => "End of Turn",
        };
        f.write_str(name)
    }
}

/// Per-winner-name leaderboard record, persisted outside any session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRecord {
    pub player_name: String,
    pub wins: u64,
}

/// Timestamp type used across the state model.
pub type Timestamp = DateTime<Utc>;
