use serde::{Deserialize, Serialize};

use super::types::{CardRef, MaskType, PlayerId, Resource};
use crate::cards::ZoneName;

/// Every action a client can submit against a session, as a tagged union
/// `{ "type": "...", "payload": { ... } }`. Payloads carry the acting
/// player's id except for the table-global adjustments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    StartGameFromLobby {
        player_id: PlayerId,
    },
    GetVcOffer {
        player_id: PlayerId,
    },
    SelectVc {
        player_id: PlayerId,
        victory_condition_id: String,
    },
    TerminateSession {
        player_id: PlayerId,
    },
    AdjustPlayerResource {
        player_id: PlayerId,
        resource: Resource,
        amount: i32,
    },
    AdjustGlobalSuspicion {
        amount: i32,
    },
    AdjustMaxSuspicionPerTurn {
        amount: i32,
    },
    ManualDiscardCard {
        player_id: PlayerId,
        card_instance_id: String,
        /// Insertion index into the owning zone deck, clamped; bottom if
        /// omitted.
        deck_position: Option<usize>,
    },
    ManualDiscardFromMask {
        player_id: PlayerId,
        mask: MaskType,
        deck_position: Option<usize>,
    },
    ManualReturnSecretFromMaskToHand {
        player_id: PlayerId,
        mask: MaskType,
    },
    GiveSecretToPlayer {
        giving_player_id: PlayerId,
        card_instance_id: String,
        receiving_player_id: PlayerId,
    },
    RequestHandReveal {
        requesting_player_id: PlayerId,
        target_player_id: PlayerId,
    },
    RespondToHandReveal {
        confirming_player_id: PlayerId,
        requesting_player_id: PlayerId,
        allow: bool,
    },
    AcknowledgeHandReveal {
        player_id: PlayerId,
    },
    RevealVictoryCondition {
        player_id: PlayerId,
    },
    ConcludeGame {
        host_player_id: PlayerId,
        winning_player_id: PlayerId,
    },
    RequestDrawOffer {
        player_id: PlayerId,
    },
    ConfirmDraw {
        player_id: PlayerId,
        cards_to_take: Vec<CardRef>,
        cost: u32,
    },
    SkipDraw {
        player_id: PlayerId,
    },
    ReturnExploits {
        player_id: PlayerId,
    },
    ExploitSecret {
        player_id: PlayerId,
        card: CardRef,
        target_mask: MaskType,
    },
    FinishExploiting {
        player_id: PlayerId,
    },
    RevealMask {
        player_id: PlayerId,
        mask: MaskType,
    },
    FinishRevealing {
        player_id: PlayerId,
    },
    MovePlayer {
        player_id: PlayerId,
        target_zone: ZoneName,
    },
    EndTurn {
        player_id: PlayerId,
    },
}
