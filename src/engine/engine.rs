//! The action processor: a pure state machine over [`GameState`].
//!
//! `Engine::apply` never mutates its input. It clones the state, runs one
//! action against the clone and hands back the result together with a
//! persistence instruction for the caller. Failed actions leave the stored
//! state byte-for-byte unchanged.

use rand::Rng;
use serde::Serialize;

use super::actions::Action;
use super::errors::ActionError;
use super::rules::*;
use super::state::GameState;
use super::types::*;
use crate::cards::{secret_card, shuffled, victory_condition, Rarity, VictoryCondition, ZoneName};

/// Full card details sent back with a draw offer, so clients can render the
/// choice without a second lookup.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OfferedCard {
    pub instance_id: String,
    pub id: &'static str,
    pub name: &'static str,
    pub zone: ZoneName,
    pub rarity: Rarity,
    pub exploit_effect: &'static str,
    pub reveal_effect: &'static str,
    pub flavor: &'static str,
}

impl OfferedCard {
    fn from_card(card: &CardRef) -> Result<Self, ActionError> {
        let def =
            secret_card(&card.base_id).ok_or(ActionError::Invariant("unknown card base id"))?;
        Ok(Self {
            instance_id: card.instance_id.clone(),
            id: def.id,
            name: def.name,
            zone: def.zone,
            rarity: def.rarity,
            exploit_effect: def.exploit_effect,
            reveal_effect: def.reveal_effect,
            flavor: def.flavor,
        })
    }
}

/// Extra response data beyond the state snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Snapshot,
    VcOffer(Vec<VictoryCondition>),
    DrawOffer(Vec<OfferedCard>),
}

/// What the caller must do with the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Persist {
    /// Read-only action; the returned state equals the input.
    None,
    Save,
    /// Host tore the session down.
    Delete,
    /// Host adjudicated a win: record it on the leaderboard, then delete.
    RecordWinAndDelete { winner_name: String },
}

/// Result of one successfully applied action.
#[derive(Clone, Debug, PartialEq)]
pub struct Applied {
    pub state: GameState,
    /// The log lines this action produced, already folded into `state`.
    pub new_log_entries: Vec<String>,
    pub reply: Reply,
    pub persist: Persist,
}

/// Collects log lines stamped with the request time.
struct LogSink {
    stamp: String,
    entries: Vec<String>,
}

impl LogSink {
    fn new(now: Timestamp) -> Self {
        Self {
            stamp: now.format("%H:%M:%S").to_string(),
            entries: Vec::new(),
        }
    }

    fn push(&mut self, message: impl AsRef<str>) {
        self.entries.push(format!("[{}] {}", self.stamp, message.as_ref()));
    }
}

fn require_phase(state: &GameState, expected: TurnPhase) -> Result<(), ActionError> {
    if state.turn_phase == expected {
        Ok(())
    } else {
        Err(ActionError::WrongPhase {
            expected,
            actual: state.turn_phase,
        })
    }
}

/// Common gate for phase-bound actions: the player must exist, the game must
/// be in `phase`, and it must be that player's turn.
fn require_turn(state: &GameState, player_id: PlayerId, phase: TurnPhase) -> Result<(), ActionError> {
    state.player(player_id)?;
    require_phase(state, phase)?;
    if !state.is_current_player(player_id) {
        return Err(ActionError::NotYourTurn);
    }
    Ok(())
}

fn player_name(state: &GameState, id: PlayerId) -> Result<String, ActionError> {
    Ok(state.player(id)?.name.clone())
}

fn return_card_to_deck(
    state: &mut GameState,
    card: CardRef,
    deck_position: Option<usize>,
) -> Result<&'static str, ActionError> {
    let def = secret_card(&card.base_id).ok_or(ActionError::Invariant("unknown card base id"))?;
    let zone = state.zone_mut(def.zone)?;
    let at = deck_position
        .unwrap_or(zone.secret_deck.len())
        .min(zone.secret_deck.len());
    zone.secret_deck.insert(at, card);
    Ok(def.name)
}

fn rotate_events(state: &mut GameState, log: &mut LogSink) {
    if let Some(outgoing) = state.active_event.take() {
        state.event_deck.push(outgoing);
    }
    state.active_event = state.upcoming_event.take();
    state.upcoming_event = if state.event_deck.is_empty() {
        None
    } else {
        Some(state.event_deck.remove(0))
    };
    if let Some(event) = &state.active_event {
        log.push(format!("Event in play: {}. {}", event.name, event.description));
    }
}

pub struct Engine;

impl Engine {
    /// Applies one action, returning the successor state and what to do with
    /// it. `now` stamps the log lines; `rng` feeds the shuffle-based actions.
    pub fn apply<R: Rng>(
        state: &GameState,
        action: &Action,
        rng: &mut R,
        now: Timestamp,
    ) -> Result<Applied, ActionError> {
        let mut next = state.clone();
        let mut log = LogSink::new(now);
        let mut reply = Reply::Snapshot;
        let mut persist = Persist::Save;

        match action {
            Action::StartGameFromLobby { player_id } => {
                next.player(*player_id)?;
                if !next.is_host(*player_id) {
                    return Err(ActionError::HostOnly("start the game"));
                }
                if next.turn_phase != TurnPhase::Lobby {
                    return Err(ActionError::GameAlreadyStarted);
                }
                let count = next.players.len();
                if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
                    return Err(ActionError::PlayerCount {
                        min: MIN_PLAYERS,
                        max: MAX_PLAYERS,
                        actual: count,
                    });
                }
                let ids: Vec<PlayerId> = next.players.iter().map(|p| p.id).collect();
                next.turn_order = shuffled(&ids, rng);
                let first = next.turn_order[0];
                next.current_player_id = Some(first);
                next.turn_phase = TurnPhase::VcSelection;
                log.push("The game has started! Players now select their Victory Conditions.");
                log.push(format!(
                    "{} chooses a Victory Condition first.",
                    player_name(&next, first)?
                ));
            }

            Action::GetVcOffer { player_id } => {
                next.player(*player_id)?;
                persist = Persist::None;
                if next.turn_phase == TurnPhase::VcSelection && next.is_current_player(*player_id)
                {
                    let offer: Vec<VictoryCondition> =
                        shuffled(&next.available_victory_conditions, rng)
                            .into_iter()
                            .take(VC_OFFER_SIZE)
                            .collect();
                    reply = Reply::VcOffer(offer);
                } else {
                    // Out of turn or wrong phase is not an error here; the
                    // client polls this and just gets nothing to show.
                    reply = Reply::VcOffer(Vec::new());
                }
            }

            Action::SelectVc {
                player_id,
                victory_condition_id,
            } => {
                require_turn(&next, *player_id, TurnPhase::VcSelection)?;
                if next.player(*player_id)?.victory_condition.is_some() {
                    return Err(ActionError::VictoryConditionAlreadySelected);
                }
                victory_condition(victory_condition_id).ok_or_else(|| {
                    ActionError::UnknownVictoryCondition(victory_condition_id.clone())
                })?;
                let pos = next
                    .available_victory_conditions
                    .iter()
                    .position(|vc| vc.id == *victory_condition_id)
                    .ok_or(ActionError::VictoryConditionTaken)?;
                let vc = next.available_victory_conditions.remove(pos);
                let name = player_name(&next, *player_id)?;
                next.player_mut(*player_id)?.victory_condition = Some(vc);
                log.push(format!("{name} has selected a Victory Condition."));

                if next.players.iter().all(|p| p.victory_condition.is_some()) {
                    let first = next
                        .turn_order
                        .first()
                        .copied()
                        .ok_or(ActionError::Invariant("empty turn order"))?;
                    next.current_player_id = Some(first);
                    next.turn_phase = TurnPhase::Draw;
                    // Round 1 plays without an active event; the staged
                    // upcoming event enters play when round 2 begins.
                    next.active_event = None;
                    log.push("All players have selected their Victory Conditions. Round 1 begins!");
                    log.push(format!(
                        "It is now {}'s turn (Draw Phase).",
                        player_name(&next, first)?
                    ));
                } else {
                    let idx = next
                        .turn_order
                        .iter()
                        .position(|id| id == player_id)
                        .ok_or(ActionError::Invariant("player missing from turn order"))?;
                    let follower = next.turn_order[(idx + 1) % next.turn_order.len()];
                    next.current_player_id = Some(follower);
                    log.push(format!(
                        "{} is choosing a Victory Condition.",
                        player_name(&next, follower)?
                    ));
                }
            }

            Action::TerminateSession { player_id } => {
                next.player(*player_id)?;
                if !next.is_host(*player_id) {
                    return Err(ActionError::HostOnly("terminate the session"));
                }
                log.push("The host has terminated the session.");
                persist = Persist::Delete;
            }

            Action::AdjustPlayerResource {
                player_id,
                resource,
                amount,
            } => {
                let player = next.player_mut(*player_id)?;
                let before = player.resource(*resource);
                let after = player.adjust_resource(*resource, *amount);
                let name = player.name.clone();
                log.push(format!("{name}'s {resource} changed from {before} to {after}."));
            }

            Action::AdjustGlobalSuspicion { amount } => {
                let before = next.suspicion;
                next.suspicion = next.suspicion.saturating_add_signed(*amount);
                log.push(format!(
                    "Suspicion changed from {before} to {}.",
                    next.suspicion
                ));
            }

            Action::AdjustMaxSuspicionPerTurn { amount } => {
                next.max_suspicion_adjustment =
                    next.max_suspicion_adjustment.saturating_add_signed(*amount);
                log.push(format!(
                    "Max suspicion adjustment per turn is now {}.",
                    next.max_suspicion_adjustment
                ));
            }

            Action::ManualDiscardCard {
                player_id,
                card_instance_id,
                deck_position,
            } => {
                let player = next.player_mut(*player_id)?;
                let pos = player
                    .hand
                    .iter()
                    .position(|c| c.instance_id == *card_instance_id)
                    .ok_or(ActionError::CardNotInHand)?;
                let card = player.hand.remove(pos);
                let name = player.name.clone();
                let zone = secret_card(&card.base_id)
                    .ok_or(ActionError::Invariant("unknown card base id"))?
                    .zone;
                let card_name = return_card_to_deck(&mut next, card, *deck_position)?;
                log.push(format!("{name} returned {card_name} to the {zone} deck."));
            }

            Action::ManualDiscardFromMask {
                player_id,
                mask,
                deck_position,
            } => {
                let player = next.player_mut(*player_id)?;
                let card = player
                    .masks
                    .slot_mut(*mask)
                    .take()
                    .ok_or(ActionError::MaskEmpty(*mask))?;
                let name = player.name.clone();
                let zone = secret_card(&card.base_id)
                    .ok_or(ActionError::Invariant("unknown card base id"))?
                    .zone;
                let card_name = return_card_to_deck(&mut next, card, *deck_position)?;
                log.push(format!(
                    "{name} returned {card_name} from their {mask} mask to the {zone} deck."
                ));
            }

            Action::ManualReturnSecretFromMaskToHand { player_id, mask } => {
                let player = next.player_mut(*player_id)?;
                let card = player
                    .masks
                    .slot_mut(*mask)
                    .take()
                    .ok_or(ActionError::MaskEmpty(*mask))?;
                let card_name = secret_card(&card.base_id)
                    .ok_or(ActionError::Invariant("unknown card base id"))?
                    .name;
                log.push(format!(
                    "{} returned {card_name} from their {mask} mask to their hand.",
                    player.name
                ));
                player.hand.push(card);
            }

            Action::GiveSecretToPlayer {
                giving_player_id,
                card_instance_id,
                receiving_player_id,
            } => {
                next.player(*receiving_player_id)
                    .map_err(|_| ActionError::TargetPlayerNotFound)?;
                let giver = next.player_mut(*giving_player_id)?;
                let pos = giver
                    .hand
                    .iter()
                    .position(|c| c.instance_id == *card_instance_id)
                    .ok_or(ActionError::CardNotInHand)?;
                let card = giver.hand.remove(pos);
                let giver_name = giver.name.clone();
                let card_name = secret_card(&card.base_id)
                    .ok_or(ActionError::Invariant("unknown card base id"))?
                    .name;
                let receiver = next.player_mut(*receiving_player_id)?;
                let receiver_name = receiver.name.clone();
                receiver.hand.push(card);
                log.push(format!("{giver_name} gave {card_name} to {receiver_name}."));
            }

            Action::RequestHandReveal {
                requesting_player_id,
                target_player_id,
            } => {
                if requesting_player_id == target_player_id {
                    return Err(ActionError::SelfHandReveal);
                }
                let requester_name = player_name(&next, *requesting_player_id)?;
                let target = next
                    .player_mut(*target_player_id)
                    .map_err(|_| ActionError::TargetPlayerNotFound)?;
                let target_name = target.name.clone();
                target.pending_hand_reveal_request_from = Some(HandRevealRequest {
                    player_id: *requesting_player_id,
                    player_name: requester_name.clone(),
                });
                log.push(format!("{requester_name} asks to see {target_name}'s hand."));
            }

            Action::RespondToHandReveal {
                confirming_player_id,
                requesting_player_id,
                allow,
            } => {
                let requester_name = next
                    .player(*requesting_player_id)
                    .map_err(|_| ActionError::TargetPlayerNotFound)?
                    .name
                    .clone();
                let confirming = next.player_mut(*confirming_player_id)?;
                // A response must match the request on record.
                let pending = confirming
                    .pending_hand_reveal_request_from
                    .take()
                    .ok_or(ActionError::NoPendingHandRevealRequest)?;
                if pending.player_id != *requesting_player_id {
                    return Err(ActionError::NoPendingHandRevealRequest);
                }
                let confirming_name = confirming.name.clone();
                if *allow {
                    let hand = confirming.hand.clone();
                    next.revealed_hand = Some(RevealedHand {
                        for_player_id: *requesting_player_id,
                        target_player_name: confirming_name.clone(),
                        hand,
                    });
                    log.push(format!(
                        "{confirming_name} shows their hand to {requester_name}."
                    ));
                } else {
                    log.push(format!(
                        "{confirming_name} declines to show their hand to {requester_name}."
                    ));
                }
            }

            Action::AcknowledgeHandReveal { player_id } => {
                next.player(*player_id)?;
                // No-op unless the broadcast is actually scoped to this
                // player; repeat acknowledgements are harmless.
                if next.revealed_hand.as_ref().map(|r| r.for_player_id) == Some(*player_id) {
                    next.revealed_hand = None;
                }
            }

            Action::RevealVictoryCondition { player_id } => {
                let player = next.player_mut(*player_id)?;
                let vc_name = player
                    .victory_condition
                    .as_ref()
                    .ok_or(ActionError::NoVictoryCondition)?
                    .name
                    .clone();
                if player.is_victory_condition_revealed {
                    return Err(ActionError::VictoryConditionAlreadyRevealed);
                }
                player.is_victory_condition_revealed = true;
                log.push(format!(
                    "{} reveals their Victory Condition: {vc_name}!",
                    player.name
                ));
            }

            Action::ConcludeGame {
                host_player_id,
                winning_player_id,
            } => {
                next.player(*host_player_id)?;
                if !next.is_host(*host_player_id) {
                    return Err(ActionError::HostOnly("conclude the game"));
                }
                let winner_name = next
                    .player(*winning_player_id)
                    .map_err(|_| ActionError::TargetPlayerNotFound)?
                    .name
                    .clone();
                log.push(format!("{winner_name} has won the game!"));
                persist = Persist::RecordWinAndDelete { winner_name };
            }

            Action::RequestDrawOffer { player_id } => {
                require_turn(&next, *player_id, TurnPhase::Draw)?;
                let zone_name = next.player(*player_id)?.current_zone;
                let zone = next.zone(zone_name)?;
                let offer = zone
                    .secret_deck
                    .iter()
                    .take(DRAW_OFFER_SIZE)
                    .map(OfferedCard::from_card)
                    .collect::<Result<Vec<_>, _>>()?;
                reply = Reply::DrawOffer(offer);
                persist = Persist::None;
            }

            Action::ConfirmDraw {
                player_id,
                cards_to_take,
                cost,
            } => {
                require_turn(&next, *player_id, TurnPhase::Draw)?;
                let computed = draw_cost(cards_to_take.len());
                if *cost != computed {
                    return Err(ActionError::DrawCostMismatch {
                        declared: *cost,
                        computed,
                    });
                }
                let mut wanted: Vec<&str> = cards_to_take
                    .iter()
                    .map(|c| c.instance_id.as_str())
                    .collect();
                wanted.sort_unstable();
                wanted.dedup();
                if wanted.len() != cards_to_take.len() {
                    return Err(ActionError::Validation(
                        "duplicate cards in draw selection".into(),
                    ));
                }

                let player = next.player(*player_id)?;
                let have = player.gold;
                let zone_name = player.current_zone;
                if have < computed {
                    return Err(ActionError::InsufficientGold {
                        need: computed,
                        have,
                    });
                }
                // The offer may be stale; re-check against the deck as it is
                // right now and refuse anything not in the visible window.
                let zone = next.zone(zone_name)?;
                let visible: Vec<&str> = zone
                    .secret_deck
                    .iter()
                    .take(DRAW_OFFER_SIZE)
                    .map(|c| c.instance_id.as_str())
                    .collect();
                if cards_to_take
                    .iter()
                    .any(|c| !visible.contains(&c.instance_id.as_str()))
                {
                    return Err(ActionError::StaleDrawOffer);
                }

                let zone = next.zone_mut(zone_name)?;
                let mut taken = Vec::with_capacity(cards_to_take.len());
                for card in cards_to_take {
                    let pos = zone
                        .secret_deck
                        .iter()
                        .position(|c| c.instance_id == card.instance_id)
                        .ok_or(ActionError::StaleDrawOffer)?;
                    taken.push(zone.secret_deck.remove(pos));
                }
                let count = taken.len();
                let player = next.player_mut(*player_id)?;
                player.gold -= computed;
                let name = player.name.clone();
                player.hand.extend(taken);
                next.turn_phase = TurnPhase::ReturnExploits;
                log.push(format!(
                    "{name} drew {count} card(s) from the {zone_name} deck for {computed} gold."
                ));
            }

            Action::SkipDraw { player_id } => {
                require_turn(&next, *player_id, TurnPhase::Draw)?;
                next.turn_phase = TurnPhase::ReturnExploits;
                log.push(format!(
                    "{} skipped drawing this turn.",
                    player_name(&next, *player_id)?
                ));
            }

            Action::ReturnExploits { player_id } => {
                require_turn(&next, *player_id, TurnPhase::ReturnExploits)?;
                let player = next.player_mut(*player_id)?;
                let mut returned = 0;
                for mask in MaskType::ALL {
                    if let Some(card) = player.masks.slot_mut(mask).take() {
                        player.hand.push(card);
                        returned += 1;
                    }
                }
                let name = player.name.clone();
                next.turn_phase = TurnPhase::ExploitSecrets;
                log.push(format!(
                    "{name} returned {returned} exploited secret(s) to their hand."
                ));
            }

            Action::ExploitSecret {
                player_id,
                card,
                target_mask,
            } => {
                require_turn(&next, *player_id, TurnPhase::ExploitSecrets)?;
                let player = next.player_mut(*player_id)?;
                let pos = player
                    .hand
                    .iter()
                    .position(|c| c.instance_id == card.instance_id)
                    .ok_or(ActionError::CardNotInHand)?;
                if player.masks.slot(*target_mask).is_some() {
                    return Err(ActionError::MaskOccupied(*target_mask));
                }
                let card = player.hand.remove(pos);
                let def = secret_card(&card.base_id)
                    .ok_or(ActionError::Invariant("unknown card base id"))?;
                log.push(format!(
                    "{} exploits {} on their {target_mask} mask: {}",
                    player.name, def.name, def.exploit_effect
                ));
                *player.masks.slot_mut(*target_mask) = Some(card);
            }

            Action::FinishExploiting { player_id } => {
                require_turn(&next, *player_id, TurnPhase::ExploitSecrets)?;
                next.turn_phase = TurnPhase::RevealSecrets;
                next.revealed_mask_types_this_turn.clear();
                log.push(format!(
                    "{} finished exploiting and may now reveal masks.",
                    player_name(&next, *player_id)?
                ));
            }

            Action::RevealMask { player_id, mask } => {
                require_turn(&next, *player_id, TurnPhase::RevealSecrets)?;
                if *mask == MaskType::Eclipse {
                    return Err(ActionError::EclipseNotRevealable);
                }
                let player = next.player(*player_id)?;
                let line = match player.masks.slot(*mask) {
                    Some(card) => {
                        let def = secret_card(&card.base_id)
                            .ok_or(ActionError::Invariant("unknown card base id"))?;
                        format!(
                            "{} reveals their {mask} mask: {}. {}",
                            player.name, def.name, def.reveal_effect
                        )
                    }
                    None => format!("{} reveals an empty {mask} mask.", player.name),
                };
                if !next.revealed_mask_types_this_turn.contains(mask) {
                    next.revealed_mask_types_this_turn.push(*mask);
                }
                next.currently_revealed_masks.push(RevealedMask {
                    player_id: *player_id,
                    mask_type: *mask,
                    revealed_by_player_id: *player_id,
                });
                log.push(line);
            }

            Action::FinishRevealing { player_id } => {
                require_turn(&next, *player_id, TurnPhase::RevealSecrets)?;
                next.currently_revealed_masks
                    .retain(|r| r.revealed_by_player_id != *player_id);
                next.revealed_mask_types_this_turn.clear();
                next.turn_phase = TurnPhase::EndOfTurn;
                log.push(format!(
                    "{} is done revealing (End of Turn).",
                    player_name(&next, *player_id)?
                ));
            }

            Action::MovePlayer {
                player_id,
                target_zone,
            } => {
                require_turn(&next, *player_id, TurnPhase::EndOfTurn)?;
                let player = next.player_mut(*player_id)?;
                if player.has_moved_this_turn {
                    return Err(ActionError::AlreadyMoved);
                }
                if !player.current_zone.can_move_to(*target_zone) {
                    return Err(ActionError::IllegalMove(*target_zone));
                }
                player.has_moved_this_turn = true;
                if player.current_zone == *target_zone {
                    log.push(format!("{} stays in the {target_zone}.", player.name));
                } else {
                    player.current_zone = *target_zone;
                    log.push(format!("{} moves to the {target_zone}.", player.name));
                }
            }

            Action::EndTurn { player_id } => {
                require_turn(&next, *player_id, TurnPhase::EndOfTurn)?;
                next.currently_revealed_masks
                    .retain(|r| r.revealed_by_player_id != *player_id);
                next.revealed_mask_types_this_turn.clear();
                next.player_mut(*player_id)?.has_moved_this_turn = false;

                let len = next.turn_order.len();
                if len == 0 {
                    return Err(ActionError::Invariant("empty turn order"));
                }
                let idx = next
                    .turn_order
                    .iter()
                    .position(|id| id == player_id)
                    .ok_or(ActionError::Invariant("player missing from turn order"))?;
                let wrapped = idx + 1 == len;
                let follower = next.turn_order[(idx + 1) % len];
                next.current_player_id = Some(follower);
                next.turn_phase = TurnPhase::Draw;
                if wrapped {
                    next.round += 1;
                    log.push(format!("Round {} begins!", next.round));
                    rotate_events(&mut next, &mut log);
                }
                log.push(format!(
                    "It is now {}'s turn (Draw Phase).",
                    player_name(&next, follower)?
                ));
            }
        }

        if !log.entries.is_empty() {
            next.push_log(&log.entries);
        }
        Ok(Applied {
            state: next,
            new_log_entries: log.entries,
            reply,
            persist,
        })
    }
}
