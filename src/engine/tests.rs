#![cfg(test)]

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::engine::{Applied, Engine, Persist, Reply};
use super::errors::{ActionError, InvariantCheck};
use super::setup::{join, new_lobby};
use super::state::GameState;
use super::types::*;
use super::Action;
use crate::cards::ZoneName;

fn fixed_now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn lobby(names: &[&str]) -> GameState {
    let mut rng = StdRng::seed_from_u64(42);
    let now = fixed_now();
    let mut state = new_lobby(names[0], None, &mut rng, now);
    for name in &names[1..] {
        let (next, _) = join(&state, name, None, &mut rng, now).unwrap();
        state = next;
    }
    state
}

fn host_id(state: &GameState) -> PlayerId {
    state.players[0].id
}

fn apply(state: &GameState, action: Action) -> Result<Applied, ActionError> {
    let mut rng = StdRng::seed_from_u64(7);
    let applied = Engine::apply(state, &action, &mut rng, fixed_now())?;
    applied.state.validate_invariants().unwrap();
    Ok(applied)
}

fn apply_ok(state: &mut GameState, action: Action) -> Applied {
    let applied = apply(state, action).unwrap();
    *state = applied.state.clone();
    applied
}

/// Lobby through START_GAME_FROM_LOBBY.
fn started(names: &[&str]) -> GameState {
    let mut state = lobby(names);
    let host = host_id(&state);
    apply_ok(&mut state, Action::StartGameFromLobby { player_id: host });
    state
}

/// Started game with every player holding a Victory Condition; it is
/// turn_order[0]'s Draw phase in round 1.
fn selected(names: &[&str]) -> GameState {
    let mut state = started(names);
    for _ in 0..state.players.len() {
        let picker = state.current_player_id.unwrap();
        let vc_id = state.available_victory_conditions[0].id.clone();
        apply_ok(
            &mut state,
            Action::SelectVc {
                player_id: picker,
                victory_condition_id: vc_id,
            },
        );
    }
    state
}

/// Plays the current player's turn from Draw to End of Turn without drawing,
/// exploiting or revealing anything.
fn coast_to_end_of_turn(state: &mut GameState) {
    let pid = state.current_player_id.unwrap();
    apply_ok(state, Action::SkipDraw { player_id: pid });
    apply_ok(state, Action::ReturnExploits { player_id: pid });
    apply_ok(state, Action::FinishExploiting { player_id: pid });
    apply_ok(state, Action::FinishRevealing { player_id: pid });
}

#[test]
fn start_game_shuffles_turn_order_and_enters_vc_selection() {
    let mut state = lobby(&["Alice", "Bob"]);
    let host = host_id(&state);
    apply_ok(&mut state, Action::StartGameFromLobby { player_id: host });

    assert_eq!(state.turn_phase, TurnPhase::VcSelection);
    let mut order = state.turn_order.clone();
    let mut seated: Vec<_> = state.players.iter().map(|p| p.id).collect();
    order.sort();
    seated.sort();
    assert_eq!(order, seated);
    assert_eq!(state.current_player_id, Some(state.turn_order[0]));
}

#[test]
fn only_the_host_can_start_and_only_with_enough_players() {
    let state = lobby(&["Alice", "Bob"]);
    let guest = state.players[1].id;
    assert_eq!(
        apply(&state, Action::StartGameFromLobby { player_id: guest }).unwrap_err(),
        ActionError::HostOnly("start the game")
    );

    let solo = lobby(&["Alice"]);
    let host = host_id(&solo);
    assert!(matches!(
        apply(&solo, Action::StartGameFromLobby { player_id: host }).unwrap_err(),
        ActionError::PlayerCount { actual: 1, .. }
    ));

    let mut state = lobby(&["Alice", "Bob"]);
    let host = host_id(&state);
    apply_ok(&mut state, Action::StartGameFromLobby { player_id: host });
    assert_eq!(
        apply(&state, Action::StartGameFromLobby { player_id: host }).unwrap_err(),
        ActionError::GameAlreadyStarted
    );
}

#[test]
fn vc_offer_is_empty_out_of_turn_and_three_in_turn() {
    let state = started(&["Alice", "Bob"]);
    let picker = state.current_player_id.unwrap();
    let other = state
        .players
        .iter()
        .map(|p| p.id)
        .find(|id| *id != picker)
        .unwrap();

    let applied = apply(&state, Action::GetVcOffer { player_id: other }).unwrap();
    assert_eq!(applied.persist, Persist::None);
    assert!(matches!(applied.reply, Reply::VcOffer(ref offer) if offer.is_empty()));

    let applied = apply(&state, Action::GetVcOffer { player_id: picker }).unwrap();
    assert_eq!(applied.persist, Persist::None);
    match applied.reply {
        Reply::VcOffer(offer) => {
            assert_eq!(offer.len(), 3);
            assert!(offer
                .iter()
                .all(|vc| state.available_victory_conditions.contains(vc)));
        }
        other => panic!("expected a VC offer, got {other:?}"),
    }
}

#[test]
fn selecting_all_vcs_starts_round_one() {
    let state = selected(&["Alice", "Bob"]);
    assert_eq!(state.turn_phase, TurnPhase::Draw);
    assert_eq!(state.round, 1);
    assert!(state.active_event.is_none());
    assert!(state.upcoming_event.is_some());
    assert_eq!(state.current_player_id, Some(state.turn_order[0]));
    assert!(state.players.iter().all(|p| p.victory_condition.is_some()));
    assert_eq!(state.available_victory_conditions.len(), 16);
}

#[test]
fn select_vc_rejects_bad_ids_and_duplicates() {
    let mut state = started(&["Alice", "Bob"]);
    let first = state.current_player_id.unwrap();
    assert_eq!(
        apply(
            &state,
            Action::SelectVc {
                player_id: first,
                victory_condition_id: "vc99".into(),
            }
        )
        .unwrap_err(),
        ActionError::UnknownVictoryCondition("vc99".into())
    );

    let picked = state.available_victory_conditions[0].id.clone();
    apply_ok(
        &mut state,
        Action::SelectVc {
            player_id: first,
            victory_condition_id: picked.clone(),
        },
    );
    // The second player cannot take the same card.
    let second = state.current_player_id.unwrap();
    assert_eq!(
        apply(
            &state,
            Action::SelectVc {
                player_id: second,
                victory_condition_id: picked,
            }
        )
        .unwrap_err(),
        ActionError::VictoryConditionTaken
    );
    // The first player cannot select again out of turn.
    let other_id = state.available_victory_conditions[0].id.clone();
    assert_eq!(
        apply(
            &state,
            Action::SelectVc {
                player_id: first,
                victory_condition_id: other_id,
            }
        )
        .unwrap_err(),
        ActionError::NotYourTurn
    );
}

#[test]
fn draw_offer_and_confirm_draw_move_cards_and_charge_gold() {
    let mut state = selected(&["Alice", "Bob"]);
    let pid = state.current_player_id.unwrap();
    let zone_name = state.player(pid).unwrap().current_zone;
    let deck_before = state.zone(zone_name).unwrap().secret_deck.len();

    let applied = apply(&state, Action::RequestDrawOffer { player_id: pid }).unwrap();
    assert_eq!(applied.persist, Persist::None);
    let offer = match applied.reply {
        Reply::DrawOffer(offer) => offer,
        other => panic!("expected a draw offer, got {other:?}"),
    };
    assert_eq!(offer.len(), 3);

    let take: Vec<CardRef> = offer
        .iter()
        .take(2)
        .map(|c| CardRef {
            base_id: c.id.to_owned(),
            instance_id: c.instance_id.clone(),
        })
        .collect();
    apply_ok(
        &mut state,
        Action::ConfirmDraw {
            player_id: pid,
            cards_to_take: take,
            cost: 3,
        },
    );

    let player = state.player(pid).unwrap();
    assert_eq!(player.gold, 2);
    assert_eq!(player.hand.len(), 2);
    assert_eq!(state.zone(zone_name).unwrap().secret_deck.len(), deck_before - 2);
    assert_eq!(state.turn_phase, TurnPhase::ReturnExploits);
}

#[test]
fn confirm_draw_rejects_wrong_cost_poor_players_and_stale_offers() {
    let mut state = selected(&["Alice", "Bob"]);
    let pid = state.current_player_id.unwrap();
    let offer = match apply(&state, Action::RequestDrawOffer { player_id: pid })
        .unwrap()
        .reply
    {
        Reply::DrawOffer(offer) => offer,
        other => panic!("expected a draw offer, got {other:?}"),
    };
    let two: Vec<CardRef> = offer
        .iter()
        .take(2)
        .map(|c| CardRef {
            base_id: c.id.to_owned(),
            instance_id: c.instance_id.clone(),
        })
        .collect();

    assert_eq!(
        apply(
            &state,
            Action::ConfirmDraw {
                player_id: pid,
                cards_to_take: two.clone(),
                cost: 0,
            }
        )
        .unwrap_err(),
        ActionError::DrawCostMismatch {
            declared: 0,
            computed: 3
        }
    );

    state.player_mut(pid).unwrap().gold = 1;
    assert_eq!(
        apply(
            &state,
            Action::ConfirmDraw {
                player_id: pid,
                cards_to_take: two,
                cost: 3,
            }
        )
        .unwrap_err(),
        ActionError::InsufficientGold { need: 3, have: 1 }
    );

    // A card below the visible window is a stale selection.
    let zone_name = state.player(pid).unwrap().current_zone;
    let buried = state.zone(zone_name).unwrap().secret_deck[5].clone();
    assert_eq!(
        apply(
            &state,
            Action::ConfirmDraw {
                player_id: pid,
                cards_to_take: vec![buried],
                cost: 0,
            }
        )
        .unwrap_err(),
        ActionError::StaleDrawOffer
    );
}

#[test]
fn exploit_respects_mask_exclusivity() {
    let mut state = selected(&["Alice", "Bob"]);
    let pid = state.current_player_id.unwrap();
    let offer = match apply(&state, Action::RequestDrawOffer { player_id: pid })
        .unwrap()
        .reply
    {
        Reply::DrawOffer(offer) => offer,
        other => panic!("expected a draw offer, got {other:?}"),
    };
    let take: Vec<CardRef> = offer
        .iter()
        .take(2)
        .map(|c| CardRef {
            base_id: c.id.to_owned(),
            instance_id: c.instance_id.clone(),
        })
        .collect();
    apply_ok(
        &mut state,
        Action::ConfirmDraw {
            player_id: pid,
            cards_to_take: take.clone(),
            cost: 3,
        },
    );
    apply_ok(&mut state, Action::ReturnExploits { player_id: pid });

    apply_ok(
        &mut state,
        Action::ExploitSecret {
            player_id: pid,
            card: take[0].clone(),
            target_mask: MaskType::Solar,
        },
    );
    assert_eq!(
        apply(
            &state,
            Action::ExploitSecret {
                player_id: pid,
                card: take[1].clone(),
                target_mask: MaskType::Solar,
            }
        )
        .unwrap_err(),
        ActionError::MaskOccupied(MaskType::Solar)
    );
    // The first exploit is untouched and the second card is still in hand.
    let player = state.player(pid).unwrap();
    assert_eq!(
        player.masks.solar.as_ref().map(|c| c.instance_id.clone()),
        Some(take[0].instance_id.clone())
    );
    assert_eq!(player.hand.len(), 1);
}

#[test]
fn reveal_tracks_masks_but_never_eclipse() {
    let mut state = selected(&["Alice", "Bob"]);
    let pid = state.current_player_id.unwrap();
    apply_ok(&mut state, Action::SkipDraw { player_id: pid });
    apply_ok(&mut state, Action::ReturnExploits { player_id: pid });
    apply_ok(&mut state, Action::FinishExploiting { player_id: pid });

    assert_eq!(
        apply(
            &state,
            Action::RevealMask {
                player_id: pid,
                mask: MaskType::Eclipse,
            }
        )
        .unwrap_err(),
        ActionError::EclipseNotRevealable
    );

    apply_ok(
        &mut state,
        Action::RevealMask {
            player_id: pid,
            mask: MaskType::Solar,
        },
    );
    apply_ok(
        &mut state,
        Action::RevealMask {
            player_id: pid,
            mask: MaskType::Solar,
        },
    );
    // Idempotent per-turn tracking, but every reveal pulses on clients.
    assert_eq!(state.revealed_mask_types_this_turn, vec![MaskType::Solar]);
    assert_eq!(state.currently_revealed_masks.len(), 2);

    apply_ok(&mut state, Action::FinishRevealing { player_id: pid });
    assert!(state.currently_revealed_masks.is_empty());
    assert!(state.revealed_mask_types_this_turn.is_empty());
    assert_eq!(state.turn_phase, TurnPhase::EndOfTurn);
}

#[test]
fn end_turn_wraps_round_and_rotates_events() {
    let mut state = selected(&["Alice", "Bob"]);
    let staged = state.upcoming_event.clone().unwrap();
    let deck_front = state.event_deck.first().cloned();

    let first = state.current_player_id.unwrap();
    coast_to_end_of_turn(&mut state);
    apply_ok(&mut state, Action::EndTurn { player_id: first });
    assert_eq!(state.round, 1);
    assert!(state.active_event.is_none());

    let second = state.current_player_id.unwrap();
    assert_ne!(first, second);
    coast_to_end_of_turn(&mut state);
    apply_ok(&mut state, Action::EndTurn { player_id: second });

    assert_eq!(state.round, 2);
    assert_eq!(state.current_player_id, Some(state.turn_order[0]));
    assert_eq!(state.turn_phase, TurnPhase::Draw);
    assert_eq!(state.active_event, Some(staged));
    assert_eq!(state.upcoming_event, deck_front);
}

#[test]
fn movement_is_adjacency_checked_and_once_per_turn() {
    let mut state = selected(&["Alice", "Bob"]);
    let pid = state.current_player_id.unwrap();
    coast_to_end_of_turn(&mut state);

    let from = state.player(pid).unwrap().current_zone;
    let illegal = ZoneName::ALL
        .into_iter()
        .find(|z| !from.can_move_to(*z))
        .unwrap();
    assert_eq!(
        apply(
            &state,
            Action::MovePlayer {
                player_id: pid,
                target_zone: illegal,
            }
        )
        .unwrap_err(),
        ActionError::IllegalMove(illegal)
    );

    let target = from.borders()[0];
    apply_ok(
        &mut state,
        Action::MovePlayer {
            player_id: pid,
            target_zone: target,
        },
    );
    assert_eq!(state.player(pid).unwrap().current_zone, target);
    assert_eq!(
        apply(
            &state,
            Action::MovePlayer {
                player_id: pid,
                target_zone: from,
            }
        )
        .unwrap_err(),
        ActionError::AlreadyMoved
    );

    // The flag resets when the turn ends, so the player can move again on
    // their next turn.
    apply_ok(&mut state, Action::EndTurn { player_id: pid });
    assert!(!state.player(pid).unwrap().has_moved_this_turn);
}

#[test]
fn adjustments_clamp_at_zero() {
    let mut state = selected(&["Alice", "Bob"]);
    let pid = state.players[0].id;
    apply_ok(
        &mut state,
        Action::AdjustPlayerResource {
            player_id: pid,
            resource: Resource::Gold,
            amount: -100,
        },
    );
    assert_eq!(state.player(pid).unwrap().gold, 0);

    apply_ok(&mut state, Action::AdjustGlobalSuspicion { amount: 4 });
    apply_ok(&mut state, Action::AdjustGlobalSuspicion { amount: -10 });
    assert_eq!(state.suspicion, 0);

    apply_ok(&mut state, Action::AdjustMaxSuspicionPerTurn { amount: 1 });
    assert_eq!(state.max_suspicion_adjustment, 3);
}

#[test]
fn manual_card_flows_keep_every_instance_accounted_for() {
    let mut state = selected(&["Alice", "Bob"]);
    let pid = state.current_player_id.unwrap();
    let other = state.players.iter().map(|p| p.id).find(|id| *id != pid).unwrap();
    let total_instances = state.all_instance_ids().len();

    let offer = match apply(&state, Action::RequestDrawOffer { player_id: pid })
        .unwrap()
        .reply
    {
        Reply::DrawOffer(offer) => offer,
        other => panic!("expected a draw offer, got {other:?}"),
    };
    let take: Vec<CardRef> = offer
        .iter()
        .take(2)
        .map(|c| CardRef {
            base_id: c.id.to_owned(),
            instance_id: c.instance_id.clone(),
        })
        .collect();
    apply_ok(
        &mut state,
        Action::ConfirmDraw {
            player_id: pid,
            cards_to_take: take.clone(),
            cost: 3,
        },
    );

    // Hand to another player, back to a deck, via a mask.
    apply_ok(
        &mut state,
        Action::GiveSecretToPlayer {
            giving_player_id: pid,
            card_instance_id: take[0].instance_id.clone(),
            receiving_player_id: other,
        },
    );
    assert!(state
        .player(other)
        .unwrap()
        .hand
        .iter()
        .any(|c| c.instance_id == take[0].instance_id));

    apply_ok(
        &mut state,
        Action::ManualDiscardCard {
            player_id: other,
            card_instance_id: take[0].instance_id.clone(),
            deck_position: Some(0),
        },
    );

    apply_ok(&mut state, Action::ReturnExploits { player_id: pid });
    apply_ok(
        &mut state,
        Action::ExploitSecret {
            player_id: pid,
            card: take[1].clone(),
            target_mask: MaskType::Shadow,
        },
    );
    apply_ok(
        &mut state,
        Action::ManualReturnSecretFromMaskToHand {
            player_id: pid,
            mask: MaskType::Shadow,
        },
    );
    assert!(state.player(pid).unwrap().masks.shadow.is_none());

    assert_eq!(state.all_instance_ids().len(), total_instances);
}

#[test]
fn hand_reveal_consent_protocol() {
    let mut state = selected(&["Alice", "Bob"]);
    let alice = state.players[0].id;
    let bob = state.players[1].id;

    assert_eq!(
        apply(
            &state,
            Action::RequestHandReveal {
                requesting_player_id: alice,
                target_player_id: alice,
            }
        )
        .unwrap_err(),
        ActionError::SelfHandReveal
    );

    apply_ok(
        &mut state,
        Action::RequestHandReveal {
            requesting_player_id: alice,
            target_player_id: bob,
        },
    );
    let pending = state
        .player(bob)
        .unwrap()
        .pending_hand_reveal_request_from
        .clone()
        .unwrap();
    assert_eq!(pending.player_id, alice);

    apply_ok(
        &mut state,
        Action::RespondToHandReveal {
            confirming_player_id: bob,
            requesting_player_id: alice,
            allow: true,
        },
    );
    assert!(state
        .player(bob)
        .unwrap()
        .pending_hand_reveal_request_from
        .is_none());
    let revealed = state.revealed_hand.clone().unwrap();
    assert_eq!(revealed.for_player_id, alice);
    assert_eq!(revealed.target_player_name, "Bob");

    // An acknowledgement from the wrong player leaves the broadcast alone.
    apply_ok(&mut state, Action::AcknowledgeHandReveal { player_id: bob });
    assert!(state.revealed_hand.is_some());
    apply_ok(&mut state, Action::AcknowledgeHandReveal { player_id: alice });
    assert!(state.revealed_hand.is_none());
}

#[test]
fn respond_to_hand_reveal_requires_a_matching_pending_request() {
    let mut state = selected(&["Alice", "Bob", "Carol"]);
    let alice = state.players[0].id;
    let bob = state.players[1].id;
    let carol = state.players[2].id;

    // No one has asked Bob for anything yet.
    assert_eq!(
        apply(
            &state,
            Action::RespondToHandReveal {
                confirming_player_id: bob,
                requesting_player_id: alice,
                allow: true,
            }
        )
        .unwrap_err(),
        ActionError::NoPendingHandRevealRequest
    );

    apply_ok(
        &mut state,
        Action::RequestHandReveal {
            requesting_player_id: alice,
            target_player_id: bob,
        },
    );

    // Naming a requester other than the one on record is rejected and the
    // pending request survives for the real requester.
    assert_eq!(
        apply(
            &state,
            Action::RespondToHandReveal {
                confirming_player_id: bob,
                requesting_player_id: carol,
                allow: true,
            }
        )
        .unwrap_err(),
        ActionError::NoPendingHandRevealRequest
    );
    assert_eq!(
        state
            .player(bob)
            .unwrap()
            .pending_hand_reveal_request_from
            .as_ref()
            .map(|req| req.player_id),
        Some(alice)
    );
    assert!(state.revealed_hand.is_none());
}

#[test]
fn reveal_victory_condition_is_one_way() {
    let mut state = selected(&["Alice", "Bob"]);
    let pid = state.players[0].id;
    apply_ok(&mut state, Action::RevealVictoryCondition { player_id: pid });
    assert!(state.player(pid).unwrap().is_victory_condition_revealed);
    assert_eq!(
        apply(&state, Action::RevealVictoryCondition { player_id: pid }).unwrap_err(),
        ActionError::VictoryConditionAlreadyRevealed
    );
}

#[test]
fn conclude_game_is_host_only_and_names_the_winner() {
    let state = selected(&["Alice", "Bob"]);
    let host = state.players[0].id;
    let guest = state.players[1].id;

    assert_eq!(
        apply(
            &state,
            Action::ConcludeGame {
                host_player_id: guest,
                winning_player_id: guest,
            }
        )
        .unwrap_err(),
        ActionError::HostOnly("conclude the game")
    );

    let applied = apply(
        &state,
        Action::ConcludeGame {
            host_player_id: host,
            winning_player_id: guest,
        },
    )
    .unwrap();
    assert_eq!(
        applied.persist,
        Persist::RecordWinAndDelete {
            winner_name: "Bob".into()
        }
    );
}

#[test]
fn terminate_session_is_host_only() {
    let state = selected(&["Alice", "Bob"]);
    let guest = state.players[1].id;
    assert_eq!(
        apply(&state, Action::TerminateSession { player_id: guest }).unwrap_err(),
        ActionError::HostOnly("terminate the session")
    );
    let applied = apply(
        &state,
        Action::TerminateSession {
            player_id: state.players[0].id,
        },
    )
    .unwrap();
    assert_eq!(applied.persist, Persist::Delete);
}

#[test]
fn game_log_keeps_the_newest_fifty_entries() {
    let mut state = selected(&["Alice", "Bob"]);
    for i in 0..60 {
        apply_ok(
            &mut state,
            Action::AdjustGlobalSuspicion {
                amount: if i % 2 == 0 { 1 } else { -1 },
            },
        );
    }
    assert_eq!(state.game_log.len(), 50);
    // Newest first: the last adjustment landed suspicion back on 0.
    assert!(state.game_log[0].contains("Suspicion changed"));
}

#[test]
fn phase_gates_reject_out_of_order_actions() {
    let state = selected(&["Alice", "Bob"]);
    let pid = state.current_player_id.unwrap();
    let spectator = state
        .players
        .iter()
        .map(|p| p.id)
        .find(|id| *id != pid)
        .unwrap();

    assert!(matches!(
        apply(&state, Action::ReturnExploits { player_id: pid }).unwrap_err(),
        ActionError::WrongPhase {
            expected: TurnPhase::ReturnExploits,
            actual: TurnPhase::Draw,
        }
    ));
    assert_eq!(
        apply(&state, Action::SkipDraw { player_id: spectator }).unwrap_err(),
        ActionError::NotYourTurn
    );
    assert_eq!(
        apply(
            &state,
            Action::EndTurn {
                player_id: PlayerId::new_v4(),
            }
        )
        .unwrap_err(),
        ActionError::PlayerNotFound
    );
}
