//! Session construction: lobby creation, joining, deck initialization.

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use uuid::Uuid;

use super::errors::ActionError;
use super::rules::*;
use super::state::GameState;
use super::types::*;
use crate::cards::{
    all_event_cards, all_victory_conditions, cards_in_zone, shuffled, InstanceIdAllocator,
    ZoneName,
};

fn new_player<R: Rng>(name: &str, rng: &mut R) -> Player {
    let current_zone = ZoneName::starting_zones()
        .choose(rng)
        .unwrap_or(ZoneName::Cathedral);
    Player {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        gold: STARTING_GOLD,
        trust: STARTING_TRUST,
        information: STARTING_INFORMATION,
        secrecy: STARTING_SECRECY,
        hand: Vec::new(),
        masks: Masks::default(),
        current_zone,
        victory_condition: None,
        is_victory_condition_revealed: false,
        is_eliminated: false,
        pending_hand_reveal_request_from: None,
        has_moved_this_turn: false,
    }
}

fn build_zones<R: Rng>(session_id: SessionId, rng: &mut R) -> Vec<Zone> {
    // Instance ids are only ever minted here; the allocator dies with this
    // call and every card keeps its identity for the session's lifetime.
    let prefix = session_id.simple().to_string();
    let mut alloc = InstanceIdAllocator::new(&prefix[..8]);
    ZoneName::ALL
        .into_iter()
        .map(|name| {
            let mut deck = Vec::new();
            for def in cards_in_zone(name) {
                for _ in 0..def.copies {
                    deck.push(CardRef {
                        base_id: def.id.to_owned(),
                        instance_id: alloc.next_id(def.id),
                    });
                }
            }
            deck.shuffle(rng);
            Zone {
                name,
                borders: name.borders().to_vec(),
                secret_deck: deck,
            }
        })
        .collect()
}

/// Creates a fresh session in the lobby phase with the host seated.
pub fn new_lobby<R: Rng>(
    host_name: &str,
    password: Option<String>,
    rng: &mut R,
    now: Timestamp,
) -> GameState {
    let session_id = Uuid::new_v4();
    let host = new_player(host_name, rng);

    let mut event_deck = shuffled(&all_event_cards(), rng);
    let upcoming_event = if event_deck.is_empty() {
        None
    } else {
        Some(event_deck.remove(0))
    };

    let mut state = GameState {
        session_id,
        password,
        created_at: now,
        turn_order: Vec::new(),
        current_player_id: None,
        turn_phase: TurnPhase::Lobby,
        round: 1,
        suspicion: STARTING_SUSPICION,
        max_suspicion_adjustment: STARTING_MAX_SUSPICION_ADJUSTMENT,
        zones: build_zones(session_id, rng),
        active_event: None,
        upcoming_event,
        event_deck,
        available_victory_conditions: shuffled(&all_victory_conditions(), rng),
        currently_revealed_masks: Vec::new(),
        revealed_mask_types_this_turn: Vec::new(),
        revealed_hand: None,
        game_log: Vec::new(),
        players: vec![host],
    };
    let entry = format!(
        "[{}] Lobby created by {}. Waiting for players...",
        now.format("%H:%M:%S"),
        state.players[0].name
    );
    state.push_log(std::slice::from_ref(&entry));
    state
}

/// Seats a new player in an open lobby. Returns the updated state and the
/// new player's id; the input state is untouched on error.
pub fn join<R: Rng>(
    state: &GameState,
    player_name: &str,
    password: Option<&str>,
    rng: &mut R,
    now: Timestamp,
) -> Result<(GameState, PlayerId), ActionError> {
    if let Some(expected) = state.password.as_deref() {
        if password != Some(expected) {
            return Err(ActionError::WrongPassword);
        }
    }
    if state.turn_phase != TurnPhase::Lobby {
        return Err(ActionError::GameAlreadyStarted);
    }
    if state.players.len() >= MAX_PLAYERS {
        return Err(ActionError::LobbyFull);
    }
    let trimmed = player_name.trim();
    if trimmed.is_empty() {
        return Err(ActionError::Validation("player name must not be empty".into()));
    }
    if state
        .players
        .iter()
        .any(|p| p.name.eq_ignore_ascii_case(trimmed))
    {
        return Err(ActionError::NameTaken);
    }

    let mut next = state.clone();
    let player = new_player(trimmed, rng);
    let player_id = player.id;
    next.players.push(player);
    let entry = format!(
        "[{}] {} joined the lobby.",
        now.format("%H:%M:%S"),
        trimmed
    );
    next.push_log(std::slice::from_ref(&entry));
    Ok((next, player_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fresh_lobby_has_full_decks_and_one_player() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = new_lobby("Alice", None, &mut rng, Utc::now());
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.turn_phase, TurnPhase::Lobby);
        assert_eq!(state.zones.len(), 7);
        for zone in &state.zones {
            assert_eq!(zone.secret_deck.len(), 20, "{} deck", zone.name);
        }
        assert_eq!(state.available_victory_conditions.len(), 18);
        // One event is already staged as upcoming.
        assert!(state.upcoming_event.is_some());
        assert_eq!(state.event_deck.len(), 9);
        assert!(state.active_event.is_none());
    }

    #[test]
    fn join_enforces_password_capacity_and_names() {
        let mut rng = StdRng::seed_from_u64(2);
        let now = Utc::now();
        let state = new_lobby("Alice", Some("hush".into()), &mut rng, now);

        assert_eq!(
            join(&state, "Bob", None, &mut rng, now).unwrap_err(),
            ActionError::WrongPassword
        );
        assert_eq!(
            join(&state, "alice", Some("hush"), &mut rng, now).unwrap_err(),
            ActionError::NameTaken
        );

        let (state, _) = join(&state, "Bob", Some("hush"), &mut rng, now).unwrap();
        let (state, _) = join(&state, "Carol", Some("hush"), &mut rng, now).unwrap();
        let (state, _) = join(&state, "Dave", Some("hush"), &mut rng, now).unwrap();
        assert_eq!(
            join(&state, "Erin", Some("hush"), &mut rng, now).unwrap_err(),
            ActionError::LobbyFull
        );
        assert_eq!(state.players.len(), 4);
    }

    #[test]
    fn players_start_outside_the_royal_chamber() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..32 {
            let state = new_lobby("Alice", None, &mut rng, Utc::now());
            assert_ne!(state.players[0].current_zone, ZoneName::RoyalChamber);
        }
    }
}
