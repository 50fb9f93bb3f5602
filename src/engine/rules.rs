//! Table rules that are constant across sessions.

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

pub const STARTING_GOLD: u32 = 5;
pub const STARTING_TRUST: u32 = 8;
pub const STARTING_INFORMATION: u32 = 2;
pub const STARTING_SECRECY: u32 = 0;

pub const STARTING_SUSPICION: u32 = 0;
pub const STARTING_MAX_SUSPICION_ADJUSTMENT: u32 = 2;

/// Number of Victory Conditions offered to the selecting player.
pub const VC_OFFER_SIZE: usize = 3;
/// Number of cards shown from the top of a zone deck during Draw.
pub const DRAW_OFFER_SIZE: usize = 3;
/// Gold cost per drawn card beyond the first.
pub const DRAW_COST_PER_EXTRA_CARD: u32 = 3;

/// Newest-first game log retention.
pub const GAME_LOG_CAP: usize = 50;

/// Gold cost of drawing `count` cards: the first is free, each further card
/// costs [`DRAW_COST_PER_EXTRA_CARD`].
pub fn draw_cost(count: usize) -> u32 {
    (count.saturating_sub(1) as u32) * DRAW_COST_PER_EXTRA_CARD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_cost_schedule() {
        assert_eq!(draw_cost(0), 0);
        assert_eq!(draw_cost(1), 0);
        assert_eq!(draw_cost(2), 3);
        assert_eq!(draw_cost(3), 6);
    }
}
