//! Session persistence behind a narrow async trait, so the HTTP layer never
//! touches a concrete backend.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::engine::{GameState, SessionId, WinRecord};

pub use memory::MemoryGameStore;

/// Version token for compare-and-swap saves. Every successful save bumps it.
pub type Version = u64;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("game session not found")]
    SessionNotFound,
    #[error("session was modified concurrently")]
    VersionConflict,
}

/// Cross-session leaderboard names are sanitized before use as record keys.
pub fn sanitize_winner_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '.' | '#' | '$' | '[' | ']' | '/' => '_',
            other => other,
        })
        .collect();
    if cleaned.is_empty() {
        "anonymous".to_owned()
    } else {
        cleaned
    }
}

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Persists a fresh session at version 0.
    async fn create(&self, state: GameState) -> Result<Version, StoreError>;

    async fn load(&self, id: SessionId) -> Result<(GameState, Version), StoreError>;

    /// Compare-and-swap save: succeeds only if the stored version still
    /// equals `expected`, and returns the new version.
    async fn save(
        &self,
        id: SessionId,
        state: GameState,
        expected: Version,
    ) -> Result<Version, StoreError>;

    async fn delete(&self, id: SessionId) -> Result<(), StoreError>;

    /// Atomically bumps the winner's leaderboard record and deletes the
    /// session; the one durable side effect a game leaves behind.
    async fn record_win_and_delete(
        &self,
        id: SessionId,
        winner_name: &str,
    ) -> Result<u64, StoreError>;

    /// Leaderboard snapshot, most wins first.
    async fn wins(&self) -> Vec<WinRecord>;

    /// Watch a session for state changes (one snapshot per save).
    async fn subscribe(&self, id: SessionId) -> Result<watch::Receiver<GameState>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_names_lose_reserved_characters() {
        assert_eq!(sanitize_winner_name("a.b#c$d[e]f/g"), "a_b_c_d_e_f_g");
        assert_eq!(sanitize_winner_name("  Alice  "), "Alice");
        assert_eq!(sanitize_winner_name("   "), "anonymous");
    }
}
