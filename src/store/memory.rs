//! The in-memory [`GameStore`] backend used by the server binary and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info};

use super::{sanitize_winner_name, GameStore, StoreError, Version};
use crate::engine::{GameState, SessionId, WinRecord};

const LOG_TARGET: &str = "secret_societies::store::memory";

struct StoredSession {
    version: Version,
    state: GameState,
    watch_tx: watch::Sender<GameState>,
}

/// Process-local store: a versioned map of sessions plus a win tally.
#[derive(Default)]
pub struct MemoryGameStore {
    sessions: RwLock<HashMap<SessionId, StoredSession>>,
    win_counts: RwLock<HashMap<String, u64>>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn create(&self, state: GameState) -> Result<Version, StoreError> {
        let id = state.session_id;
        let (watch_tx, _) = watch::channel(state.clone());
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            id,
            StoredSession {
                version: 0,
                state,
                watch_tx,
            },
        );
        info!(target: LOG_TARGET, session_id = %id, "Session created");
        Ok(0)
    }

    async fn load(&self, id: SessionId) -> Result<(GameState, Version), StoreError> {
        let sessions = self.sessions.read().await;
        let stored = sessions.get(&id).ok_or(StoreError::SessionNotFound)?;
        Ok((stored.state.clone(), stored.version))
    }

    async fn save(
        &self,
        id: SessionId,
        state: GameState,
        expected: Version,
    ) -> Result<Version, StoreError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(&id).ok_or(StoreError::SessionNotFound)?;
        if stored.version != expected {
            debug!(
                target: LOG_TARGET,
                session_id = %id,
                expected,
                actual = stored.version,
                "Version conflict on save"
            );
            return Err(StoreError::VersionConflict);
        }
        stored.version += 1;
        stored.state = state;
        // Subscribers may all be gone; that is not an error.
        let _ = stored.watch_tx.send(stored.state.clone());
        Ok(stored.version)
    }

    async fn delete(&self, id: SessionId) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(&id)
            .map(|_| info!(target: LOG_TARGET, session_id = %id, "Session deleted"))
            .ok_or(StoreError::SessionNotFound)
    }

    async fn record_win_and_delete(
        &self,
        id: SessionId,
        winner_name: &str,
    ) -> Result<u64, StoreError> {
        // Lock order: sessions before win_counts, everywhere.
        let mut sessions = self.sessions.write().await;
        sessions.remove(&id).ok_or(StoreError::SessionNotFound)?;
        let mut wins = self.win_counts.write().await;
        let key = sanitize_winner_name(winner_name);
        let count = wins.entry(key.clone()).or_insert(0);
        *count += 1;
        info!(
            target: LOG_TARGET,
            session_id = %id,
            winner = %key,
            wins = *count,
            "Game concluded"
        );
        Ok(*count)
    }

    async fn wins(&self) -> Vec<WinRecord> {
        let wins = self.win_counts.read().await;
        let mut records: Vec<WinRecord> = wins
            .iter()
            .map(|(name, count)| WinRecord {
                player_name: name.clone(),
                wins: *count,
            })
            .collect();
        records.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.player_name.cmp(&b.player_name)));
        records
    }

    async fn subscribe(&self, id: SessionId) -> Result<watch::Receiver<GameState>, StoreError> {
        let sessions = self.sessions.read().await;
        let stored = sessions.get(&id).ok_or(StoreError::SessionNotFound)?;
        Ok(stored.watch_tx.subscribe())
    }
}
