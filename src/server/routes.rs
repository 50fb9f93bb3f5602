use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::dto::{
    ActionResponse, CreateGameRequest, CreateGameResponse, JoinGameRequest, JoinGameResponse,
    LeaderboardResponse,
};
use super::error::ApiError;
use super::logging::log_requests;
use crate::engine::{self, Action, Engine, GameState, Persist, SessionId};
use crate::store::{GameStore, StoreError};

const LOG_TARGET: &str = "secret_societies::server::routes";

/// How many times a handler re-reads and re-applies after losing a
/// compare-and-swap race before giving up with 409.
const SAVE_RETRY_LIMIT: usize = 3;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GameStore>,
}

pub fn router(store: Arc<dyn GameStore>) -> Router {
    Router::new()
        .route("/game", post(create_game))
        .route("/game/:session_id", get(get_game))
        .route("/game/:session_id/join", post(join_game))
        .route("/game/:session_id/action", post(post_action))
        .route("/leaderboard", get(leaderboard))
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(AppState { store })
}

async fn create_game(
    State(app): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    let host_name = request.host_name.trim().to_owned();
    if host_name.is_empty() {
        return Err(ApiError::bad_request("host_name must not be empty"));
    }
    let password = request.password.filter(|p| !p.is_empty());

    let mut rng = StdRng::from_entropy();
    let state = engine::new_lobby(&host_name, password, &mut rng, Utc::now());
    let session_id = state.session_id;
    let host_player_id = state.players[0].id;
    app.store.create(state).await?;
    info!(target: LOG_TARGET, %session_id, host = %host_name, "Game session created");
    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse {
            session_id,
            host_player_id,
        }),
    ))
}

async fn get_game(
    State(app): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<GameState>, ApiError> {
    let (state, _) = app.store.load(session_id).await?;
    Ok(Json(state))
}

async fn join_game(
    State(app): State<AppState>,
    Path(session_id): Path<SessionId>,
    Json(request): Json<JoinGameRequest>,
) -> Result<Json<JoinGameResponse>, ApiError> {
    for _ in 0..SAVE_RETRY_LIMIT {
        let (state, version) = app.store.load(session_id).await?;
        let mut rng = StdRng::from_entropy();
        let (next, player_id) = engine::join(
            &state,
            &request.player_name,
            request.password.as_deref(),
            &mut rng,
            Utc::now(),
        )?;
        match app.store.save(session_id, next, version).await {
            Ok(_) => {
                info!(target: LOG_TARGET, %session_id, %player_id, "Player joined");
                return Ok(Json(JoinGameResponse {
                    session_id,
                    player_id,
                }));
            }
            Err(StoreError::VersionConflict) => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Err(ApiError::Conflict(
        "session is being modified concurrently; try again".into(),
    ))
}

async fn post_action(
    State(app): State<AppState>,
    Path(session_id): Path<SessionId>,
    Json(action): Json<Action>,
) -> Result<Json<ActionResponse>, ApiError> {
    for _ in 0..SAVE_RETRY_LIMIT {
        let (state, version) = app.store.load(session_id).await?;
        let mut rng = StdRng::from_entropy();
        let applied = Engine::apply(&state, &action, &mut rng, Utc::now())?;
        match applied.persist.clone() {
            Persist::None => return Ok(Json(ActionResponse::from_applied(applied, false))),
            Persist::Save => {
                match app.store.save(session_id, applied.state.clone(), version).await {
                    Ok(_) => return Ok(Json(ActionResponse::from_applied(applied, false))),
                    Err(StoreError::VersionConflict) => continue,
                    Err(err) => return Err(err.into()),
                }
            }
            Persist::Delete => {
                app.store.delete(session_id).await?;
                info!(target: LOG_TARGET, %session_id, "Session terminated");
                return Ok(Json(ActionResponse::from_applied(applied, true)));
            }
            Persist::RecordWinAndDelete { winner_name } => {
                let wins = app
                    .store
                    .record_win_and_delete(session_id, &winner_name)
                    .await?;
                info!(
                    target: LOG_TARGET,
                    %session_id,
                    winner = %winner_name,
                    wins,
                    "Game concluded"
                );
                return Ok(Json(ActionResponse::from_applied(applied, true)));
            }
        }
    }
    Err(ApiError::Conflict(
        "action raced concurrent updates; try again".into(),
    ))
}

async fn leaderboard(State(app): State<AppState>) -> Json<LeaderboardResponse> {
    Json(LeaderboardResponse {
        records: app.store.wins().await,
    })
}
