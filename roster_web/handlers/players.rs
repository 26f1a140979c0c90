use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use roster_app::key::derive_key;
use roster_types::{
    common::{Player, PlayerKey, PlayerSelector},
    errors::AppError,
};

use crate::{handlers::ApiError, http::AppState};

#[derive(Debug, Clone, Deserialize)]
pub struct NameQuery {
    pub first_name: String,
    pub last_name: String,
}

fn ensure_complete(player: &Player) -> Result<(), AppError> {
    match player.missing_field() {
        Some(field) => Err(AppError::MissingField(field)),
        None => Ok(()),
    }
}

/// GET /players – Every stored player.
pub async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<Player>>, ApiError> {
    let players = state.players.list(&state.request_ctx()).await?;
    Ok(Json(players))
}

/// POST /players – Store a new player under the slug of its full name.
pub async fn create_player(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<Player>, ApiError>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    ensure_complete(&payload)?;

    let player = Player {
        key: Some(derive_key(&payload)),
        ..payload
    };
    let created = state.players.create(&state.request_ctx(), player).await?;

    if let Some(key) = &created.key {
        tracing::info!("Created player {}", key);
    }
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /players/lookup?first_name=..&last_name=.. – Find a player by name.
pub async fn lookup_player(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Player>, ApiError> {
    let selector = PlayerSelector::by_name(query.first_name, query.last_name);
    let player = state.players.get(&state.request_ctx(), &selector).await?;
    Ok(Json(player))
}

/// GET /players/{key}
pub async fn get_player(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let selector = PlayerSelector::ByKey(PlayerKey::new(key));
    let player = state.players.get(&state.request_ctx(), &selector).await?;
    Ok(Json(player))
}

/// PUT /players/{key} – Replace every field of a stored player.
pub async fn update_player(
    State(state): State<AppState>,
    Path(key): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<Player>, ApiError>,
) -> Result<Json<Player>, ApiError> {
    ensure_complete(&payload)?;

    let key = PlayerKey::new(key);
    let updated = state
        .players
        .update(&state.request_ctx(), &key, payload)
        .await?;

    tracing::info!("Updated player {}", key);
    Ok(Json(updated))
}

/// DELETE /players/{key}
pub async fn delete_player(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    let key = PlayerKey::new(key);
    state.players.delete(&state.request_ctx(), &key).await?;

    tracing::info!("Deleted player {}", key);
    Ok(StatusCode::NO_CONTENT)
}
