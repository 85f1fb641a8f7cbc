use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::cricket::{Match, MatchUpdate, NewMatch};
use crate::state::AppState;

fn parse_match_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|e| {
        tracing::warn!("Failed to parse match id '{}': {}", id, e);
        AppError::InvalidObjectId(id.to_string())
    })
}

// GET /api/matches
pub async fn get_matches(State(state): State<AppState>) -> Result<Json<Vec<Match>>> {
    let start_time = std::time::Instant::now();

    let matches = state.matches.list_all().await?;

    tracing::info!(
        "✅ Fetched {} matches in {:?}",
        matches.len(),
        start_time.elapsed()
    );
    Ok(Json(matches))
}

// GET /api/matches/:id
pub async fn get_match_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Match>> {
    let object_id = parse_match_id(&id)?;

    let found = state.matches.find_by_id(object_id).await?;
    tracing::debug!(
        "Found match {} vs {}",
        found.team1.short_name,
        found.team2.short_name
    );
    Ok(Json(found))
}

// POST /api/matches
pub async fn create_match(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewMatch>, JsonRejection>,
) -> Result<(StatusCode, Json<Match>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    let created = state.matches.insert(Match::from(payload)).await?;

    tracing::info!(
        "✅ Created match {} vs {} at {}",
        created.team1.short_name,
        created.team2.short_name,
        created.venue
    );
    Ok((StatusCode::CREATED, Json(created)))
}

// PUT /api/matches/:id
pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<MatchUpdate>, JsonRejection>,
) -> Result<Json<Match>> {
    let object_id = parse_match_id(&id)?;
    let Json(payload) = payload?;
    payload.validate()?;
    if payload.is_empty() {
        return Err(AppError::invalid_data("No fields to update"));
    }

    let updated = state.matches.update(object_id, payload).await?;

    tracing::info!("✅ Updated match {} ({})", id, updated.status);
    Ok(Json(updated))
}
