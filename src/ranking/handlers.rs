use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::{
    models::RankingOrder,
    service::{IngestOutcome, RankingService},
    types::{AddGameDataRequest, MessageResponse, RankingEntry, RankingResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for the two leaderboards
///
/// GET /game/ranking
/// A store failure yields empty lists rather than an error status.
#[instrument(name = "get_ranking", skip(state))]
pub async fn get_ranking(State(state): State<AppState>) -> Json<RankingResponse> {
    let service = RankingService::new(Arc::clone(&state.game_record_repository));

    let move_data_list = load_or_empty(&service, RankingOrder::MoveCount).await;
    let time_data_list = load_or_empty(&service, RankingOrder::Duration).await;

    info!(
        move_entries = move_data_list.len(),
        time_entries = time_data_list.len(),
        "Rankings served"
    );

    Json(RankingResponse {
        msg: "success".to_string(),
        move_data_list,
        time_data_list,
    })
}

async fn load_or_empty(service: &RankingService, order: RankingOrder) -> Vec<RankingEntry> {
    match service.get_rankings(order).await {
        Ok(ranked) => ranked.into_iter().map(RankingEntry::from).collect(),
        Err(e) => {
            error!(error = %e, ?order, "Failed to load ranking, serving empty list");
            Vec::new()
        }
    }
}

/// HTTP handler for submitting a finished game
///
/// POST /game/adddata
/// Always acknowledges a decodable body; rejections and store failures are only logged.
#[instrument(name = "add_game_data", skip(state, payload))]
pub async fn add_game_data(
    State(state): State<AppState>,
    payload: Result<Json<AddGameDataRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let service = RankingService::new(Arc::clone(&state.game_record_repository));
    match service.add_game_record(request).await {
        Ok(IngestOutcome::Accepted { id }) => info!(record_id = id, "Game data added"),
        Ok(IngestOutcome::Rejected(reason)) => info!(reason = %reason, "Game data ignored"),
        Err(e) => error!(error = %e, "Failed to store game data"),
    }

    Ok(Json(MessageResponse::success()))
}
