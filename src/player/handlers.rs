use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    service::PlayerService,
    types::{InitPlayerRequest, InitPlayerResponse},
};
use crate::network::resolve_client_ip;
use crate::shared::{AppError, AppState};

/// HTTP handler for registering a device session
///
/// POST /game/init
/// Validation and store failures are reported in the `error` field with a 200 status;
/// only an undecodable body yields 400.
#[instrument(name = "init_player", skip(state, headers, payload))]
pub async fn init_player(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<InitPlayerRequest>, JsonRejection>,
) -> Result<Json<InitPlayerResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let client_ip = resolve_client_ip(&headers, peer, state.trust_proxy_headers);

    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let error = match service.upsert_player(request, client_ip).await {
        Ok(outcome) => {
            info!(play_count = outcome.play_count(), "Player initialised");
            String::new()
        }
        Err(e) => {
            warn!(error = %e, "Player initialisation failed");
            e.to_string()
        }
    };

    Ok(Json(InitPlayerResponse {
        msg: "success".to_string(),
        error,
    }))
}
