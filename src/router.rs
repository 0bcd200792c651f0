use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::network::client_ip;
use crate::player::init_player;
use crate::ranking::{add_game_data, get_ranking};
use crate::shared::AppState;

/// Builds the full HTTP surface.
///
/// Serve with `into_make_service_with_connect_info::<SocketAddr>()`; `/` and `/game/init`
/// read the peer address.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(client_ip))
        .route("/health", get(health))
        .route("/game/ranking", get(get_ranking))
        .route("/game/adddata", post(add_game_data))
        .route("/game/init", post(init_player))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
