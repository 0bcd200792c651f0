use leaderboard::{
    build_router, AppState, GameRecordRepository, InMemoryGameRecordRepository,
    InMemoryPlayerRepository, PlayerRepository, PostgresGameRecordRepository,
    PostgresPlayerRepository, ServerConfig,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leaderboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting leaderboard server");

    let config = ServerConfig::from_env()?;

    // Repositories are chosen once here and injected through AppState
    let (game_record_repository, player_repository): (
        Arc<dyn GameRecordRepository + Send + Sync>,
        Arc<dyn PlayerRepository + Send + Sync>,
    ) = match config.connect_pool().await? {
        Some(pool) => {
            info!(max_connections = config.max_connections, "Connected to PostgreSQL");
            (
                Arc::new(PostgresGameRecordRepository::new(pool.clone())),
                Arc::new(PostgresPlayerRepository::new(pool)),
            )
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
            (
                Arc::new(InMemoryGameRecordRepository::new()),
                Arc::new(InMemoryPlayerRepository::new()),
            )
        }
    };

    let app_state = AppState::new(game_record_repository, player_repository)
        .with_trust_proxy_headers(config.trust_proxy_headers);
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Server listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
