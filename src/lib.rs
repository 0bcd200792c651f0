// Library crate for the game leaderboard server
// This file exposes the public API for integration tests

pub mod config;
pub mod network;
pub mod player;
pub mod ranking;
pub mod router;
pub mod shared;
pub mod validation;

// Re-export commonly used types for easier access in tests
pub use config::{ConfigError, ServerConfig};
pub use player::{
    repository::{InMemoryPlayerRepository, PlayerRepository, PostgresPlayerRepository},
    PlayerService,
};
pub use ranking::{
    repository::{GameRecordRepository, InMemoryGameRecordRepository, PostgresGameRecordRepository},
    IngestOutcome, RankingService,
};
pub use router::build_router;
pub use shared::{AppError, AppState};
