// Public API - what other modules can use
pub use handlers::{add_game_data, get_ranking};
pub use service::{IngestOutcome, RankingService};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
