// Public API - what other modules can use
pub use handlers::init_player;
pub use service::PlayerService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
