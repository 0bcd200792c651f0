use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{NewPlayer, PlayerModel, UpsertOutcome};
use crate::shared::AppError;

/// Trait for player registry operations
#[async_trait]
pub trait PlayerRepository {
    /// Atomically inserts a new player or bumps the play count of the existing one.
    ///
    /// On an existing device only `play_count` (+1) and `updated_at` change.
    async fn upsert_player(&self, player: &NewPlayer) -> Result<UpsertOutcome, AppError>;

    async fn get_player(&self, device_id: &str) -> Result<Option<PlayerModel>, AppError>;
}

/// In-memory implementation of PlayerRepository for development and testing
pub struct InMemoryPlayerRepository {
    players: Mutex<HashMap<String, PlayerModel>>,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of registered devices
    pub fn player_count(&self) -> usize {
        self.players.lock().unwrap().len()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self, player), fields(device_id = %player.device_id))]
    async fn upsert_player(&self, player: &NewPlayer) -> Result<UpsertOutcome, AppError> {
        // Single lock covers lookup and write
        let mut players = self.players.lock().unwrap();

        if let Some(existing) = players.get_mut(&player.device_id) {
            // Checked so a client-chosen count cannot panic while the lock is held
            existing.play_count = existing.play_count.checked_add(1).ok_or_else(|| {
                warn!(play_count = existing.play_count, "Play count would overflow");
                AppError::Database("play_count out of range".to_string())
            })?;
            existing.updated_at = player.seen_at;
            debug!(play_count = existing.play_count, "Player play count incremented in memory");
            return Ok(UpsertOutcome::Incremented {
                play_count: existing.play_count,
            });
        }

        let id = players.values().map(|p| p.id).max().unwrap_or(0) + 1;
        players.insert(player.device_id.clone(), player.clone().into_model(id));

        debug!(player_id = id, "Player created in memory");
        Ok(UpsertOutcome::Created {
            play_count: player.play_count,
        })
    }

    #[instrument(skip(self))]
    async fn get_player(&self, device_id: &str) -> Result<Option<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        Ok(players.get(device_id).cloned())
    }
}

/// PostgreSQL implementation of player repository
///
/// Relies on the UNIQUE index on `players.device_id`.
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    #[instrument(skip(self, player), fields(device_id = %player.device_id))]
    async fn upsert_player(&self, player: &NewPlayer) -> Result<UpsertOutcome, AppError> {
        // xmax is 0 only for a freshly inserted tuple
        let row = sqlx::query(
            "INSERT INTO players (name, play_count, device_id, last_ip, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             ON CONFLICT (device_id) DO UPDATE \
             SET play_count = players.play_count + 1, updated_at = EXCLUDED.updated_at \
             RETURNING play_count, (xmax = 0) AS inserted",
        )
        .bind(&player.name)
        .bind(player.play_count)
        .bind(&player.device_id)
        .bind(&player.last_ip)
        .bind(player.seen_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to upsert player");
            AppError::from(e)
        })?;

        let play_count: i32 = row.get("play_count");
        let inserted: bool = row.get("inserted");

        debug!(play_count, inserted, "Player upserted in database");
        Ok(if inserted {
            UpsertOutcome::Created { play_count }
        } else {
            UpsertOutcome::Incremented { play_count }
        })
    }

    #[instrument(skip(self))]
    async fn get_player(&self, device_id: &str) -> Result<Option<PlayerModel>, AppError> {
        let player = sqlx::query_as::<_, PlayerModel>(
            "SELECT id, name, play_count, device_id, last_ip, created_at, updated_at \
             FROM players WHERE device_id = $1",
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch player");
            AppError::from(e)
        })?;

        Ok(player)
    }
}
