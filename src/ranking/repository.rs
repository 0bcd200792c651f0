use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{GameRecordModel, NewGameRecord, RankedRecord, RankingOrder};
use crate::shared::AppError;

/// Trait for game record storage
///
/// Records are append-only: there is no update or delete.
#[async_trait]
pub trait GameRecordRepository {
    /// Inserts a validated record and returns its assigned id
    async fn insert_record(&self, record: &NewGameRecord) -> Result<i64, AppError>;

    /// Returns up to `limit` records sorted ascending by `order`, ties broken by id
    async fn top_records(
        &self,
        order: RankingOrder,
        limit: usize,
    ) -> Result<Vec<RankedRecord>, AppError>;
}

/// In-memory implementation of GameRecordRepository for development and testing
///
/// Data is lost when the application restarts.
pub struct InMemoryGameRecordRepository {
    records: Mutex<Vec<GameRecordModel>>,
}

impl Default for InMemoryGameRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRecordRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Returns the current number of stored records
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl GameRecordRepository for InMemoryGameRecordRepository {
    #[instrument(skip(self, record))]
    async fn insert_record(&self, record: &NewGameRecord) -> Result<i64, AppError> {
        let mut records = self.records.lock().unwrap();
        let id = records.last().map(|r| r.id + 1).unwrap_or(1);
        records.push(record.clone().into_model(id));

        debug!(record_id = id, player_name = %record.player_name, "Game record stored in memory");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn top_records(
        &self,
        order: RankingOrder,
        limit: usize,
    ) -> Result<Vec<RankedRecord>, AppError> {
        let records = self.records.lock().unwrap();
        let mut ranked: Vec<RankedRecord> = records
            .iter()
            .cloned()
            .map(RankedRecord::from_model)
            .collect();

        match order {
            RankingOrder::Duration => ranked.sort_by_key(|r| (r.duration_seconds, r.record.id)),
            RankingOrder::MoveCount => ranked.sort_by_key(|r| (r.record.move_count, r.record.id)),
        }
        ranked.truncate(limit);

        debug!(returned = ranked.len(), "Ranking computed from memory");
        Ok(ranked)
    }
}

const SELECT_RANKED: &str = "SELECT id, player_name, move_count, created_at, completed_at, device_id, \
     FLOOR(EXTRACT(EPOCH FROM (completed_at - created_at)))::BIGINT AS duration_seconds \
     FROM game_records";

/// PostgreSQL implementation of game record repository
pub struct PostgresGameRecordRepository {
    pool: PgPool,
}

impl PostgresGameRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRecordRepository for PostgresGameRecordRepository {
    #[instrument(skip(self, record))]
    async fn insert_record(&self, record: &NewGameRecord) -> Result<i64, AppError> {
        let row = sqlx::query(
            "INSERT INTO game_records (player_name, move_count, created_at, completed_at, device_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&record.player_name)
        .bind(record.move_count)
        .bind(record.created_at)
        .bind(record.completed_at)
        .bind(&record.device_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to insert game record");
            AppError::from(e)
        })?;

        let id: i64 = row.get("id");
        debug!(record_id = id, "Game record stored in database");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn top_records(
        &self,
        order: RankingOrder,
        limit: usize,
    ) -> Result<Vec<RankedRecord>, AppError> {
        let order_by = match order {
            RankingOrder::Duration => "duration_seconds ASC, id ASC",
            RankingOrder::MoveCount => "move_count ASC, id ASC",
        };
        let sql = format!("{SELECT_RANKED} ORDER BY {order_by} LIMIT $1");

        let rows = sqlx::query(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, ?order, "Failed to query ranking");
                AppError::from(e)
            })?;

        let ranked = rows
            .into_iter()
            .map(|row| RankedRecord {
                record: GameRecordModel {
                    id: row.get("id"),
                    player_name: row.get("player_name"),
                    move_count: row.get("move_count"),
                    created_at: row.get("created_at"),
                    completed_at: row.get("completed_at"),
                    device_id: row.get("device_id"),
                },
                duration_seconds: row.get("duration_seconds"),
            })
            .collect::<Vec<_>>();

        debug!(returned = ranked.len(), "Ranking fetched from database");
        Ok(ranked)
    }
}
