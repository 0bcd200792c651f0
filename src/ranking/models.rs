use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Maximum number of entries in either leaderboard
pub const RANKING_LIMIT: usize = 20;

/// Database model for the game_records table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct GameRecordModel {
    pub id: i64,
    pub player_name: String,
    pub move_count: i32,
    pub created_at: NaiveDateTime,
    pub completed_at: NaiveDateTime,
    pub device_id: String,
}

/// Validated game record ready to be inserted (id is assigned by the store)
#[derive(Debug, Clone, PartialEq)]
pub struct NewGameRecord {
    pub player_name: String,
    pub move_count: i32,
    pub created_at: NaiveDateTime,
    pub completed_at: NaiveDateTime,
    pub device_id: String,
}

impl NewGameRecord {
    pub fn into_model(self, id: i64) -> GameRecordModel {
        GameRecordModel {
            id,
            player_name: self.player_name,
            move_count: self.move_count,
            created_at: self.created_at,
            completed_at: self.completed_at,
            device_id: self.device_id,
        }
    }
}

/// A stored record together with its derived duration
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecord {
    pub record: GameRecordModel,
    pub duration_seconds: i64,
}

impl RankedRecord {
    pub fn from_model(record: GameRecordModel) -> Self {
        let duration_seconds = duration_seconds(&record.created_at, &record.completed_at);
        Self {
            record,
            duration_seconds,
        }
    }
}

/// Whole seconds between start and finish, truncated toward zero
pub fn duration_seconds(created_at: &NaiveDateTime, completed_at: &NaiveDateTime) -> i64 {
    (*completed_at - *created_at).num_seconds()
}

/// Which column a leaderboard is sorted by (always ascending)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingOrder {
    Duration,
    MoveCount,
}
