use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the players table (one row per device)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct PlayerModel {
    pub id: i64,
    pub name: String,
    pub play_count: i32,
    pub device_id: String,
    pub last_ip: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A sighting of a device, written as a new row or folded into the existing one
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub play_count: i32,
    pub device_id: String,
    pub last_ip: String,
    pub seen_at: NaiveDateTime,
}

impl NewPlayer {
    pub fn into_model(self, id: i64) -> PlayerModel {
        PlayerModel {
            id,
            name: self.name,
            play_count: self.play_count,
            device_id: self.device_id,
            last_ip: self.last_ip,
            created_at: self.seen_at,
            updated_at: self.seen_at,
        }
    }
}

/// What an upsert did to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created { play_count: i32 },
    Incremented { play_count: i32 },
}

impl UpsertOutcome {
    pub fn play_count(&self) -> i32 {
        match self {
            UpsertOutcome::Created { play_count } | UpsertOutcome::Incremented { play_count } => {
                *play_count
            }
        }
    }
}
