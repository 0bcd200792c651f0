use serde::{Deserialize, Serialize};

use super::models::RankedRecord;
use crate::validation::format_timestamp;

/// Request payload for submitting a finished game
///
/// Missing fields fall back to their defaults and are then rejected by validation,
/// so only undecodable bodies fail at the extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AddGameDataRequest {
    pub name: String,
    pub move_count: i32,
    pub created_time: String,
    pub over_time: String,
    pub udid: String,
}

/// One leaderboard row as sent to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub id: i64,
    pub name: String,
    pub move_count: i32,
    pub created_time: String,
    pub over_time: String,
    pub duration: i64,
}

impl From<RankedRecord> for RankingEntry {
    fn from(ranked: RankedRecord) -> Self {
        Self {
            id: ranked.record.id,
            name: ranked.record.player_name,
            move_count: ranked.record.move_count,
            created_time: format_timestamp(&ranked.record.created_at),
            over_time: format_timestamp(&ranked.record.completed_at),
            duration: ranked.duration_seconds,
        }
    }
}

/// Response for GET /game/ranking
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub msg: String,
    pub move_data_list: Vec<RankingEntry>,
    pub time_data_list: Vec<RankingEntry>,
}

/// Plain acknowledgement
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn success() -> Self {
        Self {
            msg: "success".to_string(),
        }
    }
}
