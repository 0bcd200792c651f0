use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::{NewGameRecord, RankedRecord, RankingOrder, RANKING_LIMIT},
    repository::GameRecordRepository,
    types::AddGameDataRequest,
};
use crate::shared::AppError;
use crate::validation::{validate_game_window, DeviceId, ValidationFailure};

/// Result of submitting a game record
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// Record passed validation and was stored under this id
    Accepted { id: i64 },
    /// Record failed validation; nothing was written
    Rejected(ValidationFailure),
}

/// Service for leaderboard reads and game record ingestion
pub struct RankingService {
    repository: Arc<dyn GameRecordRepository + Send + Sync>,
}

impl RankingService {
    pub fn new(repository: Arc<dyn GameRecordRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Returns the top records for the given order, at most [`RANKING_LIMIT`] long
    #[instrument(skip(self))]
    pub async fn get_rankings(&self, order: RankingOrder) -> Result<Vec<RankedRecord>, AppError> {
        let ranked = self.repository.top_records(order, RANKING_LIMIT).await?;
        debug!(?order, returned = ranked.len(), "Rankings loaded");
        Ok(ranked)
    }

    /// Validates and stores a finished game.
    ///
    /// Invalid candidates are reported as [`IngestOutcome::Rejected`], never as `Err`;
    /// only store failures surface as errors.
    #[instrument(skip(self, candidate), fields(player_name = %candidate.name))]
    pub async fn add_game_record(
        &self,
        candidate: AddGameDataRequest,
    ) -> Result<IngestOutcome, AppError> {
        let record = match Self::validate(candidate) {
            Ok(record) => record,
            Err(failure) => {
                warn!(reason = %failure, "Game record rejected");
                return Ok(IngestOutcome::Rejected(failure));
            }
        };

        let id = self.repository.insert_record(&record).await?;

        info!(
            record_id = id,
            move_count = record.move_count,
            "Game record accepted"
        );
        Ok(IngestOutcome::Accepted { id })
    }

    fn validate(candidate: AddGameDataRequest) -> Result<NewGameRecord, ValidationFailure> {
        let (created_at, completed_at) =
            validate_game_window(&candidate.created_time, &candidate.over_time)?;
        let device_id = DeviceId::parse(&candidate.udid)?;

        Ok(NewGameRecord {
            player_name: candidate.name,
            move_count: candidate.move_count,
            created_at,
            completed_at,
            device_id: device_id.into_inner(),
        })
    }
}
