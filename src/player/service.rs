use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::{NewPlayer, PlayerModel, UpsertOutcome},
    repository::PlayerRepository,
    types::InitPlayerRequest,
};
use crate::shared::AppError;
use crate::validation::DeviceId;

/// Service for the player registry
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Registers a sighting of a device.
    ///
    /// `client_ip` comes from the connection, not the payload. It is only stored when the
    /// device is new.
    #[instrument(skip(self, request), fields(player_name = %request.name))]
    pub async fn upsert_player(
        &self,
        request: InitPlayerRequest,
        client_ip: String,
    ) -> Result<UpsertOutcome, AppError> {
        let device_id = DeviceId::parse(&request.udid).map_err(|failure| {
            warn!(reason = %failure, "Player registration rejected");
            AppError::from(failure)
        })?;

        let sighting = NewPlayer {
            name: request.name,
            play_count: request.play_count,
            device_id: device_id.into_inner(),
            last_ip: client_ip,
            seen_at: Utc::now().naive_utc(),
        };

        let outcome = self.repository.upsert_player(&sighting).await?;

        info!(
            device_id = %sighting.device_id,
            play_count = outcome.play_count(),
            created = matches!(outcome, UpsertOutcome::Created { .. }),
            "Player registered"
        );
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn get_player(&self, device_id: &str) -> Result<Option<PlayerModel>, AppError> {
        self.repository.get_player(device_id).await
    }
}
