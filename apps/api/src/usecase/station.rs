//! 駅管理ユースケース

use std::sync::Arc;

use subway_domain::{
    clock::Clock,
    station::{Station, StationId, StationName},
};
use subway_infra::{
    TransactionManager,
    repository::{SectionRepository, StationRepository},
};

use super::helpers::{FindResultExt, begin_tx, commit_tx};
use crate::error::ApiError;

/// 駅管理ユースケース
pub struct StationUseCaseImpl {
    station_repo: Arc<dyn StationRepository>,
    section_repo: Arc<dyn SectionRepository>,
    tx_manager:   Arc<dyn TransactionManager>,
    clock:        Arc<dyn Clock>,
}

impl StationUseCaseImpl {
    pub fn new(
        station_repo: Arc<dyn StationRepository>,
        section_repo: Arc<dyn SectionRepository>,
        tx_manager: Arc<dyn TransactionManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            station_repo,
            section_repo,
            tx_manager,
            clock,
        }
    }

    /// 駅を作成する
    ///
    /// 駅名が重複する場合は Conflict（DB の一意制約で検出）。
    pub async fn create_station(&self, name: String) -> Result<Station, ApiError> {
        let name = StationName::new(name)?;
        let station = Station::new(StationId::new(), name, self.clock.now());

        let mut tx = begin_tx(self.tx_manager.as_ref()).await?;
        self.station_repo
            .insert(&mut tx, &station)
            .await
            .map_err(|e| match e.as_conflict() {
                Some(_) => ApiError::Conflict("同名の駅が既に存在します".to_string()),
                None => ApiError::Database(e),
            })?;
        commit_tx(tx).await?;

        tracing::info!(station_id = %station.id(), name = %station.name(), "駅を作成しました");
        Ok(station)
    }

    /// 駅一覧を駅名順で取得する
    pub async fn list_stations(&self) -> Result<Vec<Station>, ApiError> {
        Ok(self.station_repo.find_all().await?)
    }

    /// 駅を取得する
    pub async fn get_station(&self, id: &StationId) -> Result<Station, ApiError> {
        self.station_repo.find_by_id(id).await.or_not_found("駅")
    }

    /// 駅を削除する
    ///
    /// 区間から参照されている駅は削除できない（Conflict）。
    pub async fn delete_station(&self, id: &StationId) -> Result<(), ApiError> {
        let station = self.station_repo.find_by_id(id).await.or_not_found("駅")?;

        if self.section_repo.exists_by_station(station.id()).await? {
            return Err(referenced_station_conflict());
        }

        let mut tx = begin_tx(self.tx_manager.as_ref()).await?;
        self.station_repo
            .delete(&mut tx, station.id())
            .await
            .map_err(|e| match e.as_conflict() {
                // 確認後に並行して区間が登録された場合
                Some(_) => referenced_station_conflict(),
                None => ApiError::Database(e),
            })?;
        commit_tx(tx).await?;

        tracing::info!(station_id = %station.id(), "駅を削除しました");
        Ok(())
    }
}

fn referenced_station_conflict() -> ApiError {
    ApiError::Conflict("区間から参照されている駅は削除できません".to_string())
}
