//! 区間管理ユースケース
//!
//! 区間の登録は冪等に行う。同じ路線・上り駅・下り駅の組の区間が
//! 既に存在する場合は新規作成せず、既存の区間をそのまま返す。

use std::sync::Arc;

use subway_domain::{
    clock::Clock,
    line::LineId,
    section::{NewSection, Section, SectionId},
    station::StationId,
};
use subway_infra::{
    TransactionManager,
    repository::{LineRepository, SectionRepository, StationRepository},
};

use super::helpers::{
    FindResultExt,
    begin_tx,
    commit_tx,
    find_both_stations,
    validate_section_input,
};
use crate::error::ApiError;

/// 区間登録の入力
pub struct RegisterSectionInput {
    pub line_id:         LineId,
    pub up_station_id:   StationId,
    pub down_station_id: StationId,
    pub distance:        i32,
}

/// 区間管理ユースケース
pub struct SectionUseCaseImpl {
    line_repo:    Arc<dyn LineRepository>,
    station_repo: Arc<dyn StationRepository>,
    section_repo: Arc<dyn SectionRepository>,
    tx_manager:   Arc<dyn TransactionManager>,
    clock:        Arc<dyn Clock>,
}

impl SectionUseCaseImpl {
    pub fn new(
        line_repo: Arc<dyn LineRepository>,
        station_repo: Arc<dyn StationRepository>,
        section_repo: Arc<dyn SectionRepository>,
        tx_manager: Arc<dyn TransactionManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            line_repo,
            station_repo,
            section_repo,
            tx_manager,
            clock,
        }
    }

    /// 区間を登録する
    ///
    /// 1. 距離と上り駅・下り駅の組を検証
    /// 2. 路線・上り駅・下り駅の存在を確認（存在しなければ NotFound）
    /// 3. 同じ組の区間が既にあればそれを返す
    /// 4. なければ新しい区間を挿入して返す
    ///
    /// 挿入は一意制約に対する `ON CONFLICT DO NOTHING` で行うため、
    /// 3 と 4 の間に並行リクエストが同じ組を登録しても重複は作られない。
    /// その場合は並行リクエストが登録した区間を返す。
    pub async fn register_section(&self, input: RegisterSectionInput) -> Result<Section, ApiError> {
        let distance =
            validate_section_input(&input.up_station_id, &input.down_station_id, input.distance)?;

        let line = self
            .line_repo
            .find_by_id(&input.line_id)
            .await
            .or_not_found("路線")?;
        let (up, down) = find_both_stations(
            self.station_repo.as_ref(),
            &input.up_station_id,
            &input.down_station_id,
        )
        .await?;

        if let Some(existing) = self
            .section_repo
            .find_by_stations(line.id(), up.id(), down.id())
            .await?
        {
            tracing::debug!(section_id = %existing.id(), "登録済みの区間を返します");
            return Ok(existing);
        }

        let section = Section::new(NewSection {
            id: SectionId::new(),
            line_id: line.id().clone(),
            up_station_id: up.id().clone(),
            down_station_id: down.id().clone(),
            distance,
            now: self.clock.now(),
        })?;

        let mut tx = begin_tx(self.tx_manager.as_ref()).await?;
        let inserted = self
            .section_repo
            .insert_if_absent(&mut tx, &section)
            .await
            .map_err(|e| match e.as_conflict() {
                // 確認後に路線または駅が削除された場合
                Some(_) => ApiError::NotFound("路線または駅が見つかりません".to_string()),
                None => ApiError::Database(e),
            })?;
        commit_tx(tx).await?;

        if !inserted {
            tracing::debug!(line_id = %line.id(), "並行して登録された区間を返します");
            return self
                .section_repo
                .find_by_stations(line.id(), up.id(), down.id())
                .await?
                .ok_or_else(|| ApiError::Internal("登録済みの区間が取得できません".to_string()));
        }

        tracing::info!(
            section_id = %section.id(),
            line_id = %line.id(),
            up_station_id = %up.id(),
            down_station_id = %down.id(),
            distance = section.distance().as_i32(),
            "区間を登録しました"
        );
        Ok(section)
    }

    /// 路線の区間一覧を作成順で取得する
    pub async fn list_sections(&self, line_id: &LineId) -> Result<Vec<Section>, ApiError> {
        let line = self.line_repo.find_by_id(line_id).await.or_not_found("路線")?;
        Ok(self.section_repo.find_by_line(line.id()).await?)
    }

    /// 路線内の区間を取得する
    pub async fn get_section(
        &self,
        line_id: &LineId,
        section_id: &SectionId,
    ) -> Result<Section, ApiError> {
        let line = self.line_repo.find_by_id(line_id).await.or_not_found("路線")?;
        self.section_repo
            .find_by_id(line.id(), section_id)
            .await
            .or_not_found("区間")
    }

    /// 指定した駅を下り駅とする区間を路線から削除する
    ///
    /// 同じ駅を下り駅とする区間が路線に複数ある場合は、最も古い 1 件だけを削除する。
    pub async fn delete_section(
        &self,
        line_id: &LineId,
        station_id: &StationId,
    ) -> Result<(), ApiError> {
        let line = self.line_repo.find_by_id(line_id).await.or_not_found("路線")?;
        let section = self
            .section_repo
            .find_by_down_station(line.id(), station_id)
            .await
            .or_not_found("区間")?;

        let mut tx = begin_tx(self.tx_manager.as_ref()).await?;
        self.section_repo
            .delete(&mut tx, line.id(), section.id())
            .await?;
        commit_tx(tx).await?;

        tracing::info!(section_id = %section.id(), line_id = %line.id(), "区間を削除しました");
        Ok(())
    }
}
