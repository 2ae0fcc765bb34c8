//! 路線管理ユースケース
//!
//! 路線は最初の区間とともに 1 つのトランザクションで作成する。
//! 路線の削除はその路線の区間もまとめて削除する。

use std::{collections::HashMap, sync::Arc};

use subway_domain::{
    clock::Clock,
    line::{Line, LineColor, LineId, LineName},
    section::{NewSection, Section, SectionId},
    station::StationId,
};
use subway_infra::{
    InfraError,
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

/// 路線作成の入力
pub struct CreateLineInput {
    pub name:            String,
    pub color:           String,
    pub up_station_id:   StationId,
    pub down_station_id: StationId,
    pub distance:        i32,
}

/// 路線更新の入力
///
/// `None` のフィールドは変更しない。
pub struct UpdateLineInput {
    pub line_id: LineId,
    pub name:    Option<String>,
    pub color:   Option<String>,
}

/// 路線とその区間
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWithSections {
    pub line:     Line,
    pub sections: Vec<Section>,
}

/// 路線管理ユースケース
pub struct LineUseCaseImpl {
    line_repo:    Arc<dyn LineRepository>,
    station_repo: Arc<dyn StationRepository>,
    section_repo: Arc<dyn SectionRepository>,
    tx_manager:   Arc<dyn TransactionManager>,
    clock:        Arc<dyn Clock>,
}

impl LineUseCaseImpl {
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

    /// 路線を最初の区間とともに作成する
    ///
    /// 1. 路線名・色・区間の入力値を検証
    /// 2. 上り駅・下り駅の存在を確認
    /// 3. 路線と区間を同一トランザクションで挿入
    pub async fn create_line(&self, input: CreateLineInput) -> Result<LineWithSections, ApiError> {
        let name = LineName::new(input.name)?;
        let color = LineColor::new(input.color)?;
        let distance =
            validate_section_input(&input.up_station_id, &input.down_station_id, input.distance)?;
        let (up, down) = find_both_stations(
            self.station_repo.as_ref(),
            &input.up_station_id,
            &input.down_station_id,
        )
        .await?;

        let now = self.clock.now();
        let line = Line::new(LineId::new(), name, color, now);
        let section = Section::new(NewSection {
            id: SectionId::new(),
            line_id: line.id().clone(),
            up_station_id: up.id().clone(),
            down_station_id: down.id().clone(),
            distance,
            now,
        })?;

        let mut tx = begin_tx(self.tx_manager.as_ref()).await?;
        self.line_repo
            .insert(&mut tx, &line)
            .await
            .map_err(duplicate_line_name)?;
        let inserted = self
            .section_repo
            .insert_if_absent(&mut tx, &section)
            .await
            .map_err(|e| match e.as_conflict() {
                Some(_) => ApiError::NotFound("駅が見つかりません".to_string()),
                None => ApiError::Database(e),
            })?;
        // 作成したばかりの路線には既存の区間がない
        debug_assert!(inserted, "新しい路線の最初の区間が挿入されていない");
        commit_tx(tx).await?;

        tracing::info!(
            line_id = %line.id(),
            name = %line.name(),
            section_id = %section.id(),
            "路線を作成しました"
        );
        Ok(LineWithSections {
            line,
            sections: vec![section],
        })
    }

    /// 路線一覧を路線名順で取得する
    pub async fn list_lines(&self) -> Result<Vec<LineWithSections>, ApiError> {
        let lines = self.line_repo.find_all().await?;
        let line_ids: Vec<LineId> = lines.iter().map(|l| l.id().clone()).collect();

        let mut sections_by_line: HashMap<LineId, Vec<Section>> = HashMap::new();
        for section in self.section_repo.find_by_lines(&line_ids).await? {
            sections_by_line
                .entry(section.line_id().clone())
                .or_default()
                .push(section);
        }

        Ok(lines
            .into_iter()
            .map(|line| {
                let sections = sections_by_line.remove(line.id()).unwrap_or_default();
                LineWithSections { line, sections }
            })
            .collect())
    }

    /// 路線を区間とともに取得する
    pub async fn get_line(&self, line_id: &LineId) -> Result<LineWithSections, ApiError> {
        let line = self.line_repo.find_by_id(line_id).await.or_not_found("路線")?;
        let sections = self.section_repo.find_by_line(line.id()).await?;
        Ok(LineWithSections { line, sections })
    }

    /// 路線の名前・色を更新する
    pub async fn update_line(&self, input: UpdateLineInput) -> Result<LineWithSections, ApiError> {
        let line = self
            .line_repo
            .find_by_id(&input.line_id)
            .await
            .or_not_found("路線")?;

        let now = self.clock.now();

        let line = match input.name {
            Some(name) => line.with_name(LineName::new(name)?, now),
            None => line,
        };

        let line = match input.color {
            Some(color) => line.with_color(LineColor::new(color)?, now),
            None => line,
        };

        let mut tx = begin_tx(self.tx_manager.as_ref()).await?;
        self.line_repo
            .update(&mut tx, &line)
            .await
            .map_err(duplicate_line_name)?;
        commit_tx(tx).await?;

        let sections = self.section_repo.find_by_line(line.id()).await?;
        Ok(LineWithSections { line, sections })
    }

    /// 路線をその区間とともに削除する
    pub async fn delete_line(&self, line_id: &LineId) -> Result<(), ApiError> {
        let line = self.line_repo.find_by_id(line_id).await.or_not_found("路線")?;

        let mut tx = begin_tx(self.tx_manager.as_ref()).await?;
        self.section_repo.delete_by_line(&mut tx, line.id()).await?;
        self.line_repo.delete(&mut tx, line.id()).await?;
        commit_tx(tx).await?;

        tracing::info!(line_id = %line.id(), "路線を削除しました");
        Ok(())
    }
}

fn duplicate_line_name(e: InfraError) -> ApiError {
    match e.as_conflict() {
        Some(_) => ApiError::Conflict("同名の路線が既に存在します".to_string()),
        None => ApiError::Database(e),
    }
}
