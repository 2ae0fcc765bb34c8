//! # SectionRepository
//!
//! 区間の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **路線スコープ**: 区間の検索・削除は常に路線 ID で絞り込む
//! - **冪等な挿入**: `sections_line_up_down_key` 制約に対して
//!   `ON CONFLICT DO NOTHING` で挿入し、挿入されたかどうかを返す。
//!   並行リクエストで同じ組が登録されても重複レコードは作られない
//! - **作成順**: 一覧は `created_at`、`id` の昇順で返す（UUID v7 は時刻順）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use subway_domain::{
    line::LineId,
    section::{Distance, Section, SectionId, SectionRecord},
    station::StationId,
};
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// 区間リポジトリトレイト
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// 路線の区間を作成順で取得する
    async fn find_by_line(&self, line_id: &LineId) -> Result<Vec<Section>, InfraError>;

    /// 複数路線の区間を一括で作成順に取得する
    async fn find_by_lines(&self, line_ids: &[LineId]) -> Result<Vec<Section>, InfraError>;

    /// 路線内の区間を ID で検索する
    async fn find_by_id(
        &self,
        line_id: &LineId,
        id: &SectionId,
    ) -> Result<Option<Section>, InfraError>;

    /// 路線内の (上り駅, 下り駅) の組で区間を検索する
    async fn find_by_stations(
        &self,
        line_id: &LineId,
        up_station_id: &StationId,
        down_station_id: &StationId,
    ) -> Result<Option<Section>, InfraError>;

    /// 路線内で指定した駅を下り駅とする区間を検索する
    async fn find_by_down_station(
        &self,
        line_id: &LineId,
        station_id: &StationId,
    ) -> Result<Option<Section>, InfraError>;

    /// 指定した駅を上り駅または下り駅として参照する区間が存在するか
    async fn exists_by_station(&self, station_id: &StationId) -> Result<bool, InfraError>;

    /// 同じ (路線, 上り駅, 下り駅) の区間が存在しない場合のみ挿入する
    ///
    /// 挿入した場合は `true`、既に存在していた場合は `false` を返す。
    async fn insert_if_absent(
        &self,
        tx: &mut TxContext,
        section: &Section,
    ) -> Result<bool, InfraError>;

    /// 路線内の区間を削除する
    async fn delete(
        &self,
        tx: &mut TxContext,
        line_id: &LineId,
        id: &SectionId,
    ) -> Result<(), InfraError>;

    /// 路線のすべての区間を削除する
    async fn delete_by_line(&self, tx: &mut TxContext, line_id: &LineId) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の SectionRepository
#[derive(Debug, Clone)]
pub struct PostgresSectionRepository {
    pool: PgPool,
}

impl PostgresSectionRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SectionRow {
    id:              Uuid,
    line_id:         Uuid,
    up_station_id:   Uuid,
    down_station_id: Uuid,
    distance:        i32,
    created_at:      DateTime<Utc>,
}

impl TryFrom<SectionRow> for Section {
    type Error = InfraError;

    fn try_from(row: SectionRow) -> Result<Self, Self::Error> {
        let distance =
            Distance::new(row.distance).map_err(|e| InfraError::unexpected(e.to_string()))?;
        Ok(Section::from_db(SectionRecord {
            id: SectionId::from_uuid(row.id),
            line_id: LineId::from_uuid(row.line_id),
            up_station_id: StationId::from_uuid(row.up_station_id),
            down_station_id: StationId::from_uuid(row.down_station_id),
            distance,
            created_at: row.created_at,
        }))
    }
}

fn into_sections(rows: Vec<SectionRow>) -> Result<Vec<Section>, InfraError> {
    rows.into_iter().map(Section::try_from).collect()
}

#[async_trait]
impl SectionRepository for PostgresSectionRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%line_id))]
    async fn find_by_line(&self, line_id: &LineId) -> Result<Vec<Section>, InfraError> {
        let rows = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT id, line_id, up_station_id, down_station_id, distance, created_at
            FROM sections
            WHERE line_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(line_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        into_sections(rows)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(count = line_ids.len()))]
    async fn find_by_lines(&self, line_ids: &[LineId]) -> Result<Vec<Section>, InfraError> {
        if line_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = line_ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT id, line_id, up_station_id, down_station_id, distance, created_at
            FROM sections
            WHERE line_id = ANY($1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        into_sections(rows)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%line_id, %id))]
    async fn find_by_id(
        &self,
        line_id: &LineId,
        id: &SectionId,
    ) -> Result<Option<Section>, InfraError> {
        let row = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT id, line_id, up_station_id, down_station_id, distance, created_at
            FROM sections
            WHERE id = $1 AND line_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(line_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Section::try_from).transpose()
    }

    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(%line_id, %up_station_id, %down_station_id)
    )]
    async fn find_by_stations(
        &self,
        line_id: &LineId,
        up_station_id: &StationId,
        down_station_id: &StationId,
    ) -> Result<Option<Section>, InfraError> {
        let row = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT id, line_id, up_station_id, down_station_id, distance, created_at
            FROM sections
            WHERE line_id = $1 AND up_station_id = $2 AND down_station_id = $3
            "#,
        )
        .bind(line_id.as_uuid())
        .bind(up_station_id.as_uuid())
        .bind(down_station_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Section::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%line_id, %station_id))]
    async fn find_by_down_station(
        &self,
        line_id: &LineId,
        station_id: &StationId,
    ) -> Result<Option<Section>, InfraError> {
        let row = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT id, line_id, up_station_id, down_station_id, distance, created_at
            FROM sections
            WHERE line_id = $1 AND down_station_id = $2
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(line_id.as_uuid())
        .bind(station_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Section::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%station_id))]
    async fn exists_by_station(&self, station_id: &StationId) -> Result<bool, InfraError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM sections
                WHERE up_station_id = $1 OR down_station_id = $1
            )
            "#,
        )
        .bind(station_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %section.id(), line_id = %section.line_id()))]
    async fn insert_if_absent(
        &self,
        tx: &mut TxContext,
        section: &Section,
    ) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            INSERT INTO sections (id, line_id, up_station_id, down_station_id, distance, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT ON CONSTRAINT sections_line_up_down_key DO NOTHING
            "#,
        )
        .bind(section.id().as_uuid())
        .bind(section.line_id().as_uuid())
        .bind(section.up_station_id().as_uuid())
        .bind(section.down_station_id().as_uuid())
        .bind(section.distance().as_i32())
        .bind(section.created_at())
        .execute(tx.conn())
        .await
        .map_err(|e| InfraError::from_constraint_violation(e, "Section", section.id().to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%line_id, %id))]
    async fn delete(
        &self,
        tx: &mut TxContext,
        line_id: &LineId,
        id: &SectionId,
    ) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM sections WHERE id = $1 AND line_id = $2")
            .bind(id.as_uuid())
            .bind(line_id.as_uuid())
            .execute(tx.conn())
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%line_id))]
    async fn delete_by_line(&self, tx: &mut TxContext, line_id: &LineId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM sections WHERE line_id = $1")
            .bind(line_id.as_uuid())
            .execute(tx.conn())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresSectionRepository>();
        assert_send_sync::<Box<dyn SectionRepository>>();
    }

    #[test]
    fn test_距離が0の行はunexpectedエラーになる() {
        let row = SectionRow {
            id:              Uuid::now_v7(),
            line_id:         Uuid::now_v7(),
            up_station_id:   Uuid::now_v7(),
            down_station_id: Uuid::now_v7(),
            distance:        0,
            created_at:      Utc::now(),
        };

        assert!(Section::try_from(row).is_err());
    }
}
