//! # StationRepository
//!
//! 駅の永続化を担当するリポジトリ。
//!
//! - 駅名の一意性は `stations_name_key` 制約で保証し、違反は Conflict に変換する
//! - 区間から参照されている駅の削除は外部キー制約（RESTRICT）で拒否され、
//!   同じく Conflict に変換する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use subway_domain::station::{Station, StationId, StationName};
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// 駅リポジトリトレイト
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// すべての駅を駅名順で取得する
    async fn find_all(&self) -> Result<Vec<Station>, InfraError>;

    /// ID で駅を検索する
    async fn find_by_id(&self, id: &StationId) -> Result<Option<Station>, InfraError>;

    /// 駅を挿入する
    ///
    /// 駅名が重複する場合は `InfraErrorKind::Conflict` を返す。
    async fn insert(&self, tx: &mut TxContext, station: &Station) -> Result<(), InfraError>;

    /// 駅を削除する
    ///
    /// 区間から参照されている場合は `InfraErrorKind::Conflict` を返す。
    async fn delete(&self, tx: &mut TxContext, id: &StationId) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の StationRepository
#[derive(Debug, Clone)]
pub struct PostgresStationRepository {
    pool: PgPool,
}

impl PostgresStationRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct StationRow {
    id:         Uuid,
    name:       String,
    created_at: DateTime<Utc>,
}

impl TryFrom<StationRow> for Station {
    type Error = InfraError;

    fn try_from(row: StationRow) -> Result<Self, Self::Error> {
        let name = StationName::new(row.name).map_err(|e| InfraError::unexpected(e.to_string()))?;
        Ok(Station::from_db(
            StationId::from_uuid(row.id),
            name,
            row.created_at,
        ))
    }
}

#[async_trait]
impl StationRepository for PostgresStationRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Station>, InfraError> {
        let rows = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT id, name, created_at
            FROM stations
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Station::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &StationId) -> Result<Option<Station>, InfraError> {
        let row = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT id, name, created_at
            FROM stations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Station::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %station.id()))]
    async fn insert(&self, tx: &mut TxContext, station: &Station) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO stations (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(station.id().as_uuid())
        .bind(station.name().as_str())
        .bind(station.created_at())
        .execute(tx.conn())
        .await
        .map_err(|e| InfraError::from_constraint_violation(e, "Station", station.name().as_str()))?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, tx: &mut TxContext, id: &StationId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM stations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(tx.conn())
            .await
            .map_err(|e| InfraError::from_constraint_violation(e, "Station", id.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresStationRepository>();
        assert_send_sync::<Box<dyn StationRepository>>();
    }

    #[test]
    fn test_行データから駅を復元する() {
        let id = Uuid::now_v7();
        let row = StationRow {
            id,
            name: "江南".to_string(),
            created_at: Utc::now(),
        };

        let station = Station::try_from(row).unwrap();

        assert_eq!(station.id().as_uuid(), &id);
        assert_eq!(station.name().as_str(), "江南");
    }

    #[test]
    fn test_不正な駅名の行はunexpectedエラーになる() {
        let row = StationRow {
            id:         Uuid::now_v7(),
            name:       "   ".to_string(),
            created_at: Utc::now(),
        };

        assert!(Station::try_from(row).is_err());
    }
}
