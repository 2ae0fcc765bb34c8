//! # LineRepository
//!
//! 路線の永続化を担当するリポジトリ。
//! 路線名の一意性は `lines_name_key` 制約で保証する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use subway_domain::line::{Line, LineColor, LineId, LineName};
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// 路線リポジトリトレイト
#[async_trait]
pub trait LineRepository: Send + Sync {
    /// すべての路線を路線名順で取得する
    async fn find_all(&self) -> Result<Vec<Line>, InfraError>;

    /// ID で路線を検索する
    async fn find_by_id(&self, id: &LineId) -> Result<Option<Line>, InfraError>;

    /// 路線を挿入する
    ///
    /// 路線名が重複する場合は `InfraErrorKind::Conflict` を返す。
    async fn insert(&self, tx: &mut TxContext, line: &Line) -> Result<(), InfraError>;

    /// 路線の名前と色を更新する
    async fn update(&self, tx: &mut TxContext, line: &Line) -> Result<(), InfraError>;

    /// 路線を削除する
    async fn delete(&self, tx: &mut TxContext, id: &LineId) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の LineRepository
#[derive(Debug, Clone)]
pub struct PostgresLineRepository {
    pool: PgPool,
}

impl PostgresLineRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LineRow {
    id:         Uuid,
    name:       String,
    color:      String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LineRow> for Line {
    type Error = InfraError;

    fn try_from(row: LineRow) -> Result<Self, Self::Error> {
        Ok(Line::from_db(
            LineId::from_uuid(row.id),
            LineName::new(row.name).map_err(|e| InfraError::unexpected(e.to_string()))?,
            LineColor::new(row.color).map_err(|e| InfraError::unexpected(e.to_string()))?,
            row.created_at,
            row.updated_at,
        ))
    }
}

#[async_trait]
impl LineRepository for PostgresLineRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Line>, InfraError> {
        let rows = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT id, name, color, created_at, updated_at
            FROM lines
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Line::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &LineId) -> Result<Option<Line>, InfraError> {
        let row = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT id, name, color, created_at, updated_at
            FROM lines
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Line::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %line.id()))]
    async fn insert(&self, tx: &mut TxContext, line: &Line) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO lines (id, name, color, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(line.id().as_uuid())
        .bind(line.name().as_str())
        .bind(line.color().as_str())
        .bind(line.created_at())
        .bind(line.updated_at())
        .execute(tx.conn())
        .await
        .map_err(|e| InfraError::from_constraint_violation(e, "Line", line.name().as_str()))?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %line.id()))]
    async fn update(&self, tx: &mut TxContext, line: &Line) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE lines
            SET name = $2, color = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(line.id().as_uuid())
        .bind(line.name().as_str())
        .bind(line.color().as_str())
        .bind(line.updated_at())
        .execute(tx.conn())
        .await
        .map_err(|e| InfraError::from_constraint_violation(e, "Line", line.name().as_str()))?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, tx: &mut TxContext, id: &LineId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM lines WHERE id = $1")
            .bind(id.as_uuid())
            .execute(tx.conn())
            .await?;

        Ok(())
    }
}
