//! # Subway インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその PostgreSQL 実装を提供する。
//! 外部システムの詳細をカプセル化し、ドメイン層をインフラの変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//!   ↘
//!     shared
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プール、マイグレーション、トランザクション管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - `mock` - ユースケーステスト用のインメモリ実装（feature `test-utils`）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use subway_infra::{db, repository::PostgresStationRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/subway").await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let stations = PostgresStationRepository::new(pool.clone());
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use db::{TransactionManager, TxContext};
pub use error::{InfraError, InfraErrorKind};
