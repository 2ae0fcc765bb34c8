//! # リポジトリ実装
//!
//! 駅・路線・区間の永続化トレイトと PostgreSQL 実装を提供する。
//!
//! 読み取りメソッドは接続プールを直接使用し、書き込みメソッドは
//! [`TxContext`](crate::db::TxContext) を必須引数に取る。

pub mod line_repository;
pub mod section_repository;
pub mod station_repository;

pub use line_repository::{LineRepository, PostgresLineRepository};
pub use section_repository::{PostgresSectionRepository, SectionRepository};
pub use station_repository::{PostgresStationRepository, StationRepository};
