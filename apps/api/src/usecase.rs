//! # ユースケース層
//!
//! 駅・路線・区間のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//! - **書き込みはトランザクション内**: `TransactionManager` で開始した
//!   `TxContext` を書き込みリポジトリメソッドに渡す

pub(crate) mod helpers;

pub mod line;
pub mod section;
pub mod station;

pub use line::{CreateLineInput, LineUseCaseImpl, LineWithSections, UpdateLineInput};
pub use section::{RegisterSectionInput, SectionUseCaseImpl};
pub use station::StationUseCaseImpl;
