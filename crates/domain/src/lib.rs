//! # Subway ドメイン層
//!
//! 地下鉄路線網（駅・路線・区間）のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（Station, Line, Section）
//! - **値オブジェクト**: 生成時に検証される不変オブジェクト（StationName, Distance）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`station`] - 駅
//! - [`line`] - 路線
//! - [`section`] - 区間（路線上の 2 駅を結ぶ有向エッジ）
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメインエラー
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use subway_domain::station::{Station, StationId, StationName};
//!
//! let station = Station::new(StationId::new(), StationName::new("江南")?, chrono::Utc::now());
//! assert_eq!(station.name().as_str(), "江南");
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod line;
pub mod section;
pub mod station;

pub use error::DomainError;
