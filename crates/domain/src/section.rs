//! # 区間
//!
//! 路線上の上り駅から下り駅への有向エッジと、その距離。
//!
//! ## 不変条件
//!
//! - 上り駅と下り駅は異なる
//! - 距離は 1 以上
//! - 同一路線内で (上り駅, 下り駅) の組は一意（DB の UNIQUE 制約で保証）
//!
//! 同じ組の登録要求は既存の区間を返す（冪等な登録）。この判定は
//! ユースケース層で行う。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use subway_domain::{
//!     line::LineId,
//!     section::{Distance, NewSection, Section, SectionId},
//!     station::StationId,
//! };
//!
//! let section = Section::new(NewSection {
//!     id:              SectionId::new(),
//!     line_id:         LineId::new(),
//!     up_station_id:   StationId::new(),
//!     down_station_id: StationId::new(),
//!     distance:        Distance::new(10)?,
//!     now:             chrono::Utc::now(),
//! })?;
//! assert_eq!(section.distance().as_i32(), 10);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, line::LineId, station::StationId};

define_uuid_id! {
    /// 区間の一意識別子
    pub struct SectionId;
}

// =========================================================================
// Distance（区間距離）
// =========================================================================

/// 区間距離（値オブジェクト）
///
/// # 不変条件
///
/// - 1 以上の正整数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Distance(i32);

impl Distance {
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::Validation(
                "区間距離は 1 以上である必要があります".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 内部の i32 値を取得する
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Distance {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// Section（区間エンティティ）
// =========================================================================

/// 区間作成の入力
pub struct NewSection {
    pub id:              SectionId,
    pub line_id:         LineId,
    pub up_station_id:   StationId,
    pub down_station_id: StationId,
    pub distance:        Distance,
    pub now:             DateTime<Utc>,
}

/// DB から復元する際の行データ
pub struct SectionRecord {
    pub id:              SectionId,
    pub line_id:         LineId,
    pub up_station_id:   StationId,
    pub down_station_id: StationId,
    pub distance:        Distance,
    pub created_at:      DateTime<Utc>,
}

/// 区間エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id:              SectionId,
    line_id:         LineId,
    up_station_id:   StationId,
    down_station_id: StationId,
    distance:        Distance,
    created_at:      DateTime<Utc>,
}

impl Section {
    /// 新しい区間を作成する
    ///
    /// # エラー
    ///
    /// 上り駅と下り駅が同一の場合は `DomainError::Validation` を返す。
    pub fn new(input: NewSection) -> Result<Self, DomainError> {
        if input.up_station_id == input.down_station_id {
            return Err(DomainError::Validation(
                "上り駅と下り駅は異なる駅である必要があります".to_string(),
            ));
        }

        Ok(Self {
            id:              input.id,
            line_id:         input.line_id,
            up_station_id:   input.up_station_id,
            down_station_id: input.down_station_id,
            distance:        input.distance,
            created_at:      input.now,
        })
    }

    /// データベースから区間を復元する
    pub fn from_db(record: SectionRecord) -> Self {
        Self {
            id:              record.id,
            line_id:         record.line_id,
            up_station_id:   record.up_station_id,
            down_station_id: record.down_station_id,
            distance:        record.distance,
            created_at:      record.created_at,
        }
    }

    /// 指定した (上り駅, 下り駅) の組と一致するか
    pub fn connects(&self, up_station_id: &StationId, down_station_id: &StationId) -> bool {
        &self.up_station_id == up_station_id && &self.down_station_id == down_station_id
    }

    /// 指定した駅を上り駅または下り駅として含むか
    pub fn touches(&self, station_id: &StationId) -> bool {
        &self.up_station_id == station_id || &self.down_station_id == station_id
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn line_id(&self) -> &LineId {
        &self.line_id
    }

    pub fn up_station_id(&self) -> &StationId {
        &self.up_station_id
    }

    pub fn down_station_id(&self) -> &StationId {
        &self.down_station_id
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
