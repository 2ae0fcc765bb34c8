//! # 駅
//!
//! 一つ以上の路線が停車する地点。
//!
//! 駅は作成後に変更されない。削除のみ可能で、区間から参照されている駅は
//! 削除できない（参照整合性はユースケース層と DB 制約で保証する）。

use chrono::{DateTime, Utc};

define_uuid_id! {
    /// 駅の一意識別子
    pub struct StationId;
}

define_validated_string! {
    /// 駅名（値オブジェクト）
    ///
    /// # 不変条件
    ///
    /// - 空文字列ではない（前後の空白はトリミング）
    /// - 最大 255 文字（DB: `VARCHAR(255)`）
    /// - システム内で一意（DB の UNIQUE 制約で保証）
    pub struct StationName {
        label: "駅名",
        max_length: 255,
    }
}

/// 駅エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    id:         StationId,
    name:       StationName,
    created_at: DateTime<Utc>,
}

impl Station {
    /// 新しい駅を作成する
    pub fn new(id: StationId, name: StationName, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at: now,
        }
    }

    /// データベースから駅を復元する
    pub fn from_db(id: StationId, name: StationName, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    pub fn id(&self) -> &StationId {
        &self.id
    }

    pub fn name(&self) -> &StationName {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
