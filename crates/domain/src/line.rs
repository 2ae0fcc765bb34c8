//! # 路線
//!
//! 区間の集合で構成される名前付きの地下鉄路線。
//!
//! 路線は作成時に最初の区間を 1 つ持つ。区間の並び替え・経路の再構成は
//! 行わず、区間は作成順の集合として扱う。

use chrono::{DateTime, Utc};

define_uuid_id! {
    /// 路線の一意識別子
    pub struct LineId;
}

define_validated_string! {
    /// 路線名（値オブジェクト）
    ///
    /// # 不変条件
    ///
    /// - 空文字列ではない
    /// - 最大 255 文字
    /// - システム内で一意（DB の UNIQUE 制約で保証）
    pub struct LineName {
        label: "路線名",
        max_length: 255,
    }
}

define_validated_string! {
    /// 路線の表示色（例: `bg-red-600`）
    pub struct LineColor {
        label: "路線色",
        max_length: 20,
    }
}

/// 路線エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    id:         LineId,
    name:       LineName,
    color:      LineColor,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Line {
    /// 新しい路線を作成する
    pub fn new(id: LineId, name: LineName, color: LineColor, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            color,
            created_at: now,
            updated_at: now,
        }
    }

    /// データベースから路線を復元する
    pub fn from_db(
        id: LineId,
        name: LineName,
        color: LineColor,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            color,
            created_at,
            updated_at,
        }
    }

    /// 路線名を変更した新インスタンスを返す
    pub fn with_name(self, name: LineName, now: DateTime<Utc>) -> Self {
        Self {
            name,
            updated_at: now,
            ..self
        }
    }

    /// 表示色を変更した新インスタンスを返す
    pub fn with_color(self, color: LineColor, now: DateTime<Utc>) -> Self {
        Self {
            color,
            updated_at: now,
            ..self
        }
    }

    pub fn id(&self) -> &LineId {
        &self.id
    }

    pub fn name(&self) -> &LineName {
        &self.name
    }

    pub fn color(&self) -> &LineColor {
        &self.color
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_路線色は20文字を超えると拒否する() {
        assert!(LineColor::new("bg-red-600").is_ok());
        assert!(LineColor::new("x".repeat(21)).is_err());
    }

    #[test]
    fn test_with_nameは名前とupdated_atのみ変更する() {
        let line = Line::new(
            LineId::new(),
            LineName::new("2号線").unwrap(),
            LineColor::new("bg-green-600").unwrap(),
            fixed_now(),
        );
        let later = fixed_now() + chrono::Duration::hours(1);

        let renamed = line.clone().with_name(LineName::new("新2号線").unwrap(), later);

        assert_eq!(renamed.id(), line.id());
        assert_eq!(renamed.name().as_str(), "新2号線");
        assert_eq!(renamed.color(), line.color());
        assert_eq!(renamed.created_at(), fixed_now());
        assert_eq!(renamed.updated_at(), later);
    }

    #[test]
    fn test_with_colorは色のみ変更する() {
        let line = Line::new(
            LineId::new(),
            LineName::new("新盆唐線").unwrap(),
            LineColor::new("bg-red-600").unwrap(),
            fixed_now(),
        );

        let recolored = line
            .clone()
            .with_color(LineColor::new("bg-blue-600").unwrap(), fixed_now());

        assert_eq!(recolored.name(), line.name());
        assert_eq!(recolored.color().as_str(), "bg-blue-600");
    }
}
