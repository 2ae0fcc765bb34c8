//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use subway_domain::{
    line::{Line, LineColor, LineId, LineName},
    section::{Distance, NewSection, Section, SectionId},
    station::{Station, StationId, StationName},
};
use subway_infra::{
    db::{PgTransactionManager, TransactionManager},
    repository::{
        LineRepository,
        PostgresLineRepository,
        PostgresStationRepository,
        StationRepository,
    },
};

/// テスト用の固定時刻
pub fn test_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-01-15T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// 駅を作成して DB に保存する
pub async fn insert_station(pool: &PgPool, name: &str) -> Station {
    let station = Station::new(StationId::new(), StationName::new(name).unwrap(), test_now());
    let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
    PostgresStationRepository::new(pool.clone())
        .insert(&mut tx, &station)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    station
}

/// 路線を作成して DB に保存する
pub async fn insert_line(pool: &PgPool, name: &str) -> Line {
    let line = Line::new(
        LineId::new(),
        LineName::new(name).unwrap(),
        LineColor::new("bg-red-600").unwrap(),
        test_now(),
    );
    let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
    PostgresLineRepository::new(pool.clone())
        .insert(&mut tx, &line)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    line
}

/// 区間エンティティを作成する（DB には保存しない）
pub fn new_section(line: &Line, up: &Station, down: &Station, distance: i32) -> Section {
    Section::new(NewSection {
        id:              SectionId::new(),
        line_id:         line.id().clone(),
        up_station_id:   up.id().clone(),
        down_station_id: down.id().clone(),
        distance:        Distance::new(distance).unwrap(),
        now:             test_now(),
    })
    .unwrap()
}
