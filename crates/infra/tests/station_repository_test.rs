//! StationRepository / LineRepository 統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://localhost/subway cargo test -p subway-infra -- --ignored
//! ```

mod common;

use common::{insert_line, insert_station, test_now};
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use subway_domain::{
    line::{LineColor, LineName},
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

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_find_allは駅名順で返す(pool: PgPool) {
    // Arrange
    insert_station(&pool, "Yeoksam").await;
    insert_station(&pool, "Gangnam").await;
    let sut = PostgresStationRepository::new(pool.clone());

    // Act
    let stations = sut.find_all().await.unwrap();

    // Assert
    let names: Vec<_> = stations.iter().map(|s| s.name().as_str()).collect();
    assert_eq!(names, vec!["Gangnam", "Yeoksam"]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_重複した駅名の挿入はconflictになる(pool: PgPool) {
    // Arrange
    insert_station(&pool, "江南").await;
    let sut = PostgresStationRepository::new(pool.clone());
    let duplicate = Station::new(StationId::new(), StationName::new("江南").unwrap(), test_now());

    // Act
    let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
    let result = sut.insert(&mut tx, &duplicate).await;

    // Assert
    let err = result.unwrap_err();
    assert_eq!(err.as_conflict(), Some(("Station", "江南")));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_参照されていない駅は削除できる(pool: PgPool) {
    // Arrange
    let station = insert_station(&pool, "江南").await;
    let sut = PostgresStationRepository::new(pool.clone());

    // Act
    let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
    sut.delete(&mut tx, station.id()).await.unwrap();
    tx.commit().await.unwrap();

    // Assert
    assert!(sut.find_by_id(station.id()).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_路線の名前と色を更新できる(pool: PgPool) {
    // Arrange
    let line = insert_line(&pool, "2号線").await;
    let sut = PostgresLineRepository::new(pool.clone());
    let updated = line
        .with_name(LineName::new("新分堂線").unwrap(), test_now())
        .with_color(LineColor::new("bg-blue-600").unwrap(), test_now());

    // Act
    let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
    sut.update(&mut tx, &updated).await.unwrap();
    tx.commit().await.unwrap();

    // Assert
    let found = sut.find_by_id(updated.id()).await.unwrap().unwrap();
    assert_eq!(found.name().as_str(), "新分堂線");
    assert_eq!(found.color().as_str(), "bg-blue-600");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_重複した路線名への更新はconflictになる(pool: PgPool) {
    // Arrange
    insert_line(&pool, "2号線").await;
    let other = insert_line(&pool, "新分堂線").await;
    let sut = PostgresLineRepository::new(pool.clone());
    let renamed = other.with_name(LineName::new("2号線").unwrap(), test_now());

    // Act
    let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
    let result = sut.update(&mut tx, &renamed).await;

    // Assert
    assert!(result.unwrap_err().as_conflict().is_some());
}
