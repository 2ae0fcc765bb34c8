//! 駅・路線 API の受け入れテスト

mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, parse};
use pretty_assertions::assert_eq;
use subway_api::handler::{LineDto, StationDto};
use subway_shared::{ApiResponse, HealthResponse};

#[tokio::test]
async fn test_ヘルスチェックはエンベロープなしで返る() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = parse(body);
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_駅の作成_一覧_削除() {
    // Given
    let app = TestApp::new();
    let yeoksam = app.create_station("Yeoksam").await;
    let gangnam = app.create_station("Gangnam").await;

    // When
    let (status, body) = app.send(Method::GET, "/stations", None).await;

    // Then: 駅名順
    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = parse::<ApiResponse<Vec<StationDto>>>(body)
        .data
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Gangnam", "Yeoksam"]);

    // When
    let (status, _) = app
        .send(Method::DELETE, &format!("/stations/{gangnam}"), None)
        .await;

    // Then
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = app.send(Method::GET, "/stations", None).await;
    let remaining = parse::<ApiResponse<Vec<StationDto>>>(body).data;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, yeoksam);
}

#[tokio::test]
async fn test_区間から参照されている駅は削除できず409() {
    // Given
    let app = TestApp::new();
    let gangnam = app.create_station("江南").await;
    let yeoksam = app.create_station("驛三").await;
    app.create_line("2号線", gangnam, yeoksam, 10).await;

    // When
    let (status, body) = app
        .send(Method::DELETE, &format!("/stations/{yeoksam}"), None)
        .await;

    // Then
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn test_路線を削除すると区間も消え駅を削除できるようになる() {
    // Given
    let app = TestApp::new();
    let gangnam = app.create_station("江南").await;
    let yeoksam = app.create_station("驛三").await;
    let line_id = app.create_line("2号線", gangnam, yeoksam, 10).await;

    // When
    let (status, _) = app
        .send(Method::DELETE, &format!("/lines/{line_id}"), None)
        .await;

    // Then
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app
        .send(Method::GET, &format!("/lines/{line_id}/sections"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .send(Method::DELETE, &format!("/stations/{yeoksam}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_路線一覧は各路線の区間を含む() {
    // Given
    let app = TestApp::new();
    let gangnam = app.create_station("江南").await;
    let yeoksam = app.create_station("驛三").await;
    let line_id = app.create_line("2号線", gangnam, yeoksam, 10).await;

    // When
    let (status, body) = app.send(Method::GET, "/lines", None).await;

    // Then
    assert_eq!(status, StatusCode::OK);
    let lines = parse::<ApiResponse<Vec<LineDto>>>(body).data;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].id, line_id);
    assert_eq!(lines[0].sections.len(), 1);
    assert_eq!(lines[0].sections[0].distance, 10);
}
