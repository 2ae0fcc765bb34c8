//! 受け入れテスト用の共通ヘルパー
//!
//! モックリポジトリで `build_app` のルーターを組み立て、
//! HTTP リクエスト単位で API を操作する。

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use subway_api::app_builder::{AppDependencies, build_app};
use subway_domain::clock::FixedClock;
use subway_infra::mock::{
    MockLineRepository,
    MockSectionRepository,
    MockStationRepository,
    MockTransactionManager,
};
use tower::ServiceExt;
use uuid::Uuid;

/// テスト対象のアプリケーション
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let sections = MockSectionRepository::new();
        let deps = AppDependencies {
            station_repo: Arc::new(MockStationRepository::with_sections(sections.clone())),
            line_repo:    Arc::new(MockLineRepository::new()),
            section_repo: Arc::new(sections),
            tx_manager:   Arc::new(MockTransactionManager),
            clock:        Arc::new(FixedClock::new(Utc::now())),
        };
        Self {
            router: build_app(deps),
        }
    }

    /// リクエストを送信し、ステータスとボディ（JSON、空なら Null）を返す
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, json_body(response).await)
    }

    /// 駅を作成して ID を返す
    pub async fn create_station(&self, name: &str) -> Uuid {
        let (status, body) = self
            .send(
                Method::POST,
                "/stations",
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        data_id(&body)
    }

    /// 路線を最初の区間とともに作成して ID を返す
    pub async fn create_line(&self, name: &str, up: Uuid, down: Uuid, distance: i32) -> Uuid {
        let (status, body) = self
            .send(
                Method::POST,
                "/lines",
                Some(serde_json::json!({
                    "name": name,
                    "color": "bg-green-600",
                    "upStationId": up,
                    "downStationId": down,
                    "distance": distance,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        data_id(&body)
    }

    /// 区間を登録し、ステータスとボディを返す
    pub async fn register_section(
        &self,
        line_id: Uuid,
        up: Uuid,
        down: Uuid,
        distance: i32,
    ) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            &format!("/lines/{line_id}/sections"),
            Some(serde_json::json!({
                "upStationId": up,
                "downStationId": down,
                "distance": distance,
            })),
        )
        .await
    }
}

pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

pub fn data_id(body: &Value) -> Uuid {
    body["data"]["id"].as_str().unwrap().parse().unwrap()
}

pub fn parse<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}
