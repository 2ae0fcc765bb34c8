//! # 路線ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /lines` - 路線作成（最初の区間を含む）
//! - `GET /lines` - 路線一覧
//! - `GET /lines/{line_id}` - 路線取得
//! - `PATCH /lines/{line_id}` - 路線名・色の更新
//! - `DELETE /lines/{line_id}` - 路線削除（区間も削除）

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use subway_domain::{line::LineId, station::StationId};
use subway_shared::ApiResponse;
use uuid::Uuid;

use super::section::SectionDto;
use crate::{
    error::ApiError,
    usecase::{CreateLineInput, LineUseCaseImpl, LineWithSections, UpdateLineInput},
};

/// 路線 API の共有状態
pub struct LineState {
    pub usecase: LineUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 路線作成リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineRequest {
    pub name:            String,
    pub color:           String,
    pub up_station_id:   Uuid,
    pub down_station_id: Uuid,
    pub distance:        i32,
}

/// 路線更新リクエスト
///
/// 省略したフィールドは変更しない。
#[derive(Debug, Deserialize)]
pub struct UpdateLineRequest {
    pub name:  Option<String>,
    pub color: Option<String>,
}

/// 路線 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDto {
    pub id:       Uuid,
    pub name:     String,
    pub color:    String,
    pub sections: Vec<SectionDto>,
}

impl From<&LineWithSections> for LineDto {
    fn from(value: &LineWithSections) -> Self {
        Self {
            id:       *value.line.id().as_uuid(),
            name:     value.line.name().to_string(),
            color:    value.line.color().to_string(),
            sections: value.sections.iter().map(SectionDto::from).collect(),
        }
    }
}

// --- ハンドラ ---

/// POST /lines
pub async fn create_line(
    State(state): State<Arc<LineState>>,
    Json(req): Json<CreateLineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateLineInput {
        name:            req.name,
        color:           req.color,
        up_station_id:   StationId::from_uuid(req.up_station_id),
        down_station_id: StationId::from_uuid(req.down_station_id),
        distance:        req.distance,
    };
    let created = state.usecase.create_line(input).await?;

    let location = format!("/lines/{}", created.line.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::new(LineDto::from(&created))),
    ))
}

/// GET /lines
pub async fn list_lines(
    State(state): State<Arc<LineState>>,
) -> Result<impl IntoResponse, ApiError> {
    let lines = state.usecase.list_lines().await?;

    let items: Vec<LineDto> = lines.iter().map(LineDto::from).collect();
    Ok((StatusCode::OK, Json(ApiResponse::new(items))))
}

/// GET /lines/{line_id}
pub async fn get_line(
    State(state): State<Arc<LineState>>,
    Path(line_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let line = state.usecase.get_line(&LineId::from_uuid(line_id)).await?;

    Ok((StatusCode::OK, Json(ApiResponse::new(LineDto::from(&line)))))
}

/// PATCH /lines/{line_id}
pub async fn update_line(
    State(state): State<Arc<LineState>>,
    Path(line_id): Path<Uuid>,
    Json(req): Json<UpdateLineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = UpdateLineInput {
        line_id: LineId::from_uuid(line_id),
        name:    req.name,
        color:   req.color,
    };
    let updated = state.usecase.update_line(input).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(LineDto::from(&updated))),
    ))
}

/// DELETE /lines/{line_id}
pub async fn delete_line(
    State(state): State<Arc<LineState>>,
    Path(line_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .usecase
        .delete_line(&LineId::from_uuid(line_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
        routing::get,
    };
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use subway_domain::{
        clock::FixedClock,
        station::{Station, StationName},
    };
    use subway_infra::mock::{
        MockLineRepository,
        MockSectionRepository,
        MockStationRepository,
        MockTransactionManager,
    };
    use tower::ServiceExt;

    use super::*;

    struct TestApp {
        router:   Router,
        gangnam:  Uuid,
        yeoksam:  Uuid,
        sections: MockSectionRepository,
    }

    fn create_test_app() -> TestApp {
        let now = Utc::now();
        let stations = MockStationRepository::new();
        let sections = MockSectionRepository::new();

        let gangnam = Station::new(StationId::new(), StationName::new("江南").unwrap(), now);
        let yeoksam = Station::new(StationId::new(), StationName::new("驛三").unwrap(), now);
        stations.add_station(gangnam.clone());
        stations.add_station(yeoksam.clone());

        let usecase = LineUseCaseImpl::new(
            Arc::new(MockLineRepository::new()),
            Arc::new(stations),
            Arc::new(sections.clone()),
            Arc::new(MockTransactionManager),
            Arc::new(FixedClock::new(now)),
        );
        let state = Arc::new(LineState { usecase });

        let router = Router::new()
            .route("/lines", get(list_lines).post(create_line))
            .route(
                "/lines/{line_id}",
                get(get_line).patch(update_line).delete(delete_line),
            )
            .with_state(state);

        TestApp {
            router,
            gangnam: *gangnam.id().as_uuid(),
            yeoksam: *yeoksam.id().as_uuid(),
            sections,
        }
    }

    fn json_request(method: Method, uri: String, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    fn post_line(app: &TestApp, name: &str) -> Request<Body> {
        json_request(
            Method::POST,
            "/lines".to_string(),
            serde_json::json!({
                "name": name,
                "color": "bg-green-600",
                "upStationId": app.gangnam,
                "downStationId": app.yeoksam,
                "distance": 10,
            }),
        )
    }

    async fn response_body<T: serde::de::DeserializeOwned>(
        response: axum::response::Response,
    ) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_post_lines正常系_最初の区間を含む路線が返る() {
        // Given
        let app = create_test_app();

        // When
        let response = app.router.clone().oneshot(post_line(&app, "2号線")).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: ApiResponse<LineDto> = response_body(response).await;
        assert_eq!(body.data.name, "2号線");
        assert_eq!(body.data.color, "bg-green-600");
        assert_eq!(body.data.sections.len(), 1);
        assert_eq!(body.data.sections[0].up_station_id, app.gangnam);
        assert_eq!(body.data.sections[0].down_station_id, app.yeoksam);
        assert_eq!(body.data.sections[0].line_id, body.data.id);
    }

    #[tokio::test]
    async fn test_post_lines同名の路線で409が返る() {
        // Given
        let app = create_test_app();
        app.router.clone().oneshot(post_line(&app, "2号線")).await.unwrap();

        // When
        let response = app.router.clone().oneshot(post_line(&app, "2号線")).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: subway_shared::ErrorResponse = response_body(response).await;
        assert_eq!(body.status, 409);
    }

    #[tokio::test]
    async fn test_patch_line正常系_指定したフィールドだけ更新される() {
        // Given
        let app = create_test_app();
        let created = app.router.clone().oneshot(post_line(&app, "2号線")).await.unwrap();
        let created: ApiResponse<LineDto> = response_body(created).await;

        // When
        let response = app
            .router
            .clone()
            .oneshot(json_request(
                Method::PATCH,
                format!("/lines/{}", created.data.id),
                serde_json::json!({ "color": "bg-blue-600" }),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: ApiResponse<LineDto> = response_body(response).await;
        assert_eq!(body.data.name, "2号線");
        assert_eq!(body.data.color, "bg-blue-600");
        assert_eq!(body.data.sections, created.data.sections);
    }

    #[tokio::test]
    async fn test_delete_line正常系_204が返り区間も消える() {
        // Given
        let app = create_test_app();
        let created = app.router.clone().oneshot(post_line(&app, "2号線")).await.unwrap();
        let created: ApiResponse<LineDto> = response_body(created).await;
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/lines/{}", created.data.id))
            .body(Body::empty())
            .unwrap();

        // When
        let response = app.router.clone().oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(app.sections.count(), 0);
        let fetched = app
            .router
            .oneshot(
                Request::builder()
                    .uri(format!("/lines/{}", created.data.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
    }
}
