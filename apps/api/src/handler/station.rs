//! # 駅ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /stations` - 駅作成
//! - `GET /stations` - 駅一覧（駅名順）
//! - `GET /stations/{station_id}` - 駅取得
//! - `DELETE /stations/{station_id}` - 駅削除（区間から参照されていれば 409）

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use subway_domain::station::{Station, StationId};
use subway_shared::ApiResponse;
use uuid::Uuid;

use crate::{error::ApiError, usecase::StationUseCaseImpl};

/// 駅 API の共有状態
pub struct StationState {
    pub usecase: StationUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 駅作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateStationRequest {
    pub name: String,
}

/// 駅 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDto {
    pub id:   Uuid,
    pub name: String,
}

impl From<&Station> for StationDto {
    fn from(station: &Station) -> Self {
        Self {
            id:   *station.id().as_uuid(),
            name: station.name().to_string(),
        }
    }
}

// --- ハンドラ ---

/// POST /stations
pub async fn create_station(
    State(state): State<Arc<StationState>>,
    Json(req): Json<CreateStationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let station = state.usecase.create_station(req.name).await?;

    let location = format!("/stations/{}", station.id());
    let response = ApiResponse::new(StationDto::from(&station));
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    ))
}

/// GET /stations
pub async fn list_stations(
    State(state): State<Arc<StationState>>,
) -> Result<impl IntoResponse, ApiError> {
    let stations = state.usecase.list_stations().await?;

    let items: Vec<StationDto> = stations.iter().map(StationDto::from).collect();
    Ok((StatusCode::OK, Json(ApiResponse::new(items))))
}

/// GET /stations/{station_id}
pub async fn get_station(
    State(state): State<Arc<StationState>>,
    Path(station_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let station = state
        .usecase
        .get_station(&StationId::from_uuid(station_id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(StationDto::from(&station))),
    ))
}

/// DELETE /stations/{station_id}
pub async fn delete_station(
    State(state): State<Arc<StationState>>,
    Path(station_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .usecase
        .delete_station(&StationId::from_uuid(station_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
