//! # 区間ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /lines/{line_id}/sections` - 区間登録（冪等）
//! - `GET /lines/{line_id}/sections` - 区間一覧（作成順）
//! - `GET /lines/{line_id}/sections/{section_id}` - 区間取得
//! - `DELETE /lines/{line_id}/sections?stationId=` - 指定駅を下り駅とする区間を削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use subway_domain::{
    line::LineId,
    section::{Section, SectionId},
    station::StationId,
};
use subway_shared::ApiResponse;
use uuid::Uuid;

use crate::{
    error::ApiError,
    usecase::{RegisterSectionInput, SectionUseCaseImpl},
};

/// 区間 API の共有状態
pub struct SectionState {
    pub usecase: SectionUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 区間登録リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSectionRequest {
    pub up_station_id:   Uuid,
    pub down_station_id: Uuid,
    pub distance:        i32,
}

/// 区間削除のクエリパラメータ
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSectionQuery {
    pub station_id: Uuid,
}

/// 区間 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDto {
    pub id:              Uuid,
    pub line_id:         Uuid,
    pub up_station_id:   Uuid,
    pub down_station_id: Uuid,
    pub distance:        i32,
}

impl From<&Section> for SectionDto {
    fn from(section: &Section) -> Self {
        Self {
            id:              *section.id().as_uuid(),
            line_id:         *section.line_id().as_uuid(),
            up_station_id:   *section.up_station_id().as_uuid(),
            down_station_id: *section.down_station_id().as_uuid(),
            distance:        section.distance().as_i32(),
        }
    }
}

// --- ハンドラ ---

/// POST /lines/{line_id}/sections
///
/// 同じ上り駅・下り駅の組が既に登録されていれば、その区間を返す。
pub async fn register_section(
    State(state): State<Arc<SectionState>>,
    Path(line_id): Path<Uuid>,
    Json(req): Json<RegisterSectionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = RegisterSectionInput {
        line_id:         LineId::from_uuid(line_id),
        up_station_id:   StationId::from_uuid(req.up_station_id),
        down_station_id: StationId::from_uuid(req.down_station_id),
        distance:        req.distance,
    };
    let section = state.usecase.register_section(input).await?;

    let location = format!("/lines/{}/sections/{}", section.line_id(), section.id());
    let response = ApiResponse::new(SectionDto::from(&section));
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    ))
}

/// GET /lines/{line_id}/sections
pub async fn list_sections(
    State(state): State<Arc<SectionState>>,
    Path(line_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let sections = state
        .usecase
        .list_sections(&LineId::from_uuid(line_id))
        .await?;

    let items: Vec<SectionDto> = sections.iter().map(SectionDto::from).collect();
    Ok((StatusCode::OK, Json(ApiResponse::new(items))))
}

/// GET /lines/{line_id}/sections/{section_id}
pub async fn get_section(
    State(state): State<Arc<SectionState>>,
    Path((line_id, section_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let section = state
        .usecase
        .get_section(
            &LineId::from_uuid(line_id),
            &SectionId::from_uuid(section_id),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(SectionDto::from(&section))),
    ))
}

/// DELETE /lines/{line_id}/sections?stationId={station_id}
pub async fn delete_section(
    State(state): State<Arc<SectionState>>,
    Path(line_id): Path<Uuid>,
    Query(query): Query<DeleteSectionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .usecase
        .delete_section(
            &LineId::from_uuid(line_id),
            &StationId::from_uuid(query.station_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
