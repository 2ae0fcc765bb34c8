//! # アプリケーション構築
//!
//! ユースケース・State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, routing::get};
use subway_domain::clock::Clock;
use subway_infra::{
    TransactionManager,
    repository::{LineRepository, SectionRepository, StationRepository},
};

use crate::{
    handler::{
        LineState,
        SectionState,
        StationState,
        create_line,
        create_station,
        delete_line,
        delete_section,
        delete_station,
        get_line,
        get_section,
        get_station,
        health_check,
        list_lines,
        list_sections,
        list_stations,
        register_section,
        update_line,
    },
    usecase::{LineUseCaseImpl, SectionUseCaseImpl, StationUseCaseImpl},
};

/// ルーター構築に必要な依存
///
/// 本番では Postgres 実装、テストではモック実装を渡す。
#[derive(Clone)]
pub struct AppDependencies {
    pub station_repo: Arc<dyn StationRepository>,
    pub line_repo:    Arc<dyn LineRepository>,
    pub section_repo: Arc<dyn SectionRepository>,
    pub tx_manager:   Arc<dyn TransactionManager>,
    pub clock:        Arc<dyn Clock>,
}

/// State の構築とルーター定義を行う
///
/// `/health/ready` は DB 接続プールを必要とするため含めない（`main.rs` で追加する）。
pub fn build_app(deps: AppDependencies) -> Router {
    let station_state = Arc::new(StationState {
        usecase: StationUseCaseImpl::new(
            deps.station_repo.clone(),
            deps.section_repo.clone(),
            deps.tx_manager.clone(),
            deps.clock.clone(),
        ),
    });

    let line_state = Arc::new(LineState {
        usecase: LineUseCaseImpl::new(
            deps.line_repo.clone(),
            deps.station_repo.clone(),
            deps.section_repo.clone(),
            deps.tx_manager.clone(),
            deps.clock.clone(),
        ),
    });

    let section_state = Arc::new(SectionState {
        usecase: SectionUseCaseImpl::new(
            deps.line_repo,
            deps.station_repo,
            deps.section_repo,
            deps.tx_manager,
            deps.clock,
        ),
    });

    Router::new()
        .route("/health", get(health_check))
        // 駅 API
        .route("/stations", get(list_stations).post(create_station))
        .route(
            "/stations/{station_id}",
            get(get_station).delete(delete_station),
        )
        .with_state(station_state)
        // 路線 API
        .route("/lines", get(list_lines).post(create_line))
        .route(
            "/lines/{line_id}",
            get(get_line).patch(update_line).delete(delete_line),
        )
        .with_state(line_state)
        // 区間 API
        .route(
            "/lines/{line_id}/sections",
            get(list_sections)
                .post(register_section)
                .delete(delete_section),
        )
        .route("/lines/{line_id}/sections/{section_id}", get(get_section))
        .with_state(section_state)
}
