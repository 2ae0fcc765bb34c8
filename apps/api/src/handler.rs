//! # HTTP リクエストハンドラ
//!
//! ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲する。
//! 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供する。
//!
//! ```text
//! handler.rs
//! └── handler/
//!     ├── health.rs   # ヘルスチェック
//!     ├── line.rs     # 路線
//!     ├── section.rs  # 区間
//!     └── station.rs  # 駅
//! ```

pub mod health;
pub mod line;
pub mod section;
pub mod station;

pub use health::{ReadinessState, health_check, readiness_check};
pub use line::{
    CreateLineRequest,
    LineDto,
    LineState,
    UpdateLineRequest,
    create_line,
    delete_line,
    get_line,
    list_lines,
    update_line,
};
pub use section::{
    DeleteSectionQuery,
    RegisterSectionRequest,
    SectionDto,
    SectionState,
    delete_section,
    get_section,
    list_sections,
    register_section,
};
pub use station::{
    CreateStationRequest,
    StationDto,
    StationState,
    create_station,
    delete_station,
    get_station,
    list_stations,
};
