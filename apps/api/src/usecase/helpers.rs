//! ユースケース層の共通ヘルパー
//!
//! リポジトリ呼び出し結果の変換や区間入力の検証など、
//! 複数のユースケースで繰り返されるパターンを共通化する。

use subway_domain::{
    section::Distance,
    station::{Station, StationId},
};
use subway_infra::{InfraError, TransactionManager, TxContext, repository::StationRepository};

use crate::error::ApiError;

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, ApiError>` に変換する
///
/// ```ignore
/// let line = self.line_repo.find_by_id(&line_id).await.or_not_found("路線")?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `ApiError::NotFound`、`InfraError` の場合は `ApiError::Database` を返す
    fn or_not_found(self, entity_name: &str) -> Result<T, ApiError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
    fn or_not_found(self, entity_name: &str) -> Result<T, ApiError> {
        self?.ok_or_else(|| ApiError::NotFound(format!("{entity_name}が見つかりません")))
    }
}

/// 区間の入力値を検証し、距離の値オブジェクトを返す
///
/// 駅の存在確認より前に呼び出す。
pub(crate) fn validate_section_input(
    up_station_id: &StationId,
    down_station_id: &StationId,
    distance: i32,
) -> Result<Distance, ApiError> {
    let distance = Distance::new(distance)?;
    if up_station_id == down_station_id {
        return Err(ApiError::BadRequest(
            "上り駅と下り駅は異なる駅である必要があります".to_string(),
        ));
    }
    Ok(distance)
}

/// 上り駅・下り駅の両方が存在することを確認する
///
/// どちらかが存在しない場合は `ApiError::NotFound`（駅が見つかりません）を返す。
pub(crate) async fn find_both_stations(
    station_repo: &dyn StationRepository,
    up_station_id: &StationId,
    down_station_id: &StationId,
) -> Result<(Station, Station), ApiError> {
    let up = station_repo.find_by_id(up_station_id).await.or_not_found("駅")?;
    let down = station_repo
        .find_by_id(down_station_id)
        .await
        .or_not_found("駅")?;
    Ok((up, down))
}

/// トランザクションを開始する
pub(crate) async fn begin_tx(tx_manager: &dyn TransactionManager) -> Result<TxContext, ApiError> {
    tx_manager
        .begin()
        .await
        .map_err(|e| ApiError::Internal(format!("トランザクション開始に失敗: {e}")))
}

/// トランザクションをコミットする
pub(crate) async fn commit_tx(tx: TxContext) -> Result<(), ApiError> {
    tx.commit()
        .await
        .map_err(|e| ApiError::Internal(format!("トランザクションコミットに失敗: {e}")))
}
