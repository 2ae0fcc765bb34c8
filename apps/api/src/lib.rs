//! # Subway API サーバー
//!
//! 駅・路線・区間を管理する REST API。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - State の初期化とルーター構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - ビジネスロジック
//!
//! ## 依存関係
//!
//! - `subway_domain`: ドメインモデル、エラー定義
//! - `subway_infra`: データベース接続、リポジトリ
//! - `subway_shared`: レスポンス型、トレーシング初期化

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
