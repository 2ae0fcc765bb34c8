//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。

use std::env;

use thiserror::Error;

/// バインドアドレスのデフォルト値
const DEFAULT_HOST: &str = "0.0.0.0";

/// ポート番号のデフォルト値
const DEFAULT_PORT: u16 = 8080;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が設定されていない
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が不正
    #[error("{name} の値が不正です: {value}")]
    Invalid {
        name:  &'static str,
        value: String,
    },
}

/// API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の値取得関数から設定を組み立てる
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("SUBWAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("SUBWAY_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "SUBWAY_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            host,
            port,
            database_url,
        })
    }
}
