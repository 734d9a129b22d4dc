//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// カタログに存在しないイベント名
    #[error("Evento desconhecido: '{event}'. Eventos disponíveis: {}", .available.join(", "))]
    UnknownEvent {
        event: String,
        available: Vec<String>,
    },

    #[error("Catálogo inválido: {0}")]
    InvalidCatalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
