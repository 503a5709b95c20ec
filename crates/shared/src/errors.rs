use domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// アプリケーション全体で使用されるエラー型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    // ドメインエラー
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    // 入力エラー
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // システムエラー
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// エラーの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 呼び出し側の誤り
    Client,
    /// 一時的なエラー（読み直して再実行すれば成功しうる）
    Transient,
    /// サーバー側の誤り
    Server,
}

impl AppError {
    /// エラーコードを取得
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Domain(error) => match error {
                DomainError::GameNotFound(_) => "GAME_NOT_FOUND",
                DomainError::GameFinished(_) => "GAME_FINISHED",
                DomainError::GuessLengthInvalid { .. } => "GUESS_LENGTH_INVALID",
                DomainError::InvalidPeg(_) => "INVALID_PEG",
                DomainError::InvalidGameId(_) => "INVALID_GAME_ID",
                DomainError::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
                DomainError::Storage(_) => "STORAGE_ERROR",
                DomainError::InvalidEvent(_)
                | DomainError::EventSerialization(_)
                | DomainError::EventDeserialization(_) => "EVENT_ERROR",
            },
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Deserialization(_) => "INVALID_REQUEST",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// エラーの分類を取得
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Domain(error) => match error {
                DomainError::ConcurrentModification { .. } => ErrorCategory::Transient,
                DomainError::Storage(_)
                | DomainError::InvalidEvent(_)
                | DomainError::EventSerialization(_)
                | DomainError::EventDeserialization(_) => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            AppError::Validation(_) | AppError::Deserialization(_) => ErrorCategory::Client,
            AppError::Configuration(_) => ErrorCategory::Server,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Client
    }
}

/// 標準化されたエラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// エラーコード
    pub code: String,
    /// 呼び出し側向けのメッセージ
    pub message: String,
}

impl ErrorResponse {
    pub fn from_app_error(error: &AppError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: match error {
                AppError::Domain(inner) => inner.to_string(),
                other => other.to_string(),
            },
        }
    }
}
