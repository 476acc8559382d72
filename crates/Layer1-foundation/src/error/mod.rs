//! Error types for EventCore
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// EventCore 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 레지스트리 관련
    // ========================================================================
    #[error("Event provider already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Event provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Event provider init failed: {class} - {message}")]
    ProviderInit { class: String, message: String },

    // ========================================================================
    // 핸들러 관련
    // ========================================================================
    #[error("Handler failed: {plugin}.{event} - {message}")]
    Handler {
        plugin: String,
        event: String,
        message: String,
    },

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::AlreadyRegistered(_)
                | Error::ProviderNotFound(_)
                | Error::InvalidInput(_)
        )
    }

    /// 핸들러 에러 생성 헬퍼
    pub fn handler(
        plugin: impl Into<String>,
        event: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Handler {
            plugin: plugin.into(),
            event: event.into(),
            message: message.into(),
        }
    }

    /// Provider 초기화 에러 생성 헬퍼
    pub fn provider_init(class: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ProviderInit {
            class: class.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// From 구현 (추가 변환)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}
