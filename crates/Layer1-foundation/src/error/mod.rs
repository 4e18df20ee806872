//! Error types for DsmDash
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// DsmDash 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 노드 프로세스 관련
    // ========================================================================
    #[error("Missing {0}")]
    Launch(String),

    #[error("Process error: {0}")]
    Process(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 백엔드 실행 실패 에러인지 확인 (세션은 열린 채 유지됨)
    pub fn is_launch(&self) -> bool {
        matches!(self, Error::Launch(_))
    }

    /// Launch 에러 생성 헬퍼
    pub fn launch(path: impl Into<String>) -> Self {
        Error::Launch(path.into())
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
