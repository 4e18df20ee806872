//! # dsm-foundation
//!
//! Foundation layer for DsmDash:
//! - Error: 중앙 에러 타입 (Error, Result)
//! - Config: 모니터 설정 (MonitorConfig - 백엔드 경로, 재시작 정책, 테마)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  dsm-cli (TUI + clap)                       │
//! │        │                                    │
//! │        ▼                                    │
//! │  dsm-core (supervisor / protocol / state)   │
//! │        │                                    │
//! │        ▼                                    │
//! │  dsm-foundation (Error, MonitorConfig)      │
//! └─────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config
// ============================================================================
pub use config::{MonitorConfig, MonitorOverrides};
