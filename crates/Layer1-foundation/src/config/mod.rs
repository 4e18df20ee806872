//! Monitor Config - 통합 설정
//!
//! 글로벌 설정(~/.dsmdash/config.toml)과 프로젝트 설정(./dsmdash.toml)을
//! 병합해서 로드한다. 파일에 명시된 필드만 덮어쓰므로 프로젝트 파일이
//! 필드 하나만 적어도 글로벌 값은 유지된다. CLI 플래그가 마지막으로
//! 덮어쓴다.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 글로벌 설정 디렉토리명
pub const GLOBAL_CONFIG_DIR: &str = ".dsmdash";

/// 설정 파일명
pub const CONFIG_FILE: &str = "config.toml";

/// 프로젝트 설정 파일명
pub const PROJECT_CONFIG_FILE: &str = "dsmdash.toml";

/// DsmDash 모니터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MonitorConfig {
    /// DSM 노드 백엔드 바이너리 경로
    pub backend: PathBuf,

    /// 클러스터 설정 파일 경로 (백엔드에 그대로 전달됨)
    pub cluster_config: PathBuf,

    /// 노드 프로세스 종료 시 재시작 여부 (기본: 재시작 없음)
    pub restart: bool,

    /// TUI 테마 (dark / light)
    pub theme: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            backend: PathBuf::from("./build/dsm_headless"),
            cluster_config: PathBuf::from("cluster.txt"),
            restart: false,
            theme: "dark".to_string(),
        }
    }
}

/// 설정 파일 한 개에 실제로 적힌 필드들 (생략된 필드는 None)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MonitorOverrides {
    pub backend: Option<PathBuf>,
    pub cluster_config: Option<PathBuf>,
    pub restart: Option<bool>,
    pub theme: Option<String>,
}

impl MonitorOverrides {
    /// 특정 파일에서 부분 설정 로드
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&raw)?)
    }
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정
        if let Some(home) = dirs::home_dir() {
            let global = home.join(GLOBAL_CONFIG_DIR).join(CONFIG_FILE);
            if global.exists() {
                config.merge(MonitorOverrides::load_from(&global)?);
            }
        }

        // 2. 프로젝트 설정
        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.exists() {
            config.merge(MonitorOverrides::load_from(&project)?);
        }

        Ok(config)
    }

    /// 특정 파일 하나만 로드 (글로벌/프로젝트 병합 없이)
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::new();
        config.merge(MonitorOverrides::load_from(path)?);
        Ok(config)
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선, 적힌 필드만 덮어쓴다)
    pub fn merge(&mut self, other: MonitorOverrides) {
        if let Some(backend) = other.backend {
            self.backend = backend;
        }
        if let Some(cluster_config) = other.cluster_config {
            self.cluster_config = cluster_config;
        }
        if let Some(restart) = other.restart {
            self.restart = restart;
        }
        if let Some(theme) = other.theme {
            self.theme = theme;
        }
    }
}
