//! 애플리케이션 설정 구조체.
//!
//! HTTP 요청 타임아웃, 로컬 저장소 경로 등 런타임 설정을 정의한다.
//! 사용자가 설정 화면에서 편집하는 서버 연결 정보(`Settings`)와는 별개이며,
//! `ConfigManager`를 통해 JSON 파일로 로드/저장된다.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 기본 DB 파일 이름
pub const DB_FILE_NAME: &str = "kwac.db";

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP 클라이언트 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로컬 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP 클라이언트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 요청 시 기본 인증 헤더 전송 여부
    #[serde(default = "default_true")]
    pub send_credentials: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            send_credentials: true,
        }
    }
}

/// 로컬 키-값 저장소 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite DB 파일 경로 (None이면 플랫폼 기본 경로)
    pub db_path: Option<PathBuf>,
}

impl StorageConfig {
    /// DB 경로 결정 (설정값 또는 플랫폼별 기본 경로)
    ///
    /// # 플랫폼별 기본 경로:
    /// - macOS: `~/Library/Application Support/dev.kinto.kwac/kwac.db`
    /// - Windows: `%APPDATA%\kinto\kwac\data\kwac.db`
    /// - Linux: `~/.local/share/kwac/kwac.db`
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .or_else(|| {
                ProjectDirs::from("dev", "kinto", "kwac").map(|p| p.data_dir().join(DB_FILE_NAME))
            })
            .unwrap_or_else(|| PathBuf::from(".").join(DB_FILE_NAME))
    }
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        }
    }

    /// 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}

fn default_request_timeout_ms() -> u64 {
    10_000
}
