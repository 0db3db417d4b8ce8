//! 서버 연결 설정 모델.
//!
//! 설정 화면 폼이 편집하는 4개 필드(server, bucket, username, password).
//! 저장소에는 JSON 문자열로 통째로 저장되며, 누락된 필드는 기본값으로 채운다.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 기본 서버 URL
pub const DEFAULT_SERVER: &str = "https://kinto.dev.mozaws.net/v1";

/// 기본 버킷
pub const DEFAULT_BUCKET: &str = "default";

/// 기본 사용자명
pub const DEFAULT_USERNAME: &str = "user";

/// 기본 비밀번호
pub const DEFAULT_PASSWORD: &str = "pass";

/// 서버 연결 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Kinto 서버 URL
    #[serde(default = "default_server")]
    pub server: String,
    /// 버킷 이름
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// 사용자명
    #[serde(default = "default_username")]
    pub username: String,
    /// 비밀번호
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: default_server(),
            bucket: default_bucket(),
            username: default_username(),
            password: default_password(),
        }
    }
}

impl Settings {
    /// 필드 값 조회
    pub fn get(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::Server => &self.server,
            SettingsField::Bucket => &self.bucket,
            SettingsField::Username => &self.username,
            SettingsField::Password => &self.password,
        }
    }

    /// 필드 값 변경
    pub fn set(&mut self, field: SettingsField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SettingsField::Server => self.server = value,
            SettingsField::Bucket => self.bucket = value,
            SettingsField::Username => self.username = value,
            SettingsField::Password => self.password = value,
        }
    }

    /// 저장 전 유효성 검증
    ///
    /// - `server`: 앞뒤 공백 없는 http/https 절대 URL
    /// - `bucket`: 공백이 아닌 문자열
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.server.trim() != self.server {
            return Err(CoreError::validation(
                SettingsField::Server.key(),
                "URL 앞뒤에 공백이 있습니다",
            ));
        }

        let parsed = url::Url::parse(&self.server).map_err(|e| {
            CoreError::validation(SettingsField::Server.key(), format!("URL 파싱 실패: {e}"))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CoreError::validation(
                SettingsField::Server.key(),
                format!("지원하지 않는 스킴: {}", parsed.scheme()),
            ));
        }

        if self.bucket.trim().is_empty() {
            return Err(CoreError::validation(
                SettingsField::Bucket.key(),
                "버킷 이름이 비어 있습니다",
            ));
        }

        Ok(())
    }

    /// 저장용 JSON 문자열로 직렬화
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// 저장된 JSON 문자열에서 역직렬화 (누락 필드는 기본값)
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// 설정 필드 식별자 — 폼 표시 순서를 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    Server,
    Bucket,
    Username,
    Password,
}

impl SettingsField {
    /// 폼 표시 순서
    pub const ALL: [SettingsField; 4] = [
        SettingsField::Server,
        SettingsField::Bucket,
        SettingsField::Username,
        SettingsField::Password,
    ];

    /// JSON 키
    pub fn key(self) -> &'static str {
        match self {
            SettingsField::Server => "server",
            SettingsField::Bucket => "bucket",
            SettingsField::Username => "username",
            SettingsField::Password => "password",
        }
    }

    /// 폼 라벨
    pub fn label(self) -> &'static str {
        match self {
            SettingsField::Server => "Server URL",
            SettingsField::Bucket => "Bucket",
            SettingsField::Username => "Username",
            SettingsField::Password => "Password",
        }
    }

    /// 키 문자열로 필드 조회
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}
