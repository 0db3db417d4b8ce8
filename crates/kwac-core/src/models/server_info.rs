//! 서버 메타데이터 모델.
//!
//! 설정 저장 후 서버 루트 엔드포인트에서 받아온 JSON 문서.
//! 형태를 가정하지 않으며 저장되지 않는다.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 서버 정보 (디코딩된 JSON 값 그대로)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerInfo(serde_json::Value);

impl ServerInfo {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// 원본 JSON 값 참조
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// 들여쓰기된 JSON 문자열 (정보 패널 표시용)
    pub fn to_pretty_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

impl From<serde_json::Value> for ServerInfo {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
