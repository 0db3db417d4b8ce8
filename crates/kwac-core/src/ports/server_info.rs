//! 서버 정보 조회 포트.
//!
//! 구현: `kwac-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::server_info::ServerInfo;
use crate::models::settings::Settings;

/// 설정된 서버에서 메타데이터를 가져오는 클라이언트
#[async_trait]
pub trait ServerInfoClient: Send + Sync {
    /// `settings.server` URL에 GET 요청 후 JSON 본문 디코딩
    async fn fetch_server_info(&self, settings: &Settings) -> Result<ServerInfo, CoreError>;
}
