//! HTTP 서버 정보 클라이언트.
//!
//! `ServerInfoClient` 포트 구현. 설정된 서버 URL에 GET 요청 한 번을 보내고
//! JSON 본문을 그대로 디코딩한다. 재시도는 하지 않는다.

use async_trait::async_trait;
use kwac_core::error::CoreError;
use kwac_core::models::server_info::ServerInfo;
use kwac_core::models::settings::Settings;
use kwac_core::ports::server_info::ServerInfoClient;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;

/// 서버 정보 조회 클라이언트 — `ServerInfoClient` 포트 구현
pub struct HttpServerInfoClient {
    client: reqwest::Client,
    send_credentials: bool,
}

impl HttpServerInfoClient {
    /// 새 HTTP 클라이언트 생성
    pub fn new(timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kwac/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            send_credentials: true,
        })
    }

    /// 기본 인증 헤더 전송 여부 설정
    pub fn with_credentials(mut self, send_credentials: bool) -> Self {
        self.send_credentials = send_credentials;
        self
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let url = resp.url().to_string();
        let text = resp.text().await.unwrap_or_else(|e| {
            tracing::warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });

        match status.as_u16() {
            401 | 403 => Err(CoreError::Auth(format!("인증 실패 ({status}): {text}"))),
            404 => Err(CoreError::NotFound {
                resource_type: "ServerInfo".to_string(),
                id: url,
            }),
            503 => Err(CoreError::ServiceUnavailable(text)),
            _ => Err(CoreError::Internal(format!("서버 에러 ({status}): {text}"))),
        }
    }
}

#[async_trait]
impl ServerInfoClient for HttpServerInfoClient {
    async fn fetch_server_info(&self, settings: &Settings) -> Result<ServerInfo, CoreError> {
        let url = settings.server.as_str();
        debug!("서버 정보 요청: {url}");

        let mut req = self.client.get(url).header(ACCEPT, "application/json");
        if self.send_credentials {
            req = req.basic_auth(&settings.username, Some(&settings.password));
        }

        let resp = req
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("서버 정보 요청 실패: {e}")))?;

        let resp = self.check_response(resp).await?;
        let body = resp
            .bytes()
            .await
            .map_err(|e| CoreError::Network(format!("응답 본문 수신 실패: {e}")))?;

        let value: serde_json::Value = serde_json::from_slice(&body)?;
        debug!("서버 정보 수신: {} bytes", body.len());
        Ok(ServerInfo::new(value))
    }
}
