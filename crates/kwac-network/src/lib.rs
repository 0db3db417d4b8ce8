//! # kwac-network
//!
//! HTTP 네트워크 어댑터.
//! 설정 저장 후 Kinto 서버 루트 엔드포인트에서 서버 정보를 조회한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use kwac_network::http_client::HttpServerInfoClient;
//!
//! let client = HttpServerInfoClient::new(Duration::from_secs(10))?;
//! let info = client.fetch_server_info(&settings).await?;
//! ```

pub mod http_client;
