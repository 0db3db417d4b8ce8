//! 도메인 모델.

pub mod server_info;
pub mod settings;
