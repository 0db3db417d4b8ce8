//! # kwac-app
//!
//! CLI 서브커맨드 실행부. 바이너리(`kwac`)와 통합 테스트가 함께 사용한다.

pub mod commands;
