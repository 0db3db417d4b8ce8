//! # kwac-storage
//!
//! 로컬 키-값 저장소 어댑터.
//! 브라우저 `localStorage`에 해당하는 문자열 저장소를 제공한다.
//!
//! ## 모듈
//! - `sqlite`: 파일 기반 저장소 (KeyValueStore 구현)
//! - `memory`: 인메모리 저장소 (테스트, 임시 실행용)
//! - `migration`: 스키마 마이그레이션

pub mod memory;
pub mod migration;
pub mod sqlite;
