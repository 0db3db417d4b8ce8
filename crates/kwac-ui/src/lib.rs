//! # kwac-ui
//!
//! 설정 화면 UI 레이어.
//! 렌더링 엔진과 독립적인 뷰 트리를 만들고, 터미널용 텍스트 렌더러를 제공한다.
//!
//! ## 모듈
//! - `views`: 화면별 상태와 뷰 트리
//! - `render`: 뷰 트리 → 텍스트 변환

pub mod render;
pub mod views;
