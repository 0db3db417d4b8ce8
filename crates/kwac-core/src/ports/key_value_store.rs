//! 로컬 키-값 저장소 포트.
//!
//! 구현: `kwac-storage` crate (rusqlite, 인메모리)

use crate::error::CoreError;

/// 문자열 키-값 저장소
///
/// 설정 화면은 이 좁은 인터페이스만 사용하므로 테스트에서 자유롭게 교체할 수 있다.
pub trait KeyValueStore: Send + Sync {
    /// 값 조회 (키가 없으면 `None`)
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// 값 저장 (기존 값 덮어쓰기)
    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// 값 삭제 (키가 없어도 성공)
    fn remove_item(&self, key: &str) -> Result<(), CoreError>;
}
