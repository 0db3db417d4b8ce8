//! 인메모리 키-값 저장소.
//!
//! 프로세스 종료 시 사라진다. 모든 쓰기 호출을 기록하므로
//! 테스트에서 "키 X에 정확히 한 번 쓰기"를 검증할 수 있다.

use kwac_core::error::CoreError;
use kwac_core::ports::key_value_store::KeyValueStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// 기록된 쓰기 호출 (key, value)
pub type WriteRecord = (String, String);

/// 인메모리 저장소 — `KeyValueStore` 포트 구현
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    items: RwLock<HashMap<String, String>>,
    writes: RwLock<Vec<WriteRecord>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 값이 채워진 저장소 생성
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            items: RwLock::new(items),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// 지금까지의 `set_item` 호출 기록
    pub fn writes(&self) -> Vec<WriteRecord> {
        self.writes.read().clone()
    }

    /// 저장된 항목 수
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.writes
            .write()
            .push((key.to_string(), value.to_string()));
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        self.items.write().remove(key);
        Ok(())
    }
}
