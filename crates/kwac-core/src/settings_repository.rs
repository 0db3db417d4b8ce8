//! 설정 저장소.
//!
//! `KeyValueStore` 포트 위에서 `Settings`를 `"kwac_settings"` 키 하나로 읽고 쓴다.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::models::settings::Settings;
use crate::ports::key_value_store::KeyValueStore;

/// 설정이 저장되는 키
pub const SETTINGS_KEY: &str = "kwac_settings";

/// 설정 저장소 — 키-값 저장소 래퍼
#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// 저장된 설정 로드
    ///
    /// 키가 없거나, 읽기에 실패하거나, JSON 파싱에 실패하면 기본 설정을 반환한다.
    pub fn load(&self) -> Settings {
        let raw = match self.store.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("저장된 설정 없음, 기본값 사용");
                return Settings::default();
            }
            Err(e) => {
                warn!("설정 읽기 실패, 기본값 사용: {e}");
                return Settings::default();
            }
        };

        match Settings::from_json(&raw) {
            Ok(settings) => {
                debug!("저장된 설정 로드: server={}", settings.server);
                settings
            }
            Err(e) => {
                warn!("저장된 설정 파싱 실패, 기본값 사용: {e}");
                Settings::default()
            }
        }
    }

    /// 설정 저장 (단일 쓰기)
    pub fn save(&self, settings: &Settings) -> Result<(), CoreError> {
        let json = settings.to_json()?;
        self.store.set_item(SETTINGS_KEY, &json)?;
        debug!("설정 저장 완료: server={}", settings.server);
        Ok(())
    }

    /// 저장된 설정 삭제 (다음 로드 시 기본값)
    pub fn clear(&self) -> Result<(), CoreError> {
        self.store.remove_item(SETTINGS_KEY)?;
        debug!("저장된 설정 삭제");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// 테스트용 저장소 — 쓰기 횟수 기록, 실패 주입 가능
    #[derive(Default)]
    struct FakeStore {
        items: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<(String, String)>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl KeyValueStore for FakeStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
            if self.fail_reads {
                return Err(CoreError::Storage("read failed".to_string()));
            }
            Ok(self.items.lock().get(key).cloned())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
            if self.fail_writes {
                return Err(CoreError::Storage("write failed".to_string()));
            }
            self.writes.lock().push((key.to_string(), value.to_string()));
            self.items.lock().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove_item(&self, key: &str) -> Result<(), CoreError> {
            self.items.lock().remove(key);
            Ok(())
        }
    }

    fn repo_with(store: FakeStore) -> (SettingsRepository, Arc<FakeStore>) {
        let store = Arc::new(store);
        (SettingsRepository::new(store.clone()), store)
    }

    #[test]
    fn load_defaults_when_empty() {
        let (repo, _) = repo_with(FakeStore::default());
        assert_eq!(repo.load(), Settings::default());
    }

    #[test]
    fn load_defaults_when_malformed() {
        let store = FakeStore::default();
        store
            .items
            .lock()
            .insert(SETTINGS_KEY.to_string(), "{not json".to_string());
        let (repo, _) = repo_with(store);
        assert_eq!(repo.load(), Settings::default());
    }

    #[test]
    fn load_defaults_when_read_fails() {
        let (repo, _) = repo_with(FakeStore {
            fail_reads: true,
            ..Default::default()
        });
        assert_eq!(repo.load(), Settings::default());
    }

    #[test]
    fn save_writes_once_under_settings_key() {
        let (repo, store) = repo_with(FakeStore::default());
        let settings = Settings {
            server: "http://other.server/v1".to_string(),
            bucket: "otherBucket".to_string(),
            username: "newUsername".to_string(),
            password: "newPassword".to_string(),
        };

        repo.save(&settings).unwrap();

        let writes = store.writes.lock();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, "kwac_settings");
        let stored: serde_json::Value = serde_json::from_str(&writes[0].1).unwrap();
        assert_eq!(
            stored,
            serde_json::json!({
                "server": "http://other.server/v1",
                "username": "newUsername",
                "password": "newPassword",
                "bucket": "otherBucket",
            })
        );
        drop(writes);
        assert_eq!(repo.load(), settings);
    }

    #[test]
    fn save_propagates_write_failure() {
        let (repo, _) = repo_with(FakeStore {
            fail_writes: true,
            ..Default::default()
        });
        let result = repo.save(&Settings::default());
        assert!(matches!(result, Err(CoreError::Storage(_))));
    }

    #[test]
    fn clear_restores_defaults() {
        let (repo, _) = repo_with(FakeStore::default());
        let mut settings = Settings::default();
        settings.bucket = "mine".to_string();
        repo.save(&settings).unwrap();
        assert_eq!(repo.load().bucket, "mine");

        repo.clear().unwrap();
        assert_eq!(repo.load(), Settings::default());
    }
}
