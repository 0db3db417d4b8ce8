//! 설정 화면 뷰.
//!
//! 마운트 시 저장소에서 설정을 읽어 폼을 채우고, 제출 시 저장 후 서버 정보를 조회한다.
//! 저장과 조회는 명시적인 두 단계 상태 전이로 분리되어 있다.
//!
//! ```text
//! Idle ──save()──▶ Saved ──load_server_info()──▶ InfoLoaded
//!   ▲                ▲                                │
//!   └─ (mount)       └────────── save() ──────────────┘
//! ```

use kwac_core::error::CoreError;
use kwac_core::models::server_info::ServerInfo;
use kwac_core::models::settings::{Settings, SettingsField};
use kwac_core::ports::server_info::ServerInfoClient;
use kwac_core::settings_repository::SettingsRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::page::{FormView, InputView, PageView, ServerInfoPanel, FORM_CLASS, SERVER_INFO_CLASS};

/// 페이지 제목
pub const PAGE_TITLE: &str = "Settings";

/// 설정 화면 상태
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// 마운트 직후, 아직 제출 전
    Idle,
    /// 설정 저장 완료, 서버 정보 미수신
    Saved,
    /// 서버 정보 수신 완료
    InfoLoaded(ServerInfo),
}

/// 편집 중인 폼 값
///
/// 입력 변경은 저장소에 반영되지 않으며 제출 시에만 저장된다.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    values: Settings,
}

impl SettingsForm {
    pub fn new(values: Settings) -> Self {
        Self { values }
    }

    /// 현재 입력 값
    pub fn values(&self) -> &Settings {
        &self.values
    }

    /// 필드 값 변경 (서버 URL은 앞뒤 공백 제거)
    pub fn change(&mut self, field: SettingsField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SettingsField::Server => self.values.set(field, value.trim()),
            _ => self.values.set(field, value),
        }
    }

    /// 표시 순서 인덱스로 입력 값 변경
    pub fn change_input(&mut self, index: usize, value: impl Into<String>) -> Result<(), CoreError> {
        let field = SettingsField::ALL.get(index).copied().ok_or_else(|| {
            CoreError::validation(
                "input",
                format!("입력 인덱스 범위 초과: {index} (필드 {}개)", SettingsField::ALL.len()),
            )
        })?;
        self.change(field, value);
        Ok(())
    }

    /// 입력 필드 뷰 (표시 순서)
    pub fn inputs(&self) -> Vec<InputView> {
        SettingsField::ALL
            .iter()
            .map(|field| InputView {
                id: format!("root_{}", field.key()),
                name: field.key(),
                label: field.label(),
                input_type: "text",
                value: self.values.get(*field).to_string(),
            })
            .collect()
    }
}

/// 설정 화면
pub struct SettingsPage {
    repository: SettingsRepository,
    client: Arc<dyn ServerInfoClient>,
    /// 마지막으로 로드/저장된 설정
    settings: Settings,
    form: SettingsForm,
    state: ViewState,
}

impl SettingsPage {
    /// 화면 마운트 — 저장된 설정(없으면 기본값)으로 폼을 채운다.
    pub fn mount(repository: SettingsRepository, client: Arc<dyn ServerInfoClient>) -> Self {
        let settings = repository.load();
        debug!("설정 화면 마운트: server={}", settings.server);

        Self {
            repository,
            client,
            form: SettingsForm::new(settings.clone()),
            settings,
            state: ViewState::Idle,
        }
    }

    /// 마지막으로 로드/저장된 설정
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn form(&self) -> &SettingsForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SettingsForm {
        &mut self.form
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// 수신된 서버 정보
    pub fn server_info(&self) -> Option<&ServerInfo> {
        match &self.state {
            ViewState::InfoLoaded(info) => Some(info),
            _ => None,
        }
    }

    /// 1단계: 폼 값 검증 후 저장 (→ Saved)
    ///
    /// 이전 서버 정보는 폐기된다. 검증 또는 저장 실패 시 상태는 그대로 유지된다.
    pub fn save(&mut self) -> Result<&Settings, CoreError> {
        let settings = self.form.values().clone();
        settings.validate()?;
        self.repository.save(&settings)?;

        info!("설정 저장: server={}, bucket={}", settings.server, settings.bucket);
        self.settings = settings;
        self.state = ViewState::Saved;
        Ok(&self.settings)
    }

    /// 2단계: 저장된 서버에서 정보 조회 (Saved → InfoLoaded)
    ///
    /// 조회 실패 시 상태는 `Saved`로 남고 에러를 반환한다.
    pub async fn load_server_info(&mut self) -> Result<(), CoreError> {
        if self.state == ViewState::Idle {
            return Err(CoreError::Internal(
                "설정 저장 전에는 서버 정보를 조회할 수 없습니다".to_string(),
            ));
        }

        let info = match self.client.fetch_server_info(&self.settings).await {
            Ok(info) => info,
            Err(e) => {
                warn!("서버 정보 조회 실패 ({}): {e}", self.settings.server);
                self.state = ViewState::Saved;
                return Err(e);
            }
        };

        debug!("서버 정보 수신 완료: {}", self.settings.server);
        self.state = ViewState::InfoLoaded(info);
        Ok(())
    }

    /// 폼 제출 — 저장 후 서버 정보 조회
    pub async fn submit(&mut self) -> Result<(), CoreError> {
        self.save()?;
        self.load_server_info().await
    }

    /// 현재 상태의 뷰 트리
    pub fn render(&self) -> PageView {
        let server_info = self.server_info().map(|info| ServerInfoPanel {
            class_name: SERVER_INFO_CLASS,
            heading: "Server information",
            pre: info
                .to_pretty_json()
                .unwrap_or_else(|_| info.as_value().to_string()),
        });

        PageView {
            title: PAGE_TITLE.to_string(),
            form: FormView {
                class_name: FORM_CLASS,
                inputs: self.form.inputs(),
                submit_label: "Submit",
            },
            server_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use kwac_core::settings_repository::SETTINGS_KEY;
    use kwac_storage::memory::MemoryKeyValueStore;
    use parking_lot::Mutex;
    use serde_json::json;

    /// 고정 응답을 돌려주는 클라이언트 — 요청된 서버 URL 기록
    struct StubClient {
        response: serde_json::Value,
        requested: Mutex<Vec<String>>,
    }

    impl StubClient {
        fn new(response: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                response,
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ServerInfoClient for StubClient {
        async fn fetch_server_info(&self, settings: &Settings) -> Result<ServerInfo, CoreError> {
            self.requested.lock().push(settings.server.clone());
            Ok(ServerInfo::new(self.response.clone()))
        }
    }

    struct FailingClient;

    #[async_trait]
    impl ServerInfoClient for FailingClient {
        async fn fetch_server_info(&self, _settings: &Settings) -> Result<ServerInfo, CoreError> {
            Err(CoreError::Network("connection refused".to_string()))
        }
    }

    fn mount_with(
        store: Arc<MemoryKeyValueStore>,
        client: Arc<dyn ServerInfoClient>,
    ) -> SettingsPage {
        SettingsPage::mount(SettingsRepository::new(store), client)
    }

    fn empty_store() -> Arc<MemoryKeyValueStore> {
        Arc::new(MemoryKeyValueStore::new())
    }

    fn edited_values() -> [&'static str; 4] {
        [
            "http://other.server/v1",
            "otherBucket",
            "newUsername",
            "newPassword",
        ]
    }

    #[test]
    fn renders_page_title_and_form() {
        let page = mount_with(empty_store(), StubClient::new(json!({})));
        let view = page.render();
        assert_eq!(view.title, "Settings");
        assert_eq!(view.form.class_name, "rjsf");
        assert!(view.form.inputs.iter().all(|i| i.input_type == "text"));
    }

    #[test]
    fn fills_form_with_default_settings() {
        let page = mount_with(empty_store(), StubClient::new(json!({})));
        assert_eq!(
            page.render().input_values(),
            vec!["https://kinto.dev.mozaws.net/v1", "default", "user", "pass"]
        );
        assert_eq!(page.state(), &ViewState::Idle);
    }

    #[test]
    fn fills_form_with_stored_settings() {
        let store = Arc::new(MemoryKeyValueStore::with_items([(
            SETTINGS_KEY,
            r#"{"server":"http://stored/v1","bucket":"b","username":"u","password":"p"}"#,
        )]));
        let page = mount_with(store, StubClient::new(json!({})));
        assert_eq!(
            page.render().input_values(),
            vec!["http://stored/v1", "b", "u", "p"]
        );
    }

    #[test]
    fn malformed_stored_settings_fall_back_to_defaults() {
        let store = Arc::new(MemoryKeyValueStore::with_items([(SETTINGS_KEY, "][")]));
        let page = mount_with(store, StubClient::new(json!({})));
        assert_eq!(page.settings(), &Settings::default());
    }

    #[test]
    fn changing_inputs_does_not_touch_storage() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut page = mount_with(store.clone(), StubClient::new(json!({})));

        page.form_mut().change(SettingsField::Bucket, "otherBucket");
        assert_eq!(page.render().form.inputs[1].value, "otherBucket");
        assert!(store.writes().is_empty());
        assert_eq!(page.settings().bucket, "default");
    }

    #[test]
    fn change_input_rejects_out_of_range_index() {
        let mut form = SettingsForm::new(Settings::default());
        assert_matches!(form.change_input(4, "x"), Err(CoreError::Validation { .. }));
    }

    #[tokio::test]
    async fn saves_settings_with_single_write() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut page = mount_with(store.clone(), StubClient::new(json!({"a": 1})));

        for (index, value) in edited_values().iter().enumerate() {
            page.form_mut().change_input(index, *value).unwrap();
        }
        page.submit().await.unwrap();

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, "kwac_settings");
        let stored: serde_json::Value = serde_json::from_str(&writes[0].1).unwrap();
        assert_eq!(
            stored,
            json!({
                "server": "http://other.server/v1",
                "username": "newUsername",
                "password": "newPassword",
                "bucket": "otherBucket",
            })
        );
    }

    #[test]
    fn no_server_info_initially() {
        let page = mount_with(empty_store(), StubClient::new(json!({"a": 1})));
        assert!(!page.render().has_server_info());
        assert!(page.server_info().is_none());
    }

    #[tokio::test]
    async fn renders_server_info_once_saved_and_fetched() {
        let client = StubClient::new(json!({"a": 1}));
        let mut page = mount_with(empty_store(), client.clone());

        page.save().unwrap();
        assert_eq!(page.state(), &ViewState::Saved);
        assert!(!page.render().has_server_info());

        page.load_server_info().await.unwrap();
        let view = page.render();
        let panel = view.server_info.expect("server info panel");
        assert_eq!(panel.class_name, "server-info");
        let decoded: serde_json::Value = serde_json::from_str(&panel.pre).unwrap();
        assert_eq!(decoded, json!({"a": 1}));
        assert_eq!(
            client.requested.lock().clone(),
            vec!["https://kinto.dev.mozaws.net/v1".to_string()]
        );
    }

    #[tokio::test]
    async fn fetch_uses_submitted_server() {
        let client = StubClient::new(json!({}));
        let mut page = mount_with(empty_store(), client.clone());

        page
            .form_mut()
            .change(SettingsField::Server, "http://other.server/v1");
        page.submit().await.unwrap();
        assert_eq!(
            client.requested.lock().clone(),
            vec!["http://other.server/v1".to_string()]
        );
    }

    #[tokio::test]
    async fn resubmit_replaces_server_info() {
        let mut page = mount_with(empty_store(), StubClient::new(json!({"a": 1})));
        page.submit().await.unwrap();
        assert_matches!(page.state(), ViewState::InfoLoaded(_));

        page.save().unwrap();
        assert_eq!(page.state(), &ViewState::Saved);
        assert!(page.server_info().is_none());
    }

    #[tokio::test]
    async fn server_url_is_trimmed_once_before_save() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let client = StubClient::new(json!({}));
        let mut page = mount_with(store.clone(), client.clone());

        page.form_mut()
            .change(SettingsField::Server, "  http://other.server/v1\n");
        page.submit().await.unwrap();

        assert_eq!(page.settings().server, "http://other.server/v1");
        let stored: serde_json::Value = serde_json::from_str(&store.writes()[0].1).unwrap();
        assert_eq!(stored["server"], "http://other.server/v1");
        assert_eq!(
            client.requested.lock().clone(),
            vec!["http://other.server/v1".to_string()]
        );
    }

    #[test]
    fn invalid_server_is_rejected_without_write() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut page = mount_with(store.clone(), StubClient::new(json!({})));

        page.form_mut().change(SettingsField::Server, "nope");
        assert_matches!(page.save(), Err(CoreError::Validation { .. }));
        assert!(store.writes().is_empty());
        assert_eq!(page.state(), &ViewState::Idle);
    }

    #[tokio::test]
    async fn fetch_failure_keeps_saved_settings() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut page = mount_with(store.clone(), Arc::new(FailingClient));

        let result = page.submit().await;
        assert_matches!(result, Err(CoreError::Network(_)));
        assert_eq!(page.state(), &ViewState::Saved);
        assert_eq!(store.writes().len(), 1);
        assert!(!page.render().has_server_info());
    }

    #[tokio::test]
    async fn load_server_info_requires_save() {
        let client = StubClient::new(json!({}));
        let mut page = mount_with(empty_store(), client.clone());

        assert_matches!(page.load_server_info().await, Err(CoreError::Internal(_)));
        assert!(client.requested.lock().is_empty());
    }
}
