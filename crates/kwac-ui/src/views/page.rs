//! 뷰 트리.
//!
//! 화면이 그려야 할 요소를 렌더링 엔진과 무관하게 표현한다.
//! 텍스트 렌더러와 `--json` 출력이 같은 트리를 사용한다.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// 폼 CSS 클래스
pub const FORM_CLASS: &str = "rjsf";

/// 비밀번호 표시용 마스킹 문자열
pub const PASSWORD_MASK: &str = "********";

/// 서버 정보 패널 CSS 클래스
pub const SERVER_INFO_CLASS: &str = "server-info";

/// 페이지 전체
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// 페이지 제목 (h1)
    pub title: String,
    /// 편집 폼
    pub form: FormView,
    /// 서버 정보 패널 (서버 정보가 있을 때만)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_info: Option<ServerInfoPanel>,
}

impl PageView {
    /// 입력 필드 값 목록 (표시 순서)
    pub fn input_values(&self) -> Vec<&str> {
        self.form.inputs.iter().map(|i| i.value.as_str()).collect()
    }

    pub fn has_server_info(&self) -> bool {
        self.server_info.is_some()
    }
}

/// 편집 폼
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub class_name: &'static str,
    pub inputs: Vec<InputView>,
    pub submit_label: &'static str,
}

/// 텍스트 입력 필드
///
/// 직렬화 시 비밀번호 값은 마스킹된다.
#[derive(Debug, Clone, PartialEq)]
pub struct InputView {
    /// 요소 ID (예: "root_server")
    pub id: String,
    /// 설정 JSON 키
    pub name: &'static str,
    pub label: &'static str,
    /// 입력 타입 — 모든 필드가 "text"
    pub input_type: &'static str,
    pub value: String,
}

impl InputView {
    /// 출력용 값 (비밀번호는 마스킹)
    pub fn display_value(&self) -> &str {
        if self.name == "password" && !self.value.is_empty() {
            PASSWORD_MASK
        } else {
            &self.value
        }
    }
}

impl Serialize for InputView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("InputView", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("label", self.label)?;
        state.serialize_field("input_type", self.input_type)?;
        state.serialize_field("value", self.display_value())?;
        state.end()
    }
}

/// 읽기 전용 서버 정보 패널
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerInfoPanel {
    pub class_name: &'static str,
    pub heading: &'static str,
    /// 들여쓰기된 JSON (pre 블록)
    pub pre: String,
}
