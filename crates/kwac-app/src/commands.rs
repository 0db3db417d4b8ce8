//! 서브커맨드 실행.
//!
//! 각 커맨드는 설정 화면을 구동하고 결과 화면을 `out`에 출력한다.

use anyhow::{Context, Result};
use kwac_core::models::settings::SettingsField;
use kwac_core::ports::server_info::ServerInfoClient;
use kwac_core::settings_repository::SettingsRepository;
use kwac_ui::render::render_text;
use kwac_ui::views::SettingsPage;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// 화면 출력 (텍스트 또는 JSON)
pub fn print_page<W: Write>(out: &mut W, page: &SettingsPage, json: bool) -> Result<()> {
    let view = page.render();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        write!(out, "{}", render_text(&view))?;
    }
    Ok(())
}

/// `show`: 저장된 설정으로 화면 출력
pub fn run_show<W: Write>(page: &SettingsPage, json: bool, out: &mut W) -> Result<()> {
    print_page(out, page, json)
}

/// `set`: 편집 적용 → 저장 → 서버 정보 조회 → 화면 출력
///
/// 조회 실패 시에도 저장된 설정으로 화면을 출력한 뒤 에러를 반환한다.
pub async fn run_set<W: Write>(
    page: &mut SettingsPage,
    edits: &[(SettingsField, &str)],
    json: bool,
    out: &mut W,
) -> Result<()> {
    for (field, value) in edits {
        page.form_mut().change(*field, *value);
    }

    page.save().context("설정 저장 실패")?;
    let fetched = page.load_server_info().await;
    print_page(out, page, json)?;
    fetched.context("설정은 저장되었지만 서버 정보 조회에 실패했습니다")?;
    Ok(())
}

/// `reset`: 저장된 설정 삭제 후 기본값 화면 출력
pub fn run_reset<W: Write>(
    repository: SettingsRepository,
    client: Arc<dyn ServerInfoClient>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    repository.clear().context("설정 삭제 실패")?;
    info!("저장된 설정 삭제, 기본값 복원");
    let page = SettingsPage::mount(repository, client);
    print_page(out, &page, json)
}
