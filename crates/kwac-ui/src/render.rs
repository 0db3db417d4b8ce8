//! 뷰 트리 텍스트 렌더러 (터미널 출력용).

use crate::views::page::PageView;

/// 뷰 트리를 터미널 텍스트로 변환
///
/// 비밀번호 입력은 마스킹하고, 서버 정보 패널은 있을 때만 출력한다.
pub fn render_text(view: &PageView) -> String {
    let mut out = format!(
        "{}\n{}\n\n",
        view.title,
        "=".repeat(view.title.chars().count())
    );

    let label_width = view
        .form
        .inputs
        .iter()
        .map(|i| i.label.len())
        .max()
        .unwrap_or(0);

    for input in &view.form.inputs {
        out.push_str(&format!(
            "  {:<width$} : {}\n",
            input.label,
            input.display_value(),
            width = label_width
        ));
    }

    if let Some(panel) = &view.server_info {
        out.push_str(&format!(
            "\n{}\n{}\n",
            panel.heading,
            "-".repeat(panel.heading.chars().count())
        ));
        for line in panel.pre.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }

    out
}
