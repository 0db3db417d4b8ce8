//! UI 뷰 모듈.

pub mod page;
pub mod settings;

pub use page::{FormView, InputView, PageView, ServerInfoPanel};
pub use settings::{SettingsForm, SettingsPage, ViewState};
