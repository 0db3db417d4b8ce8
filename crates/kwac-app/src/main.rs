//! # kwac-app
//!
//! KWAC 바이너리 진입점.
//! 설정 로드, 어댑터 와이어링, 설정 화면 실행.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use kwac_app::commands::{run_reset, run_set, run_show};
use kwac_core::config::AppConfig;
use kwac_core::config_manager::ConfigManager;
use kwac_core::models::settings::SettingsField;
use kwac_core::ports::key_value_store::KeyValueStore;
use kwac_core::ports::server_info::ServerInfoClient;
use kwac_core::settings_repository::SettingsRepository;
use kwac_network::http_client::HttpServerInfoClient;
use kwac_storage::memory::MemoryKeyValueStore;
use kwac_storage::sqlite::SqliteKeyValueStore;
use kwac_ui::views::SettingsPage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Kinto 관리 콘솔 설정 도구
#[derive(Parser, Debug)]
#[command(name = "kwac")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    /// 설정 DB 경로 (기본: 플랫폼별 데이터 디렉토리)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// 인메모리 저장소 사용 (종료 시 설정 폐기)
    #[arg(long, global = true)]
    ephemeral: bool,

    /// 앱 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 화면을 JSON 뷰 트리로 출력
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 현재 설정 화면 출력
    Show,
    /// 설정 편집 후 제출 (저장 → 서버 정보 조회)
    Set(SetArgs),
    /// 저장된 설정 삭제 (기본값 복원)
    Reset,
}

#[derive(ClapArgs, Debug, Default)]
struct SetArgs {
    /// 서버 URL
    #[arg(long)]
    server: Option<String>,
    /// 버킷 이름
    #[arg(long)]
    bucket: Option<String>,
    /// 사용자명
    #[arg(long)]
    username: Option<String>,
    /// 비밀번호
    #[arg(long)]
    password: Option<String>,
}

impl SetArgs {
    /// 지정된 필드만 (필드, 값) 목록으로
    fn edits(&self) -> Vec<(SettingsField, &str)> {
        [
            (SettingsField::Server, &self.server),
            (SettingsField::Bucket, &self.bucket),
            (SettingsField::Username, &self.username),
            (SettingsField::Password, &self.password),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

/// 앱 설정 로드 — 실패 시 기본 설정으로 계속 진행
fn load_app_config(path: Option<PathBuf>) -> AppConfig {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match manager {
        Ok(manager) => {
            debug!("앱 설정 파일: {}", manager.config_path().display());
            manager.get()
        }
        Err(e) => {
            warn!("앱 설정 로드 실패, 기본 설정 사용: {e}");
            AppConfig::default_config()
        }
    }
}

/// 키-값 저장소 생성 (CLI 인자 > 앱 설정 > 플랫폼 기본 경로)
fn build_store(args: &Args, config: &AppConfig) -> Result<Arc<dyn KeyValueStore>> {
    if args.ephemeral {
        info!("인메모리 저장소 사용");
        return Ok(Arc::new(MemoryKeyValueStore::new()));
    }

    let path = args
        .db
        .clone()
        .unwrap_or_else(|| config.storage.resolve_db_path());
    let store = SqliteKeyValueStore::open(&path)
        .with_context(|| format!("설정 DB 열기 실패: {}", path.display()))?;
    Ok(Arc::new(store))
}

fn build_client(config: &AppConfig) -> Result<Arc<dyn ServerInfoClient>> {
    let client = HttpServerInfoClient::new(config.request_timeout())
        .context("HTTP 클라이언트 생성 실패")?
        .with_credentials(config.server.send_credentials);
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 로그는 stderr로 — stdout은 화면 출력 전용
    let log_filter = format!(
        "kwac={},kwac_app={},kwac_core={},kwac_storage={},kwac_network={},kwac_ui={}",
        args.log_level,
        args.log_level,
        args.log_level,
        args.log_level,
        args.log_level,
        args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_app_config(args.config.clone());
    let store = build_store(&args, &config)?;
    let repository = SettingsRepository::new(store);

    let client = build_client(&config)?;
    let mut out = std::io::stdout().lock();

    match &args.command {
        None | Some(Command::Show) => {
            let page = SettingsPage::mount(repository, client);
            run_show(&page, args.json, &mut out)?;
        }
        Some(Command::Set(set_args)) => {
            let mut page = SettingsPage::mount(repository, client);
            run_set(&mut page, &set_args.edits(), args.json, &mut out).await?;
        }
        Some(Command::Reset) => run_reset(repository, client, args.json, &mut out)?,
    }

    Ok(())
}
