/// Knob drag geometry and controllers
pub mod knob;

/// Oven settings and cooking state machine
pub mod oven;

/// Control panel task: knobs, buttons and countdown
pub mod panel;

/// Configuration management
pub mod config;

/// Line-oriented panel simulator
pub mod console;

/// Utility modules
pub mod utils;

use anyhow::Context;

use crate::config::ConfigManager;
use crate::panel::PanelHandle;
use crate::utils::error::AppError;

/// 启动控制台模拟器
///
/// 初始化日志、加载配置，然后在 stdin/stdout 上运行面板
pub fn run() -> anyhow::Result<()> {
    utils::logging::init_logging();

    let path = ConfigManager::resolve_path();
    let config = ConfigManager::load(&path)
        .map_err(AppError::from)
        .inspect_err(|e| tracing::error!(code = ?e.code(), "{}", e.user_message()))
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(async move {
        let panel = PanelHandle::spawn(&config);
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        console::run_console(panel, stdin, tokio::io::stdout()).await
    })?;

    tracing::info!("Console closed");
    Ok(())
}
