//! 面板配置模块
//!
//! 提供控制面板运行参数的加载、保存和校验
//!
//! # 配置文件位置
//!
//! - 环境变量 `MICROWAVE_CONFIG` 指定的路径
//! - 否则为当前目录下的 `microwave.json`
//!
//! # 使用示例
//!
//! ```no_run
//! use microwave_lib::config::ConfigManager;
//!
//! let path = ConfigManager::resolve_path();
//! let config = ConfigManager::load(&path).unwrap();
//! assert!(config.validate().is_ok());
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::oven::NoticeDelays;

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "MICROWAVE_CONFIG";

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "microwave.json";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置值无效
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 配置结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 面板配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// 计时配置
    pub timing: TimingConfig,
    /// 面板命令通道容量
    pub channel_capacity: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            channel_capacity: 64,
        }
    }
}

impl PanelConfig {
    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timing.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "timing.tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 计时配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// 倒计时间隔（毫秒）
    pub tick_interval_ms: u64,
    /// 短提示显示时长（毫秒）
    pub short_notice_ms: u64,
    /// 普通提示显示时长（毫秒）
    pub notice_ms: u64,
    /// 长提示显示时长（毫秒），用于烹饪完成
    pub long_notice_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            short_notice_ms: 1000,
            notice_ms: 2000,
            long_notice_ms: 3000,
        }
    }
}

impl TimingConfig {
    /// 倒计时间隔
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// 转换为状态机使用的提示时长
    pub fn notice_delays(&self) -> NoticeDelays {
        NoticeDelays {
            short: Duration::from_millis(self.short_notice_ms),
            medium: Duration::from_millis(self.notice_ms),
            long: Duration::from_millis(self.long_notice_ms),
        }
    }
}

/// 配置管理器
///
/// 提供配置的加载、保存和管理功能
pub struct ConfigManager;

impl ConfigManager {
    /// 获取配置文件路径
    ///
    /// 优先使用 `MICROWAVE_CONFIG` 环境变量
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// 加载配置
    ///
    /// 文件不存在时返回默认配置
    pub fn load(path: &Path) -> ConfigResult<PanelConfig> {
        tracing::debug!(path = %path.display(), "Loading config");

        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(PanelConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: PanelConfig = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::info!(path = %path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// 保存配置
    pub fn save(path: &Path, config: &PanelConfig) -> ConfigResult<()> {
        tracing::debug!(path = %path.display(), "Saving config");

        config.validate()?;

        // 确保目录存在
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(path, content)?;

        tracing::info!(path = %path.display(), "Config saved successfully");
        Ok(())
    }

    /// 检查配置文件是否存在
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    /// 删除配置文件
    pub fn delete(path: &Path) -> ConfigResult<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
            tracing::info!(path = %path.display(), "Config deleted");
        }
        Ok(())
    }
}
