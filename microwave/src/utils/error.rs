//! 全局错误处理模块
//!
//! 提供统一的应用错误类型和用户友好的错误消息
//!
//! # 功能
//!
//! - 统一的 `AppError` 类型，聚合所有模块错误
//! - 错误代码用于宿主界面处理
//! - 用户友好的错误消息
//!
//! # 使用示例
//!
//! ```
//! use microwave_lib::oven::Rejection;
//! use microwave_lib::utils::error::{AppError, ErrorCode};
//!
//! let err = AppError::from(Rejection::TimerNotSet);
//! assert_eq!(err.code(), ErrorCode::TimerNotSet);
//! assert_eq!(err.user_message(), "Please set timer first!");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::oven::Rejection;
use crate::panel::PanelError;

/// 应用错误类型
///
/// 聚合所有模块的错误类型，提供统一的错误处理接口
#[derive(Error, Debug)]
pub enum AppError {
    /// 操作被拒绝
    #[error("Action rejected: {0}")]
    Rejected(#[from] Rejection),

    /// 面板任务错误
    #[error("Panel error: {0}")]
    Panel(#[from] PanelError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

/// 错误代码
///
/// 用于宿主界面识别和处理特定错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // 操作拒绝 (1xxx)
    /// 未选择模式
    ModeNotSelected,
    /// 未设置功率
    PowerNotSet,
    /// 未设置定时
    TimerNotSet,
    /// 已在烹饪
    AlreadyCooking,
    /// 未在烹饪
    NotCooking,
    /// 需要先停止
    MustStopFirst,

    // 面板错误 (2xxx)
    /// 面板任务未运行
    PanelUnavailable,

    // 配置错误 (3xxx)
    /// 配置加载失败
    ConfigLoadFailed,
    /// 配置无效
    ConfigInvalid,

    // 通用错误 (9xxx)
    /// 内部错误
    InternalError,
}

impl AppError {
    /// 获取错误代码
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Rejected(Rejection::ModeNotSelected) => ErrorCode::ModeNotSelected,
            AppError::Rejected(Rejection::PowerNotSet) => ErrorCode::PowerNotSet,
            AppError::Rejected(Rejection::TimerNotSet) => ErrorCode::TimerNotSet,
            AppError::Rejected(Rejection::AlreadyCooking) => ErrorCode::AlreadyCooking,
            AppError::Rejected(Rejection::NotCooking) => ErrorCode::NotCooking,
            AppError::Rejected(Rejection::MustStopFirst) => ErrorCode::MustStopFirst,

            AppError::Panel(_) => ErrorCode::PanelUnavailable,

            AppError::Config(ConfigError::Io(_)) => ErrorCode::ConfigLoadFailed,
            AppError::Config(_) => ErrorCode::ConfigInvalid,

            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// 获取用户友好的错误消息
    ///
    /// 操作拒绝直接返回面板提示语
    pub fn user_message(&self) -> String {
        match self {
            AppError::Rejected(rejection) => rejection.prompt(),
            AppError::Panel(_) => "Control panel is not responding".to_string(),
            AppError::Config(ConfigError::Io(_)) => "Could not read the config file".to_string(),
            AppError::Config(ConfigError::Json(_)) => "Config file is malformed".to_string(),
            AppError::Config(ConfigError::Invalid(msg)) => format!("Invalid config: {}", msg),
            AppError::Internal(msg) => format!("Internal error: {}", msg),
        }
    }
}

/// 应用结果类型
pub type AppResult<T> = Result<T, AppError>;
