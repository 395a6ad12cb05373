use thiserror::Error;

/// 面板任务相关错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// 面板任务已停止，命令通道关闭
    #[error("Panel task is not running")]
    ChannelClosed,

    /// 面板任务未返回响应
    #[error("Panel task dropped the response")]
    ResponseDropped,
}

/// 面板操作结果类型
pub type PanelResult<T> = Result<T, PanelError>;
