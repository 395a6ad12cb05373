//! 控制面板模块
//!
//! 将两个旋钮与烹饪状态机组合为一个面板，并由单一任务串行执行
//!
//! # 模块结构
//!
//! - `control` - 同步组合：旋钮分发 + 状态机
//! - `countdown` - 可取消的周期倒计时任务
//! - `actor` - 面板任务与句柄
//! - `error` - 面板任务错误类型

mod actor;
mod control;
mod countdown;
mod error;

pub use actor::PanelHandle;
pub use control::{ControlPanel, PanelInput, PanelView, Reaction};
pub use countdown::Countdown;
pub use error::{PanelError, PanelResult};
