//! 面板任务模块
//!
//! 控制面板的全部状态由一个专门的任务独占，所有修改（拖动、按键、
//! 倒计时、延迟恢复）都通过 channel 串行化到该任务中执行。
//!
//! 倒计时任务和延迟恢复任务只持有弱发送端，
//! 当所有 [`PanelHandle`] 被丢弃后面板任务自动退出。

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::sync::{mpsc, oneshot};

use super::control::{ControlPanel, PanelInput, PanelView, Reaction};
use super::countdown::Countdown;
use super::error::{PanelError, PanelResult};
use crate::config::PanelConfig;
use crate::knob::{Bounds, KnobId, Point};
use crate::oven::{Button, Effect};

/// 监听器通道容量
const LISTENER_CAPACITY: usize = 32;

/// 面板命令
#[derive(Debug)]
enum PanelCommand {
    /// 宿主输入事件
    Input {
        input: PanelInput,
        response: oneshot::Sender<Reaction>,
    },
    /// 获取当前视图
    View {
        response: oneshot::Sender<PanelView>,
    },
    /// 订阅视图变更
    Subscribe {
        response: oneshot::Sender<mpsc::Receiver<PanelView>>,
    },
    /// 倒计时一秒
    Tick,
    /// 延迟恢复到期
    Settle { generation: u64 },
}

/// 面板句柄
///
/// 可克隆，所有克隆共享同一个面板任务。
#[derive(Clone)]
pub struct PanelHandle {
    /// 命令发送器
    command_tx: mpsc::Sender<PanelCommand>,
    /// 最新视图（使用 ArcSwap 实现无锁读取）
    current: Arc<ArcSwap<PanelView>>,
}

impl PanelHandle {
    /// 启动面板任务
    ///
    /// 必须在 tokio 运行时中调用。
    ///
    /// # Examples
    ///
    /// ```
    /// use microwave_lib::config::PanelConfig;
    /// use microwave_lib::panel::PanelHandle;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let panel = PanelHandle::spawn(&PanelConfig::default());
    /// let view = panel.view().await.unwrap();
    /// assert_eq!(view.display_text, "Select mode");
    /// # }
    /// ```
    pub fn spawn(config: &PanelConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(config.channel_capacity.max(1));

        let panel = ControlPanel::new(config.timing.notice_delays());
        let current = Arc::new(ArcSwap::from_pointee(panel.view()));

        let actor = PanelActor {
            panel,
            command_rx,
            weak_tx: command_tx.downgrade(),
            current: Arc::clone(&current),
            listeners: Vec::new(),
            countdown: Countdown::new(),
            tick_interval: config.timing.tick_interval(),
        };
        tokio::spawn(actor.run());

        tracing::info!(
            tick_ms = config.timing.tick_interval_ms,
            "Panel task started"
        );

        Self {
            command_tx,
            current,
        }
    }

    /// 获取最新发布的视图
    ///
    /// 无锁读取，可能略晚于已发送但尚未处理的命令
    pub fn current(&self) -> Arc<PanelView> {
        self.current.load_full()
    }

    /// 获取当前视图（经过面板任务，保证此前的命令都已处理）
    pub async fn view(&self) -> PanelResult<PanelView> {
        let (response, rx) = oneshot::channel();
        self.send(PanelCommand::View { response }).await?;
        rx.await.map_err(|_| PanelError::ResponseDropped)
    }

    /// 订阅视图变更
    ///
    /// 每次处理完命令后发布一次视图，接收方过慢时丢弃多余视图
    pub async fn subscribe(&self) -> PanelResult<mpsc::Receiver<PanelView>> {
        let (response, rx) = oneshot::channel();
        self.send(PanelCommand::Subscribe { response }).await?;
        rx.await.map_err(|_| PanelError::ResponseDropped)
    }

    /// 开始拖动旋钮
    pub async fn drag_start(
        &self,
        knob: KnobId,
        pointer: Point,
        bounds: Bounds,
    ) -> PanelResult<Reaction> {
        self.input(PanelInput::DragStart {
            knob,
            pointer,
            bounds,
        })
        .await
    }

    /// 拖动采样
    pub async fn drag_move(&self, pointer: Point) -> PanelResult<Reaction> {
        self.input(PanelInput::DragMove { pointer }).await
    }

    /// 结束拖动
    pub async fn drag_end(&self) -> PanelResult<Reaction> {
        self.input(PanelInput::DragEnd).await
    }

    /// 按下按键
    pub async fn press(&self, button: Button) -> PanelResult<Reaction> {
        self.input(PanelInput::Press { button }).await
    }

    /// 确认键
    pub async fn confirm(&self) -> PanelResult<Reaction> {
        self.press(Button::Confirm).await
    }

    /// 开始/停止键
    pub async fn start_stop(&self) -> PanelResult<Reaction> {
        self.press(Button::StartStop).await
    }

    /// 停止键
    pub async fn stop(&self) -> PanelResult<Reaction> {
        self.press(Button::Stop).await
    }

    /// 返回键
    pub async fn back(&self) -> PanelResult<Reaction> {
        self.press(Button::Back).await
    }

    /// 发送输入事件并等待处理结果
    pub async fn input(&self, input: PanelInput) -> PanelResult<Reaction> {
        let (response, rx) = oneshot::channel();
        self.send(PanelCommand::Input { input, response }).await?;
        rx.await.map_err(|_| PanelError::ResponseDropped)
    }

    async fn send(&self, command: PanelCommand) -> PanelResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| PanelError::ChannelClosed)
    }
}

/// 面板任务
///
/// 独占 [`ControlPanel`]，执行状态机请求的副作用
struct PanelActor {
    panel: ControlPanel,
    command_rx: mpsc::Receiver<PanelCommand>,
    /// 弱发送端，用于倒计时和延迟恢复
    weak_tx: mpsc::WeakSender<PanelCommand>,
    current: Arc<ArcSwap<PanelView>>,
    listeners: Vec<mpsc::Sender<PanelView>>,
    countdown: Countdown,
    tick_interval: Duration,
}

impl PanelActor {
    async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            match command {
                PanelCommand::Input { input, response } => {
                    let rejection = self.panel.apply(input).err();
                    self.after_change();
                    let reaction = Reaction {
                        view: self.current.load_full().as_ref().clone(),
                        rejection,
                    };
                    let _ = response.send(reaction);
                }
                PanelCommand::View { response } => {
                    let _ = response.send(self.panel.view());
                }
                PanelCommand::Subscribe { response } => {
                    let (tx, rx) = mpsc::channel(LISTENER_CAPACITY);
                    self.listeners.push(tx);
                    let _ = response.send(rx);
                }
                PanelCommand::Tick => {
                    self.panel.tick();
                    self.after_change();
                }
                PanelCommand::Settle { generation } => {
                    if self.panel.settle(generation) {
                        self.after_change();
                    }
                }
            }
        }

        self.countdown.disarm();
        tracing::info!("Panel task stopped");
    }

    /// 执行副作用并发布视图
    fn after_change(&mut self) {
        for effect in self.panel.drain_effects() {
            self.run_effect(effect);
        }
        self.publish();
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ArmCountdown => {
                self.countdown
                    .arm(self.weak_tx.clone(), || PanelCommand::Tick, self.tick_interval);
            }
            Effect::DisarmCountdown => self.countdown.disarm(),
            Effect::ScheduleSettle { generation, after } => {
                let tx = self.weak_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    if let Some(tx) = tx.upgrade() {
                        let _ = tx.send(PanelCommand::Settle { generation }).await;
                    }
                });
            }
        }
    }

    fn publish(&mut self) {
        let view = self.panel.view();
        self.current.store(Arc::new(view.clone()));

        self.listeners.retain(|tx| !tx.is_closed());
        for listener in &self.listeners {
            // 使用 try_send 避免阻塞面板任务
            let _ = listener.try_send(view.clone());
        }
    }
}
