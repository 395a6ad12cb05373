//! 烹饪流程演示
//!
//! 模拟一次完整的操作：选择 Grill、功率 4、定时 5 分钟，然后等待完成。
//! 倒计时使用缩短的时钟（每秒 20ms）。
//!
//! 运行: cargo run --example grill_demo

use microwave_lib::config::PanelConfig;
use microwave_lib::console::turn_knob;
use microwave_lib::knob::KnobId;
use microwave_lib::panel::{PanelHandle, PanelView};
use tokio::time::{sleep, Duration};

fn show(step: &str, view: &PanelView) {
    println!(
        "  {:<28} [{}] {}",
        step,
        view.start_button_label.as_str(),
        view.display_text
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    microwave_lib::utils::logging::init_logging();

    println!("=== 微波炉面板演示 ===\n");

    let mut config = PanelConfig::default();
    config.timing.tick_interval_ms = 20;
    config.timing.short_notice_ms = 200;
    config.timing.notice_ms = 400;
    config.timing.long_notice_ms = 600;
    config.validate()?;

    let panel = PanelHandle::spawn(&config);
    show("start", &panel.view().await?);

    // 1. 未选择模式时的提示
    println!("\n1. 未选择模式");
    println!("{}", "-".repeat(40));
    let reaction = panel.start_stop().await?;
    show("press start", &reaction.view);
    if let Some(rejection) = reaction.rejection {
        println!("  rejected: {:?}", rejection);
    }

    // 2. 设置模式、功率和定时
    println!("\n2. 设置 Grill / 功率 4 / 5 分钟");
    println!("{}", "-".repeat(40));
    show("turn selection +150", &turn_knob(&panel, KnobId::Selection, 150.0).await?.view);
    show("turn adjustment +110", &turn_knob(&panel, KnobId::Adjustment, 110.0).await?.view);
    show("press ok", &panel.confirm().await?.view);
    show("turn adjustment -101", &turn_knob(&panel, KnobId::Adjustment, -101.0).await?.view);

    // 3. 开始烹饪并观察倒计时
    println!("\n3. 烹饪");
    println!("{}", "-".repeat(40));
    show("press ok", &panel.confirm().await?.view);

    let mut views = panel.subscribe().await?;
    let mut last_minute = None;
    while let Some(view) = views.recv().await {
        let minute = view.remaining_seconds / 60;
        if view.is_cooking && last_minute != Some(minute) {
            show("countdown", &view);
            last_minute = Some(minute);
        }
        if !view.is_cooking {
            show("finished", &view);
            break;
        }
    }

    // 4. 完成提示后自动复位
    sleep(Duration::from_millis(config.timing.long_notice_ms + 100)).await;
    show("after reset", &panel.view().await?);

    println!("\n=== 演示完成 ===");
    Ok(())
}
