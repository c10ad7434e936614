//! Demo 命令 - 依次发送一组示例通知，检查渲染端显示

use anyhow::Result;
use clap::Args;
use serde_json::{json, Value};
use std::time::Duration;

use super::dispatch::DispatchReport;
use super::SinkArgs;

/// Demo 命令参数
#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    /// 每条通知之间的间隔（秒），留时间给渲染端显示
    #[arg(long, short, default_value = "15")]
    pub interval: u64,
}

/// 构造 base 通知
pub fn base_notification(
    source: &str,
    headline: &str,
    info: &str,
    media: &str,
    seemore: &str,
) -> Value {
    json!({
        "notifType": "base",
        "fromSource": source,
        "data": {
            "timestamp": "2026-02-17T10:30:00Z",
            "media": media,
            "headline": headline,
            "info": info,
            "seemore": seemore
        }
    })
}

/// 示例通知：默认、NFL、NASA、不支持的类型、未注册来源
pub fn demo_notifications() -> Vec<(&'static str, Value)> {
    vec![
        (
            "Default notification",
            base_notification(
                "",
                "System Ready",
                "All systems operational. Ready to receive notifications.",
                "",
                "",
            ),
        ),
        (
            "NFL notification",
            base_notification(
                "NFL",
                "Chiefs Win Super Bowl!",
                "Kansas City Chiefs defeat the Eagles 31-28 in overtime.",
                "https://a.espncdn.com/i/teamlogos/nfl/500/kc.png",
                "https://example.com/nfl/superbowl",
            ),
        ),
        (
            "NASA notification",
            base_notification(
                "NASA",
                "New Exoplanet Discovered",
                "Astronomers have discovered a potentially habitable exoplanet 100 light-years away.",
                "https://www.nasa.gov/wp-content/uploads/2026/02/nycicy-oli-20260128-lrg.jpg",
                "https://example.com/nasa/exoplanet",
            ),
        ),
        (
            "Unsupported alert (rejected)",
            json!({
                "notifType": "alert",
                "fromSource": "WeatherAPI",
                "data": { "headline": "Tornado Watch" }
            }),
        ),
        (
            "Weather alert",
            base_notification(
                "WeatherAPI",
                "Severe Weather Warning",
                "Heavy snowfall expected tonight. Road conditions may be hazardous.",
                "",
                "",
            ),
        ),
    ]
}

/// 处理 demo 命令，返回被接受的通知数
pub fn handle_demo(args: DemoArgs, sink: &SinkArgs) -> Result<usize> {
    let dispatcher = sink.builder().build()?;
    let notifications = demo_notifications();
    let total = notifications.len();
    let mut accepted = 0;

    println!("{}", "=".repeat(60));
    println!("NOTIFICATION DEMO ({} notifications)", total);
    println!("{}", "=".repeat(60));

    for (i, (title, notification)) in notifications.into_iter().enumerate() {
        println!("\nTest {}: {}", i + 1, title);
        println!("{}", "-".repeat(60));

        let report = DispatchReport::run(&dispatcher, notification.to_string());
        if report.accepted {
            accepted += 1;
        }
        println!("{}", report.summary());

        if i + 1 < total && args.interval > 0 {
            std::thread::sleep(Duration::from_secs(args.interval));
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("{}/{} notifications accepted", accepted, total);
    Ok(accepted)
}
