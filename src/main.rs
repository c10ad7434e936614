//! Pod Notify CLI
//!
//! 校验通知、解析来源显示配置，并交给 pod 渲染端

use anyhow::Result;
use clap::{Parser, Subcommand};
use pod_notify::cli::{
    handle_configs, handle_demo, handle_dispatch, handle_show, handle_watch, ConfigsArgs,
    DemoArgs, DispatchArgs, ShowArgs, SinkArgs, WatchArgs,
};
use pod_notify::ConfigRegistry;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "podnotify")]
#[command(about = "Pod Notify - 通知校验与渲染端交付")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    sink: SinkArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 发送一条通知
    Dispatch(DispatchArgs),
    /// 显示渲染端当前看到的通知
    Show(ShowArgs),
    /// 持续监视槽文件并打印新通知
    Watch(WatchArgs),
    /// 列出来源显示配置
    Configs(ConfigsArgs),
    /// 依次发送示例通知
    Demo(DemoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化 tracing 日志系统
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug podnotify dispatch --file notif.json
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pod_notify=info,podnotify=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    let sink = cli.sink;

    match cli.command {
        Commands::Dispatch(args) => {
            // Webhook 使用阻塞 HTTP 客户端，放到阻塞线程执行
            let accepted =
                tokio::task::spawn_blocking(move || handle_dispatch(args, &sink)).await??;
            if !accepted {
                std::process::exit(2);
            }
        }
        Commands::Show(args) => {
            handle_show(args, &sink)?;
        }
        Commands::Watch(args) => {
            handle_watch(args, &sink).await?;
        }
        Commands::Configs(args) => {
            handle_configs(args, &ConfigRegistry::baseline())?;
        }
        Commands::Demo(args) => {
            tokio::task::spawn_blocking(move || handle_demo(args, &sink)).await??;
        }
    }

    Ok(())
}
