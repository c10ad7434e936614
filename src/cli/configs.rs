//! Configs 命令 - 列出来源显示配置

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::output::format_json;
use crate::notification::{ConfigRegistry, DisplayConfig};

/// Configs 命令参数
#[derive(Args, Debug, Clone)]
pub struct ConfigsArgs {
    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigsOutput<'a> {
    sources: Vec<SourceEntry<'a>>,
    default: DisplayConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceEntry<'a> {
    from_source: &'a str,
    config: DisplayConfig,
}

/// 处理 configs 命令
pub fn handle_configs(args: ConfigsArgs, registry: &ConfigRegistry) -> Result<()> {
    if args.json {
        let output = ConfigsOutput {
            sources: registry
                .sources()
                .into_iter()
                .map(|(from_source, config)| SourceEntry { from_source, config })
                .collect(),
            default: registry.default_config(),
        };
        println!("{}", format_json(&output));
        return Ok(());
    }

    println!("{} custom source config(s):\n", registry.len());
    for (source, config) in registry.sources() {
        println!("  {:<12} {}", source, config.describe());
    }
    println!("  {:<12} {}", "(default)", registry.default_config().describe());
    Ok(())
}
