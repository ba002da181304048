//! CustomAsset Notify CLI
//!
//! 读取插件配置，汇总资产最新 reading，并把通知记录写到标准输出或 JSONL 文件

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use customasset_notify::{
    CustomAssetNotifier, IngestSink, JsonlFileSink, PluginConfig, SendResult, ServiceConfig,
    StdoutSink, StorageClient,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "customasset")]
#[command(about = "CustomAsset Notify - 汇总资产最新 reading 并投递通知记录")]
#[command(version)]
struct Cli {
    /// 存储服务地址（覆盖配置文件和环境变量）
    #[arg(long, global = true)]
    service_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 发送一次通知
    Notify {
        /// 插件配置 category 文件
        #[arg(long, short)]
        config: PathBuf,
        /// 通知名称
        #[arg(long, short)]
        name: String,
        /// Trigger reason JSON（如 {"reason":"threshold"}）
        #[arg(long, default_value = "{}")]
        reason: String,
        /// 通知消息（暂未使用）
        #[arg(long, default_value = "")]
        message: String,
        /// 写入 JSONL 文件而不是标准输出
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// 跳过存储服务健康检查
        #[arg(long)]
        skip_check: bool,
    },
    /// 检查存储服务是否可达
    Check,
    /// 列出配置的资产
    Sources {
        /// 插件配置 category 文件
        #[arg(long, short)]
        config: PathBuf,
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("customasset_notify=info,customasset=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    let mut service = ServiceConfig::auto_load();
    if let Some(url) = cli.service_url {
        service.base_url = url.trim_end_matches('/').to_string();
    }

    match cli.command {
        Commands::Notify {
            config,
            name,
            reason,
            message,
            output,
            skip_check,
        } => {
            let plugin = load_plugin_config(&config)?;

            if !skip_check {
                StorageClient::new(service.clone())?.health_check()?;
            }

            let notifier = CustomAssetNotifier::with_storage(plugin, service)?;
            let sink: Arc<dyn IngestSink> = match output {
                Some(path) => Arc::new(JsonlFileSink::new(path)),
                None => Arc::new(StdoutSink),
            };
            notifier.register_sink(sink);

            match notifier.notify(&name, &reason, &message) {
                SendResult::Sent => info!(notification = %name, "Notification delivered"),
                SendResult::Skipped(why) => info!(notification = %name, reason = %why, "Notification skipped"),
                SendResult::Failed(e) => return Err(anyhow!("Delivery failed: {}", e)),
            }
        }
        Commands::Check => {
            StorageClient::new(service.clone())?.health_check()?;
            println!("✅ {} reachable", service.base_url);
        }
        Commands::Sources { config, json } => {
            let plugin = load_plugin_config(&config)?;

            if json {
                let entries: serde_json::Map<String, serde_json::Value> = plugin
                    .source_names()
                    .iter()
                    .map(|s| (s.clone(), serde_json::json!(plugin.datapoints(s))))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if plugin.source_names().is_empty() {
                println!("没有配置资产");
            } else {
                for source in plugin.source_names() {
                    let datapoints = plugin.datapoints(source);
                    if datapoints.is_empty() {
                        println!("{}", source);
                    } else {
                        println!("{}  [{}]", source, datapoints.join(", "));
                    }
                }
            }
        }
    }

    Ok(())
}

fn load_plugin_config(path: &Path) -> Result<PluginConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    PluginConfig::from_category(&raw)
}
