//! 存储服务连接配置
//!
//! 读取优先级：
//! 1. 环境变量 `CUSTOMASSET_SERVICE_URL` / `CUSTOMASSET_TIMEOUT_SECS`
//! 2. 配置文件 `~/.config/customasset-notify/config.json`（字段 `service_url`、`timeout_secs`）
//! 3. 默认值

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// 默认服务地址
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8081";

/// 默认超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 存储服务配置
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// 服务基础 URL（如 http://localhost:8081）
    pub base_url: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// 配置文件路径
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(".config")
                .join("customasset-notify")
                .join("config.json")
        })
    }

    /// 从配置文件和环境变量自动加载
    pub fn auto_load() -> Self {
        let mut config = Self::path()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|content| Self::from_json(&content))
            .unwrap_or_default();

        if let Ok(url) = std::env::var("CUSTOMASSET_SERVICE_URL") {
            if !url.is_empty() {
                debug!("Using CUSTOMASSET_SERVICE_URL from environment");
                config.base_url = url;
            }
        }

        if let Ok(secs) = std::env::var("CUSTOMASSET_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring invalid CUSTOMASSET_TIMEOUT_SECS"),
            }
        }

        config
    }

    /// 解析配置文件内容，无法识别的字段使用默认值
    pub fn from_json(content: &str) -> Self {
        let mut config = Self::default();

        let doc = match serde_json::from_str::<Value>(content) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable service config");
                return config;
            }
        };

        if let Some(url) = doc.get("service_url").and_then(|u| u.as_str()) {
            if !url.is_empty() {
                config.base_url = url.trim_end_matches('/').to_string();
            }
        }
        if let Some(secs) = doc.get("timeout_secs").and_then(|t| t.as_u64()) {
            config.timeout_secs = secs;
        }

        config
    }
}
