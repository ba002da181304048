//! 存储服务读取 - 获取每个资产的最新 reading

pub mod client;

pub use client::StorageClient;

use thiserror::Error;

/// 读取单个资产失败的原因
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    /// 连接失败、超时、TLS 错误等
    #[error("transport failure: {0}")]
    Transport(String),
    /// 服务返回了非 200 状态
    #[error("unexpected status {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },
    /// 响应体读取失败
    #[error("failed to read response body: {0}")]
    Body(String),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

/// 资产 reading 来源
///
/// 生产环境下由 [`StorageClient`] 实现，测试中可替换为 mock。
pub trait ReadingSource: Send + Sync {
    /// 获取资产最新的一条 reading，返回原始 JSON 文本
    fn fetch_latest(&self, asset: &str) -> Result<String, FetchError>;
}
