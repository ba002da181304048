//! Ingest sink trait 定义

use anyhow::Result;

use super::record::NotificationRecord;

/// 投递结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 已交给 sink
    Sent,
    /// 跳过（例如尚未注册 sink）
    Skipped(String),
    /// sink 返回错误
    Failed(String),
}

/// 接收通知记录的 sink
pub trait IngestSink: Send + Sync {
    /// sink 名称（用于日志）
    fn name(&self) -> &str {
        "ingest"
    }

    /// 接收一条记录，记录的所有权转移给 sink
    fn accept(&self, record: NotificationRecord) -> Result<()>;
}
