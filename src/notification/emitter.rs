//! 发送器 - 把记录交给已注册的 sink

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::record::NotificationRecord;
use super::sink::{IngestSink, SendResult};

/// 发送器
///
/// 没有 sink 时处于未挂载状态，此时 `emit` 直接丢弃记录。
/// clone 只复制 sink 的引用，可以在锁外使用。
#[derive(Clone, Default)]
pub struct Emitter {
    sink: Option<Arc<dyn IngestSink>>,
}

impl Emitter {
    /// 创建未挂载的发送器
    pub fn new() -> Self {
        Self { sink: None }
    }

    /// 挂载 sink（替换已有的）
    pub fn attach(&mut self, sink: Arc<dyn IngestSink>) {
        info!(sink = sink.name(), "Registering ingest sink");
        self.sink = Some(sink);
    }

    /// 卸载 sink
    pub fn detach(&mut self) {
        self.sink = None;
    }

    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    /// 交给 sink，只调用一次 `accept`
    pub fn emit(&self, record: NotificationRecord) -> SendResult {
        let sink = match &self.sink {
            Some(sink) => sink,
            None => {
                debug!(asset = %record.asset_name, "No ingest sink attached, dropping record");
                return SendResult::Skipped("no sink attached".to_string());
            }
        };

        match sink.accept(record) {
            Ok(()) => SendResult::Sent,
            Err(e) => {
                warn!(sink = sink.name(), error = %e, "Ingest sink rejected record");
                SendResult::Failed(e.to_string())
            }
        }
    }
}
