//! CustomAsset 通知投递
//!
//! 收到通知时读取配置资产的最新 reading，和通知信息一起组装成一条记录，
//! 交给注册的 ingest sink。

use anyhow::Result;
use std::sync::{Arc, RwLock};
use tracing::{error, info};

use crate::config::PluginConfig;
use crate::notification::{aggregate, Emitter, IngestSink, NotificationRecord, RecordFields, SendResult};
use crate::service::ServiceConfig;
use crate::storage::{ReadingSource, StorageClient};

/// CustomAsset 通知投递器
///
/// 配置以不可变快照保存，`reconfigure` 整体替换，
/// 每次 `notify` 只读取一次快照。
pub struct CustomAssetNotifier {
    config: RwLock<Arc<PluginConfig>>,
    reader: Box<dyn ReadingSource>,
    emitter: RwLock<Emitter>,
}

impl CustomAssetNotifier {
    /// 使用自定义 reading 来源创建
    pub fn new(config: PluginConfig, reader: impl ReadingSource + 'static) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
            reader: Box::new(reader),
            emitter: RwLock::new(Emitter::new()),
        }
    }

    /// 连接存储服务创建（不发起请求，需要时由调用方执行健康检查）
    pub fn with_storage(config: PluginConfig, service: ServiceConfig) -> Result<Self> {
        Ok(Self::new(config, StorageClient::new(service)?))
    }

    /// 注册 ingest sink
    pub fn register_sink(&self, sink: Arc<dyn IngestSink>) {
        self.emitter
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .attach(sink);
    }

    /// 当前配置快照
    pub fn snapshot(&self) -> Arc<PluginConfig> {
        self.config
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// 发送通知
    ///
    /// # Arguments
    /// * `notification_name` - 通知名称，写入 `rule` 字段
    /// * `trigger_reason` - 规则给出的 JSON，`reason` 写入 `event` 字段
    /// * `_message` - 暂未使用
    pub fn notify(&self, notification_name: &str, trigger_reason: &str, _message: &str) -> SendResult {
        // 复制一份后立即释放锁，读取和投递期间不占用
        let emitter = self.emitter.read().unwrap_or_else(|e| e.into_inner()).clone();

        // 没有 sink 时不做任何读取
        if !emitter.is_attached() {
            return SendResult::Skipped("no sink attached".to_string());
        }

        let config = self.snapshot();
        let payload = aggregate(config.source_names(), self.reader.as_ref());
        let fields = RecordFields::build(&config.description, trigger_reason, notification_name, &payload);

        info!(
            notification = %notification_name,
            asset = %config.record_name,
            readings = payload.readings.len(),
            "Delivering notification"
        );

        emitter.emit(NotificationRecord::new(config.record_name.clone(), fields))
    }

    /// 用新的配置 category 替换当前配置
    ///
    /// 解析失败时保留原配置。
    pub fn reconfigure(&self, new_config: &str) {
        match PluginConfig::from_category(new_config) {
            Ok(config) => {
                info!(
                    asset = %config.record_name,
                    sources = config.source_names().len(),
                    "Reconfigured"
                );
                *self.config.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(config);
            }
            Err(e) => {
                error!(error = %e, "Ignoring invalid configuration");
            }
        }
    }
}
