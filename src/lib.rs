//! CustomAsset Notify - 通知触发时汇总资产最新 reading 并投递为一条记录

pub mod config;
pub mod notification;
pub mod notifier;
pub mod service;
pub mod storage;

pub use config::PluginConfig;
pub use notification::{
    aggregate, escape_json, AggregatedPayload, Emitter, EventValue, IngestSink, JsonlFileSink,
    NotificationRecord, RecordFields, SendResult, StdoutSink,
};
pub use notifier::CustomAssetNotifier;
pub use service::ServiceConfig;
pub use storage::{FetchError, ReadingSource, StorageClient};
