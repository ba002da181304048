//! 通知管线 - 读取、聚合、组装、发送
//!
//! # 流程
//! 1. `aggregate`：按配置顺序读取每个资产的最新 reading 并合并
//! 2. `RecordFields::build`：解析 trigger reason，转义聚合结果
//! 3. `Emitter::emit`：交给已注册的 `IngestSink`
//!
//! # 使用示例
//! ```ignore
//! use customasset_notify::notification::{aggregate, RecordFields, NotificationRecord};
//!
//! let payload = aggregate(config.source_names(), &client);
//! let fields = RecordFields::build(&config.description, reason, "HighTemp", &payload);
//! emitter.emit(NotificationRecord::new(&config.record_name, fields));
//! ```

pub mod aggregator;
pub mod decode;
pub mod emitter;
pub mod escape;
pub mod record;
pub mod sink;
pub mod sinks;

pub use aggregator::{aggregate, AggregatedPayload};
pub use decode::{ReadingShape, ReasonValue};
pub use emitter::Emitter;
pub use escape::escape_json;
pub use record::{EventValue, NotificationRecord, RecordFields};
pub use sink::{IngestSink, SendResult};
pub use sinks::{JsonlFileSink, StdoutSink};
