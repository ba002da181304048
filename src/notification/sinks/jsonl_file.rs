//! JSONL 文件 sink - 把记录追加写入本地文件

use anyhow::Result;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::notification::record::NotificationRecord;
use crate::notification::sink::IngestSink;

/// JSONL 文件 sink
pub struct JsonlFileSink {
    path: PathBuf,
}

impl JsonlFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认文件位置 `~/.config/customasset-notify/records.jsonl`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("customasset-notify")
            .join("records.jsonl")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IngestSink for JsonlFileSink {
    fn name(&self) -> &str {
        "jsonl_file"
    }

    /// 追加一条记录（带文件锁）
    fn accept(&self, record: NotificationRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(&record)?;

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.lock_exclusive()?;
        let written = writeln!(file, "{}", line);
        file.unlock()?;
        written?;

        debug!(path = %self.path.display(), asset = %record.asset_name, "Record appended");
        Ok(())
    }
}
