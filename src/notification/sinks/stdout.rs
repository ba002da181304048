//! 标准输出 sink - 每条记录打印一行 JSON

use anyhow::Result;
use std::io::Write;

use crate::notification::record::NotificationRecord;
use crate::notification::sink::IngestSink;

pub struct StdoutSink;

impl IngestSink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    fn accept(&self, record: NotificationRecord) -> Result<()> {
        let line = serde_json::to_string(&record)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }
}
