//! 存储服务 HTTP 客户端
//!
//! 每个资产一次 `GET /fledge/asset/{asset}?limit=1`，只有 200 视为成功。

use anyhow::{anyhow, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use super::{FetchError, ReadingSource};
use crate::service::ServiceConfig;

/// 健康检查使用的轻量请求
const HEALTH_CHECK_PATH: &str = "/fledge/audit?limit=1";

/// 存储服务客户端
#[derive(Debug)]
pub struct StorageClient {
    client: reqwest::blocking::Client,
    config: ServiceConfig,
}

impl StorageClient {
    /// 创建客户端（不发起任何请求）
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    /// 当前使用的服务配置
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// 资产最新 reading 的 URL
    pub fn asset_url(&self, asset: &str) -> String {
        format!(
            "{}/fledge/asset/{}?limit=1",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(asset)
        )
    }

    /// 检查服务是否可达
    ///
    /// 只有传输层失败会返回错误；非 200 状态仅记录日志。
    pub fn health_check(&self) -> Result<()> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), HEALTH_CHECK_PATH);

        let response = self.client.get(&url).send().map_err(|e| {
            error!(url = %url, error = %e, "Failed to connect to server");
            anyhow!("Failed to connect to server {}: {}", self.config.base_url, e)
        })?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!(url = %url, "Storage service reachable");
        } else {
            let body = response.text().unwrap_or_default();
            handle_unexpected_response("Health check", status, &body);
        }

        Ok(())
    }
}

impl ReadingSource for StorageClient {
    fn fetch_latest(&self, asset: &str) -> Result<String, FetchError> {
        let url = self.asset_url(asset);
        debug!(asset = %asset, url = %url, "Fetching latest reading");

        let response = self.client.get(&url).send().map_err(|e| {
            error!(asset = %asset, error = %e, "Failed to fetch asset");
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FetchError::Body(e.to_string()))?;

        if status == StatusCode::OK {
            return Ok(body);
        }

        let message = handle_unexpected_response("Fetch readings", status, &body);
        Err(FetchError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// 记录非预期响应，返回响应体中的 `message`（如果有）
fn handle_unexpected_response(operation: &str, status: StatusCode, body: &str) -> Option<String> {
    // 只认 JSON 对象里的 `message` 字符串
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|doc| doc.get("message").and_then(Value::as_str).map(str::to_string));

    match &message {
        Some(message) => {
            info!("{} completed with result {}", operation, status);
            error!(status = %status, "{}: {}", operation, message);
        }
        None => {
            error!(status = %status, "{} completed with result {}", operation, status);
        }
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn client(base_url: &str) -> StorageClient {
        StorageClient::new(ServiceConfig {
            base_url: base_url.to_string(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_asset_url_encodes_name() {
        let c = client("http://localhost:8081");
        assert_eq!(c.asset_url("sinusoid"), "http://localhost:8081/fledge/asset/sinusoid?limit=1");
        assert_eq!(
            c.asset_url("line 1/temp"),
            "http://localhost:8081/fledge/asset/line%201%2Ftemp?limit=1"
        );
    }

    #[test]
    fn test_asset_url_trims_trailing_slash() {
        let c = client("http://fledge:8081/");
        assert_eq!(c.asset_url("a"), "http://fledge:8081/fledge/asset/a?limit=1");
    }

    #[test]
    fn test_unexpected_response_extracts_message() {
        let message = handle_unexpected_response(
            "Fetch readings",
            StatusCode::NOT_FOUND,
            r#"{"message": "No such asset"}"#,
        );
        assert_eq!(message.as_deref(), Some("No such asset"));

        let message = handle_unexpected_response("Fetch readings", StatusCode::BAD_GATEWAY, "<html>");
        assert!(message.is_none());

        let message = handle_unexpected_response("Fetch readings", StatusCode::BAD_REQUEST, r#"{"error": 1}"#);
        assert!(message.is_none());

        // 数组不是带 message 字段的对象
        let message = handle_unexpected_response(
            "Fetch readings",
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"["not a message field"]"#,
        );
        assert!(message.is_none());

        let message = handle_unexpected_response(
            "Fetch readings",
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message": 7}"#,
        );
        assert!(message.is_none());
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unexpected_response_without_message_logs_error() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            handle_unexpected_response("Fetch readings", StatusCode::BAD_GATEWAY, "<html>");
        });

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let line = output
            .lines()
            .find(|l| l.contains("Fetch readings completed with result 502 Bad Gateway"))
            .unwrap();
        assert!(line.contains("ERROR"), "unexpected log line: {}", line);
    }
}
