//! Chat-log warehouse — optional, best-effort persistence of chat turns.
//!
//! Writes never block or fail a request: they run on a detached task and
//! errors are only logged.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::models::conversation::Role;

pub mod handlers;
pub mod postgres;

/// Longest message stored, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLogEntry {
    pub user_id: i64,
    pub role: Role,
    pub message: String,
}

impl ChatLogEntry {
    /// Messages longer than `MAX_MESSAGE_CHARS` are truncated.
    pub fn new(user_id: i64, role: Role, message: &str) -> Self {
        Self {
            user_id,
            role,
            message: message.chars().take(MAX_MESSAGE_CHARS).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "warehouse", rename_all = "snake_case")]
pub enum WarehouseStatus {
    Disabled { configured: bool },
    Connected { chat_logs: i64 },
}

/// Destination for chat logs. Carried in `AppState` as `Arc<dyn ChatLogSink>`.
#[async_trait]
pub trait ChatLogSink: Send + Sync {
    async fn record(&self, entry: &ChatLogEntry) -> anyhow::Result<()>;

    async fn status(&self) -> anyhow::Result<WarehouseStatus>;
}

/// Sink used when chat logging is switched off or no warehouse is configured.
pub struct DisabledChatLog {
    pub configured: bool,
}

#[async_trait]
impl ChatLogSink for DisabledChatLog {
    async fn record(&self, _entry: &ChatLogEntry) -> anyhow::Result<()> {
        Ok(())
    }

    async fn status(&self) -> anyhow::Result<WarehouseStatus> {
        Ok(WarehouseStatus::Disabled {
            configured: self.configured,
        })
    }
}

/// Writes `entries` in order on a detached task. Failures are logged and dropped.
pub fn log_in_background(sink: Arc<dyn ChatLogSink>, entries: Vec<ChatLogEntry>) -> JoinHandle<()> {
    tokio::spawn(async move {
        for entry in &entries {
            if let Err(e) = sink.record(entry).await {
                warn!(
                    "Chat log write skipped for user {} ({}): {e:#}",
                    entry.user_id,
                    entry.role.as_str()
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct FlakySink {
        written: Mutex<Vec<ChatLogEntry>>,
    }

    #[async_trait]
    impl ChatLogSink for FlakySink {
        async fn record(&self, entry: &ChatLogEntry) -> anyhow::Result<()> {
            if entry.role == Role::User {
                anyhow::bail!("warehouse unreachable");
            }
            self.written.lock().await.push(entry.clone());
            Ok(())
        }

        async fn status(&self) -> anyhow::Result<WarehouseStatus> {
            Ok(WarehouseStatus::Connected { chat_logs: 0 })
        }
    }

    #[test]
    fn test_entry_truncates_long_messages() {
        let long = "é".repeat(MAX_MESSAGE_CHARS + 10);
        let entry = ChatLogEntry::new(1, Role::User, &long);
        assert_eq!(entry.message.chars().count(), MAX_MESSAGE_CHARS);
    }

    #[tokio::test]
    async fn test_failed_write_does_not_stop_later_writes() {
        let sink = Arc::new(FlakySink::default());
        let handle = log_in_background(
            sink.clone(),
            vec![
                ChatLogEntry::new(1, Role::User, "question"),
                ChatLogEntry::new(1, Role::Assistant, "answer"),
            ],
        );
        handle.await.unwrap();

        let written = sink.written.lock().await;
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].message, "answer");
    }

    #[tokio::test]
    async fn test_disabled_sink_reports_configuration() {
        let sink = DisabledChatLog { configured: true };
        sink.record(&ChatLogEntry::new(1, Role::User, "x"))
            .await
            .unwrap();
        assert_eq!(
            sink.status().await.unwrap(),
            WarehouseStatus::Disabled { configured: true }
        );
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let value = serde_json::to_value(WarehouseStatus::Connected { chat_logs: 3 }).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"warehouse": "connected", "chat_logs": 3})
        );
    }
}
