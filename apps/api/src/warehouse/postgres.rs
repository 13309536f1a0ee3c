use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use tracing::info;

use crate::warehouse::{ChatLogEntry, ChatLogSink, WarehouseStatus};

const CREATE_CHAT_LOGS: &str = r#"
    CREATE TABLE IF NOT EXISTS chat_logs (
        id      BIGSERIAL PRIMARY KEY,
        user_id BIGINT      NOT NULL,
        role    TEXT        NOT NULL,
        message TEXT        NOT NULL,
        ts      TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// PostgreSQL-backed chat log. Creates `chat_logs` on first use.
pub struct PgChatLog {
    pool: PgPool,
    schema: OnceCell<()>,
}

impl PgChatLog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: OnceCell::new(),
        }
    }

    async fn ensure_schema(&self) -> anyhow::Result<()> {
        self.schema
            .get_or_try_init(|| async {
                sqlx::query(CREATE_CHAT_LOGS)
                    .execute(&self.pool)
                    .await
                    .context("failed to create chat_logs table")?;
                info!("Warehouse connected; chat_logs table ensured");
                Ok::<(), anyhow::Error>(())
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ChatLogSink for PgChatLog {
    async fn record(&self, entry: &ChatLogEntry) -> anyhow::Result<()> {
        self.ensure_schema().await?;

        sqlx::query("INSERT INTO chat_logs (user_id, role, message) VALUES ($1, $2, $3)")
            .bind(entry.user_id)
            .bind(entry.role.as_str())
            .bind(&entry.message)
            .execute(&self.pool)
            .await
            .context("failed to insert chat log")?;

        Ok(())
    }

    async fn status(&self) -> anyhow::Result<WarehouseStatus> {
        self.ensure_schema().await?;

        let chat_logs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_logs")
            .fetch_one(&self.pool)
            .await
            .context("failed to count chat logs")?;

        Ok(WarehouseStatus::Connected { chat_logs })
    }
}
