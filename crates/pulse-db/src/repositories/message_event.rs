//! PostgreSQL implementation of MessageEventRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::MessageEvent;
use pulse_core::traits::{MessageEventRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::MessageEventModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageEventRepository
#[derive(Clone)]
pub struct PgMessageEventRepository {
    pool: PgPool,
}

impl PgMessageEventRepository {
    /// Create a new PgMessageEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageEventRepository for PgMessageEventRepository {
    #[instrument(skip(self))]
    async fn find_by_guild(
        &self,
        guild_id: &Snowflake,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<MessageEvent>> {
        // Ordered by channel then time; the scorer walks each channel's
        // messages with a sliding window and relies on this order.
        let results = match since {
            Some(cutoff) => {
                sqlx::query_as::<_, MessageEventModel>(
                    r#"
                    SELECT guild_id, user_id, channel_id, created_at
                    FROM message_events
                    WHERE guild_id = $1 AND created_at >= $2
                    ORDER BY channel_id, created_at
                    "#,
                )
                .bind(guild_id.as_str())
                .bind(cutoff)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, MessageEventModel>(
                    r#"
                    SELECT guild_id, user_id, channel_id, created_at
                    FROM message_events
                    WHERE guild_id = $1
                    ORDER BY channel_id, created_at
                    "#,
                )
                .bind(guild_id.as_str())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MessageEvent::from).collect())
    }
}
