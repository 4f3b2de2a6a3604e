//! PostgreSQL implementation of VoiceSessionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::VoiceSession;
use pulse_core::traits::{RepoResult, VoiceSessionRepository};
use pulse_core::value_objects::Snowflake;

use crate::models::VoiceSessionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of VoiceSessionRepository
#[derive(Clone)]
pub struct PgVoiceSessionRepository {
    pool: PgPool,
}

impl PgVoiceSessionRepository {
    /// Create a new PgVoiceSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoiceSessionRepository for PgVoiceSessionRepository {
    #[instrument(skip(self))]
    async fn find_by_guild(
        &self,
        guild_id: &Snowflake,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<VoiceSession>> {
        let results = match since {
            Some(cutoff) => {
                sqlx::query_as::<_, VoiceSessionModel>(
                    r#"
                    SELECT guild_id, user_id, channel_id, joined_at, left_at
                    FROM voice_sessions
                    WHERE guild_id = $1 AND joined_at >= $2
                    ORDER BY channel_id, joined_at
                    "#,
                )
                .bind(guild_id.as_str())
                .bind(cutoff)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, VoiceSessionModel>(
                    r#"
                    SELECT guild_id, user_id, channel_id, joined_at, left_at
                    FROM voice_sessions
                    WHERE guild_id = $1
                    ORDER BY channel_id, joined_at
                    "#,
                )
                .bind(guild_id.as_str())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(VoiceSession::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_guild_user(
        &self,
        guild_id: &Snowflake,
        user_id: &Snowflake,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<VoiceSession>> {
        let results = match since {
            Some(cutoff) => {
                sqlx::query_as::<_, VoiceSessionModel>(
                    r#"
                    SELECT guild_id, user_id, channel_id, joined_at, left_at
                    FROM voice_sessions
                    WHERE guild_id = $1 AND user_id = $2 AND joined_at >= $3
                    ORDER BY joined_at
                    "#,
                )
                .bind(guild_id.as_str())
                .bind(user_id.as_str())
                .bind(cutoff)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, VoiceSessionModel>(
                    r#"
                    SELECT guild_id, user_id, channel_id, joined_at, left_at
                    FROM voice_sessions
                    WHERE guild_id = $1 AND user_id = $2
                    ORDER BY joined_at
                    "#,
                )
                .bind(guild_id.as_str())
                .bind(user_id.as_str())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(VoiceSession::from).collect())
    }

    #[instrument(skip(self))]
    async fn has_active_session(&self, guild_id: &Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM voice_sessions WHERE guild_id = $1 AND left_at IS NULL)
            "#,
        )
        .bind(guild_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}
