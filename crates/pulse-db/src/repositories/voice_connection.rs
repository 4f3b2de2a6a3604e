//! PostgreSQL implementation of VoiceConnectionRepository
//!
//! Bucket replacement is delete-then-insert inside one transaction, which
//! keeps concurrent recomputations of the same bucket idempotent.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::VoiceConnection;
use pulse_core::traits::{RepoResult, VoiceConnectionRepository};
use pulse_core::value_objects::{Snowflake, TimeRange};

use crate::mappers::{voice_connection_from_model, VoiceConnectionInsert};
use crate::models::VoiceConnectionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of VoiceConnectionRepository
#[derive(Clone)]
pub struct PgVoiceConnectionRepository {
    pool: PgPool,
}

impl PgVoiceConnectionRepository {
    /// Create a new PgVoiceConnectionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoiceConnectionRepository for PgVoiceConnectionRepository {
    #[instrument(skip(self))]
    async fn last_calculated(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Option<DateTime<Utc>>> {
        let result = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT calculated_at FROM connection_buckets
            WHERE guild_id = $1 AND scope = 'voice' AND time_range = $2
            "#,
        )
        .bind(guild_id.as_str())
        .bind(range.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn fetch_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Vec<VoiceConnection>> {
        let results = sqlx::query_as::<_, VoiceConnectionModel>(
            r#"
            SELECT guild_id, time_range, user_id_lo, user_id_hi, shared_seconds, session_count
            FROM voice_connections
            WHERE guild_id = $1 AND time_range = $2
            ORDER BY user_id_lo, user_id_hi
            "#,
        )
        .bind(guild_id.as_str())
        .bind(range.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(voice_connection_from_model).collect()
    }

    #[instrument(skip(self, connections), fields(rows = connections.len()))]
    async fn replace_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        connections: &[VoiceConnection],
        calculated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            DELETE FROM voice_connections WHERE guild_id = $1 AND time_range = $2
            "#,
        )
        .bind(guild_id.as_str())
        .bind(range.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for connection in connections {
            let insert = VoiceConnectionInsert::new(connection);
            sqlx::query(
                r#"
                INSERT INTO voice_connections
                    (guild_id, time_range, user_id_lo, user_id_hi, shared_seconds, session_count)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(guild_id.as_str())
            .bind(range.as_str())
            .bind(&insert.user_id_lo)
            .bind(&insert.user_id_hi)
            .bind(insert.shared_seconds)
            .bind(insert.session_count)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        sqlx::query(
            r#"
            INSERT INTO connection_buckets (guild_id, scope, time_range, calculated_at)
            VALUES ($1, 'voice', $2, $3)
            ON CONFLICT (guild_id, scope, time_range) DO UPDATE SET calculated_at = $3
            "#,
        )
        .bind(guild_id.as_str())
        .bind(range.as_str())
        .bind(calculated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
