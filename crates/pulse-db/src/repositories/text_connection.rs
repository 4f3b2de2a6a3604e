//! PostgreSQL implementation of TextConnectionRepository
//!
//! Besides the bucket store this repository binds the optional
//! `text_interaction_pairs` procedure (see `sql/text_interaction_pairs.sql`).
//! Deployments without the procedure answer the capability probe with
//! `false` and the service computes interactions locally instead.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::TextConnection;
use pulse_core::traits::{RepoResult, TextConnectionRepository};
use pulse_core::value_objects::{PairKey, Snowflake, TimeRange};

use crate::mappers::{text_connection_from_model, TextConnectionInsert};
use crate::models::TextConnectionModel;

use super::error::map_db_error;

/// Row shape returned by the text_interaction_pairs procedure
#[derive(Debug, sqlx::FromRow)]
struct AggregatedPairRow {
    user_id_lo: String,
    user_id_hi: String,
    interaction_score: f64,
    message_count: i64,
    shared_channel_count: i64,
}

/// PostgreSQL implementation of TextConnectionRepository
#[derive(Clone)]
pub struct PgTextConnectionRepository {
    pool: PgPool,
}

impl PgTextConnectionRepository {
    /// Create a new PgTextConnectionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TextConnectionRepository for PgTextConnectionRepository {
    #[instrument(skip(self))]
    async fn last_calculated(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Option<DateTime<Utc>>> {
        let result = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT calculated_at FROM connection_buckets
            WHERE guild_id = $1 AND scope = 'text' AND time_range = $2
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
    ) -> RepoResult<Vec<TextConnection>> {
        let results = sqlx::query_as::<_, TextConnectionModel>(
            r#"
            SELECT guild_id, time_range, user_id_lo, user_id_hi,
                   interaction_score, message_count, shared_channel_count
            FROM text_connections
            WHERE guild_id = $1 AND time_range = $2
            ORDER BY user_id_lo, user_id_hi
            "#,
        )
        .bind(guild_id.as_str())
        .bind(range.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(text_connection_from_model).collect()
    }

    #[instrument(skip(self, connections), fields(rows = connections.len()))]
    async fn replace_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        connections: &[TextConnection],
        calculated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            DELETE FROM text_connections WHERE guild_id = $1 AND time_range = $2
            "#,
        )
        .bind(guild_id.as_str())
        .bind(range.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for connection in connections {
            let insert = TextConnectionInsert::new(connection);
            sqlx::query(
                r#"
                INSERT INTO text_connections
                    (guild_id, time_range, user_id_lo, user_id_hi,
                     interaction_score, message_count, shared_channel_count)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(guild_id.as_str())
            .bind(range.as_str())
            .bind(&insert.user_id_lo)
            .bind(&insert.user_id_hi)
            .bind(insert.interaction_score)
            .bind(insert.message_count)
            .bind(insert.shared_channel_count)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        sqlx::query(
            r#"
            INSERT INTO connection_buckets (guild_id, scope, time_range, calculated_at)
            VALUES ($1, 'text', $2, $3)
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

    #[instrument(skip(self))]
    async fn aggregation_available(&self) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM pg_proc WHERE proname = 'text_interaction_pairs')
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn aggregate_remote(
        &self,
        guild_id: &Snowflake,
        since: Option<DateTime<Utc>>,
        window_secs: i64,
    ) -> RepoResult<Vec<TextConnection>> {
        let rows = sqlx::query_as::<_, AggregatedPairRow>(
            r#"
            SELECT user_id_lo, user_id_hi, interaction_score, message_count, shared_channel_count
            FROM text_interaction_pairs($1, $2, $3)
            "#,
        )
        .bind(guild_id.as_str())
        .bind(since)
        .bind(window_secs)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(|row| {
                let pair = PairKey::from_canonical(
                    Snowflake::new(row.user_id_lo),
                    Snowflake::new(row.user_id_hi),
                )
                .ok_or_else(|| {
                    pulse_core::DomainError::DatastoreError(
                        "non-canonical pair from aggregation procedure".to_string(),
                    )
                })?;

                Ok(TextConnection {
                    pair,
                    interaction_score: row.interaction_score,
                    message_count: row.message_count,
                    shared_channel_count: row.shared_channel_count,
                })
            })
            .collect()
    }
}
