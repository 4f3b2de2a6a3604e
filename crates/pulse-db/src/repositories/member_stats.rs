//! PostgreSQL implementation of MemberStatsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::{MemberActivity, MemberProfile};
use pulse_core::traits::{MemberStatsRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::{MemberActivityModel, MemberProfileModel};

use super::error::map_db_error;

/// PostgreSQL implementation of MemberStatsRepository
#[derive(Clone)]
pub struct PgMemberStatsRepository {
    pool: PgPool,
}

impl PgMemberStatsRepository {
    /// Create a new PgMemberStatsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStatsRepository for PgMemberStatsRepository {
    #[instrument(skip(self))]
    async fn activity_totals(&self, guild_id: &Snowflake) -> RepoResult<Vec<MemberActivity>> {
        let results = sqlx::query_as::<_, MemberActivityModel>(
            r#"
            SELECT guild_id, user_id, message_count, voice_minutes
            FROM guild_member_stats
            WHERE guild_id = $1
            "#,
        )
        .bind(guild_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MemberActivity::from).collect())
    }

    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    async fn find_profiles(
        &self,
        guild_id: &Snowflake,
        user_ids: &[Snowflake],
    ) -> RepoResult<Vec<MemberProfile>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = user_ids.iter().map(|id| id.as_str().to_string()).collect();

        let results = sqlx::query_as::<_, MemberProfileModel>(
            r#"
            SELECT user_id, username, display_name, avatar
            FROM members
            WHERE guild_id = $1 AND user_id = ANY($2)
            "#,
        )
        .bind(guild_id.as_str())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MemberProfile::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMemberStatsRepository>();
    }
}
