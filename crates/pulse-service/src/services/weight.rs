//! Activity weight service
//!
//! Derives the guild-wide voice-vs-text weighting from the leveling
//! system's lifetime totals.

use tracing::instrument;

use pulse_core::entities::ActivityWeight;
use pulse_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Activity weight service
pub struct ActivityWeightService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityWeightService<'a> {
    /// Create a new ActivityWeightService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Compute the guild's current activity weight
    ///
    /// Always recomputed from the stats table; the weight is cheap to
    /// derive and must follow the totals as they move.
    #[instrument(skip(self))]
    pub async fn compute(&self, guild_id: &Snowflake) -> ServiceResult<ActivityWeight> {
        let members = self.ctx.member_stats_repo().activity_totals(guild_id).await?;
        Ok(ActivityWeight::from_members(&members))
    }
}
