//! Connection service
//!
//! Cache-gated access to the voice and text connection buckets: checks
//! staleness, recomputes via the overlap calculator or interaction scorer,
//! persists with delete-then-insert semantics, and assembles the
//! presentation graph with member display info attached.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument};

use pulse_core::entities::{ConnectionGraph, TextConnection, VoiceConnection};
use pulse_core::value_objects::{Snowflake, TimeRange};

use crate::dto::{GraphMetric, GraphResponse, RecalculateResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::interaction::{compute_text_connections, AggregationStrategy};
use super::overlap::compute_voice_connections;
use super::staleness::is_stale;

/// Rows plus calculation metadata for one bucket read
pub struct BucketRead<T> {
    pub connections: Vec<T>,
    pub calculated_at: DateTime<Utc>,
    pub recomputed: bool,
}

/// Connection service
pub struct ConnectionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConnectionService<'a> {
    /// Create a new ConnectionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn max_age(&self, override_hours: Option<i64>) -> i64 {
        override_hours.unwrap_or(self.ctx.analytics().max_age_hours)
    }

    // =========================================================================
    // Graph reads
    // =========================================================================

    /// Voice connection graph for a guild and time range
    ///
    /// Recomputes first when the bucket is stale; `is_stale` in the
    /// response tells the caller a recompute ran during this request.
    #[instrument(skip(self))]
    pub async fn voice_graph(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        max_age_hours: Option<i64>,
    ) -> ServiceResult<GraphResponse> {
        let read = self
            .voice_bucket(guild_id, range, self.max_age(max_age_hours), false)
            .await?;

        let graph = ConnectionGraph::build(&read.connections);
        self.into_graph_response(guild_id, range, GraphMetric::SharedSeconds, graph, &read)
            .await
    }

    /// Text connection graph for a guild and time range
    #[instrument(skip(self))]
    pub async fn text_graph(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        max_age_hours: Option<i64>,
    ) -> ServiceResult<GraphResponse> {
        let read = self
            .text_bucket(guild_id, range, self.max_age(max_age_hours), false)
            .await?;

        let graph = ConnectionGraph::build(&read.connections);
        self.into_graph_response(guild_id, range, GraphMetric::InteractionScore, graph, &read)
            .await
    }

    async fn into_graph_response<T>(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        metric: GraphMetric,
        graph: ConnectionGraph,
        read: &BucketRead<T>,
    ) -> ServiceResult<GraphResponse> {
        let node_ids: Vec<Snowflake> = graph.nodes.iter().map(|n| n.user_id.clone()).collect();
        let profiles = self
            .ctx
            .profile_cache()
            .load_profiles(self.ctx.member_stats_repo(), guild_id, &node_ids)
            .await?;

        Ok(GraphResponse::new(
            range,
            metric,
            graph,
            &profiles,
            read.calculated_at,
            read.recomputed,
        ))
    }

    // =========================================================================
    // Forced recomputation
    // =========================================================================

    /// Recompute the voice bucket regardless of its age
    ///
    /// Idempotent: a second run over unchanged data is a no-op in effect.
    #[instrument(skip(self))]
    pub async fn recalculate_voice(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> ServiceResult<RecalculateResponse> {
        let now = Utc::now();
        let connections = self.compute_and_store_voice(guild_id, range, now).await?;
        Ok(RecalculateResponse::new(range, connections.len(), now))
    }

    /// Recompute the text bucket regardless of its age
    #[instrument(skip(self))]
    pub async fn recalculate_text(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> ServiceResult<RecalculateResponse> {
        let now = Utc::now();
        let connections = self.compute_and_store_text(guild_id, range, now).await?;
        Ok(RecalculateResponse::new(range, connections.len(), now))
    }

    // =========================================================================
    // Bucket access (shared with the friend ranker)
    // =========================================================================

    /// Read the voice bucket, recomputing first when stale or forced
    pub(crate) async fn voice_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        max_age_hours: i64,
        force: bool,
    ) -> ServiceResult<BucketRead<VoiceConnection>> {
        // One `now` for the whole pass keeps the window bounds and open
        // session ends internally consistent.
        let now = Utc::now();
        let last = self
            .ctx
            .voice_connection_repo()
            .last_calculated(guild_id, range)
            .await?;

        if force || is_stale(last, max_age_hours, now) {
            let connections = self.compute_and_store_voice(guild_id, range, now).await?;
            return Ok(BucketRead {
                connections,
                calculated_at: now,
                recomputed: true,
            });
        }

        let connections = self
            .ctx
            .voice_connection_repo()
            .fetch_bucket(guild_id, range)
            .await?;
        Ok(BucketRead {
            connections,
            calculated_at: last.unwrap_or(now),
            recomputed: false,
        })
    }

    /// Read the text bucket, recomputing first when stale or forced
    pub(crate) async fn text_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        max_age_hours: i64,
        force: bool,
    ) -> ServiceResult<BucketRead<TextConnection>> {
        let now = Utc::now();
        let last = self
            .ctx
            .text_connection_repo()
            .last_calculated(guild_id, range)
            .await?;

        if force || is_stale(last, max_age_hours, now) {
            let connections = self.compute_and_store_text(guild_id, range, now).await?;
            return Ok(BucketRead {
                connections,
                calculated_at: now,
                recomputed: true,
            });
        }

        let connections = self
            .ctx
            .text_connection_repo()
            .fetch_bucket(guild_id, range)
            .await?;
        Ok(BucketRead {
            connections,
            calculated_at: last.unwrap_or(now),
            recomputed: false,
        })
    }

    // =========================================================================
    // Recompute passes
    // =========================================================================

    async fn compute_and_store_voice(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<VoiceConnection>> {
        let sessions = self
            .ctx
            .voice_session_repo()
            .find_by_guild(guild_id, range.cutoff(now))
            .await?;

        let connections = compute_voice_connections(&sessions, now);

        self.ctx
            .voice_connection_repo()
            .replace_bucket(guild_id, range, &connections, now)
            .await?;

        info!(
            guild_id = %guild_id,
            range = %range,
            sessions = sessions.len(),
            connections = connections.len(),
            "Voice connections recalculated"
        );

        Ok(connections)
    }

    async fn compute_and_store_text(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<TextConnection>> {
        let window_secs = self.ctx.analytics().proximity_window_secs;
        let since = range.cutoff(now);

        let remote_available = self.ctx.text_connection_repo().aggregation_available().await?;
        let strategy = AggregationStrategy::from_probe(remote_available);

        let connections = match strategy {
            AggregationStrategy::RemoteProcedure => {
                self.ctx
                    .text_connection_repo()
                    .aggregate_remote(guild_id, since, window_secs)
                    .await?
            }
            AggregationStrategy::LocalFallback => {
                debug!(guild_id = %guild_id, "Aggregation procedure absent; scoring locally");
                let events = self
                    .ctx
                    .message_event_repo()
                    .find_by_guild(guild_id, since)
                    .await?;
                compute_text_connections(&events, Duration::seconds(window_secs))
            }
        };

        self.ctx
            .text_connection_repo()
            .replace_bucket(guild_id, range, &connections, now)
            .await?;

        info!(
            guild_id = %guild_id,
            range = %range,
            strategy = ?strategy,
            connections = connections.len(),
            "Text connections recalculated"
        );

        Ok(connections)
    }
}
