//! Member profile cache
//!
//! Process-wide cache for member display info, constructed at startup and
//! injected through the service context rather than living in a static.
//! Each `(guild, user)` key resolves at most once concurrently: the first
//! caller fetches, everyone else awaits the same cell.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::instrument;

use pulse_core::entities::MemberProfile;
use pulse_core::traits::{MemberStatsRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

type Key = (Snowflake, Snowflake);
type Cell = Arc<OnceCell<Option<MemberProfile>>>;

/// Concurrent member profile cache
#[derive(Default)]
pub struct ProfileCache {
    entries: DashMap<Key, Cell>,
}

impl ProfileCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of resolved or in-flight entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn cell(&self, guild_id: &Snowflake, user_id: &Snowflake) -> Cell {
        self.entries
            .entry((guild_id.clone(), user_id.clone()))
            .or_default()
            .clone()
    }

    /// Get one profile, fetching through the repository on first use
    ///
    /// Unknown members cache as `None` so they are not re-fetched per
    /// request.
    pub async fn get_or_fetch(
        &self,
        repo: &dyn MemberStatsRepository,
        guild_id: &Snowflake,
        user_id: &Snowflake,
    ) -> RepoResult<Option<MemberProfile>> {
        let cell = self.cell(guild_id, user_id);
        let profile = cell
            .get_or_try_init(|| async {
                let mut profiles = repo
                    .find_profiles(guild_id, std::slice::from_ref(user_id))
                    .await?;
                Ok(profiles.pop())
            })
            .await?;
        Ok(profile.clone())
    }

    /// Resolve many profiles, bulk-fetching the ones not yet cached
    ///
    /// Returns a map keyed by user id; unknown members are absent.
    #[instrument(skip(self, repo, user_ids), fields(requested = user_ids.len()))]
    pub async fn load_profiles(
        &self,
        repo: &dyn MemberStatsRepository,
        guild_id: &Snowflake,
        user_ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, MemberProfile>> {
        let mut resolved: HashMap<Snowflake, MemberProfile> = HashMap::new();
        let mut missing: Vec<Snowflake> = Vec::new();

        for user_id in user_ids {
            let cell = self.cell(guild_id, user_id);
            match cell.get() {
                Some(Some(profile)) => {
                    resolved.insert(user_id.clone(), profile.clone());
                }
                Some(None) => {}
                None => missing.push(user_id.clone()),
            }
        }

        if missing.is_empty() {
            return Ok(resolved);
        }

        let fetched = repo.find_profiles(guild_id, &missing).await?;
        let mut fetched_by_id: HashMap<Snowflake, MemberProfile> = fetched
            .into_iter()
            .map(|profile| (profile.user_id.clone(), profile))
            .collect();

        for user_id in missing {
            let profile = fetched_by_id.remove(&user_id);
            let cell = self.cell(guild_id, &user_id);
            // A concurrent fetch may have won the race; keep its value.
            let _ = cell.set(profile.clone());
            if let Some(Some(profile)) = cell.get() {
                resolved.insert(user_id, profile.clone());
            } else if let Some(profile) = profile {
                resolved.insert(user_id, profile);
            }
        }

        Ok(resolved)
    }
}

impl std::fmt::Debug for ProfileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}
