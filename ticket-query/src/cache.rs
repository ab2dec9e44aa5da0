//! Caching layer for ticket query results.
//!
//! Ticket counts change quickly, so entries live for a short TTL only. The
//! cache exists to absorb bursts of identical queries from the HTTP surface;
//! the underlying [`TicketQuery`] is never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::TravelDate;
use crate::query::{TicketError, TicketQuery};
use crate::upstream::LeftTicketClient;

/// Cache key: (date, from name, to name).
type QueryKey = (TravelDate, String, String);

/// Cached candidate list.
type QueryEntry = Arc<Vec<String>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Ticket query runner with caching of filtered results.
pub struct CachedTicketQuery {
    query: TicketQuery<LeftTicketClient>,
    trains: MokaCache<QueryKey, QueryEntry>,
}

impl CachedTicketQuery {
    /// Create a new cached runner.
    pub fn new(query: TicketQuery<LeftTicketClient>, config: &CacheConfig) -> Self {
        let trains = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { query, trains }
    }

    /// Filtered train names, using the cache if available.
    ///
    /// Errors are not cached.
    pub async fn filtered_trains(
        &self,
        date: TravelDate,
        from: &str,
        to: &str,
    ) -> Result<QueryEntry, TicketError> {
        let key = (date, from.to_string(), to.to_string());

        if let Some(cached) = self.trains.get(&key).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.query.filtered_trains(date, from, to).await?);
        self.trains.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying runner for operations that bypass cache.
    pub fn query(&self) -> &TicketQuery<LeftTicketClient> {
        &self.query
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.trains.entry_count()
    }
}
