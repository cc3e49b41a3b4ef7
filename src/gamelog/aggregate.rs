// Multi-season stat aggregation with cache-first reads.
//
// Seasons are processed in ascending order, one at a time. The cache is
// consulted before every fetch, and a fixed delay separates consecutive
// network requests to stay inside the reference site's informal rate limits.
// Cache hits incur no delay.

use std::ops::RangeInclusive;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::gamelog::cache::GameLogCache;
use crate::gamelog::fetch::{GameLogFetcher, PageSource};
use crate::gamelog::types::GameLogRow;
use crate::roster::PlayerIdentity;

/// Per-category totals across a season range for one player. Columns the
/// player's position does not carry contribute zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregatedStats {
    pub pass_yds: i64,
    pub pass_td: u32,
    pub rush_yds: i64,
    pub rush_td: u32,
    pub rec_yds: i64,
    pub rec_td: u32,
    pub games: u32,
}

impl AggregatedStats {
    /// Sum a batch of game rows. Returns `None` for an empty batch: no rows
    /// means no performance data, not a zero-stat season.
    pub fn from_rows(rows: &[GameLogRow]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let mut stats = AggregatedStats::default();
        for row in rows {
            stats.pass_yds += i64::from(row.pass_yds.unwrap_or(0));
            stats.pass_td += row.pass_td.unwrap_or(0);
            stats.rush_yds += i64::from(row.rush_yds.unwrap_or(0));
            stats.rush_td += row.rush_td.unwrap_or(0);
            stats.rec_yds += i64::from(row.rec_yds.unwrap_or(0));
            stats.rec_td += row.rec_td.unwrap_or(0);
            stats.games += 1;
        }
        Some(stats)
    }
}

/// Collects and sums game logs across a season range, filling the cache as
/// it goes.
pub struct StatAggregator<S: PageSource> {
    cache: GameLogCache,
    fetcher: GameLogFetcher<S>,
    fetch_delay: Duration,
}

impl<S: PageSource> StatAggregator<S> {
    pub fn new(cache: GameLogCache, fetcher: GameLogFetcher<S>, fetch_delay: Duration) -> Self {
        Self {
            cache,
            fetcher,
            fetch_delay,
        }
    }

    /// Aggregate stats over the inclusive season range.
    ///
    /// Returns `None` without touching the network for an empty (rookie)
    /// range, and `None` when every season fails or yields no rows. A season
    /// that fails to fetch is skipped with a warning; one bad season never
    /// fails the aggregate.
    pub async fn collect(
        &self,
        player: &PlayerIdentity,
        seasons: RangeInclusive<u16>,
    ) -> Option<AggregatedStats> {
        if seasons.is_empty() {
            debug!(player = %player, "empty season range (rookie), no stats to collect");
            return None;
        }

        let mut rows: Vec<GameLogRow> = Vec::new();
        let mut fetched_from_network = false;

        for season in seasons {
            if let Some(log) = self.cache.get(player, season) {
                rows.extend(log.rows);
                continue;
            }

            // Rate-limit pause between consecutive network requests only.
            if fetched_from_network {
                tokio::time::sleep(self.fetch_delay).await;
            }
            fetched_from_network = true;

            match self.fetcher.fetch(player, season).await {
                Ok(log) => {
                    if let Err(e) = self.cache.put(&log) {
                        warn!(player = %player, season, error = %e, "failed to cache season");
                    }
                    rows.extend(log.rows);
                }
                Err(e) => {
                    warn!(player = %player, season, error = %e, "season unavailable, skipping");
                }
            }
        }

        let stats = AggregatedStats::from_rows(&rows);
        match &stats {
            Some(s) => info!(player = %player, games = s.games, "aggregated season stats"),
            None => info!(player = %player, "no usable season data, grading without stats"),
        }
        stats
    }
}
