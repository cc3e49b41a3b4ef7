// Game-log acquisition pipeline: scrape, cache, aggregate.

pub mod aggregate;
pub mod cache;
pub mod fetch;
pub mod parse;
pub mod types;

pub use aggregate::{AggregatedStats, StatAggregator};
pub use cache::GameLogCache;
pub use fetch::{FetchError, GameLogFetcher, HttpPageSource, PageSource};
pub use types::{GameLogRow, SeasonGameLog};
