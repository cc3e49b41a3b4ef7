// Profile resolution and game-log retrieval from the reference site.
//
// Each fetch issues exactly one profile-index request and one game-log page
// request. There is no retry: a failed season is the caller's problem to
// skip, never a fatal error for the grading request.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::gamelog::parse::{parse_game_log, parse_profile_index, ProfileEntry};
use crate::gamelog::types::SeasonGameLog;
use crate::roster::PlayerIdentity;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    /// No profile in the index matched the player for the requested season.
    /// Equivalent to "no historical data", not a fault.
    #[error("no profile found for {player} in season {season}")]
    NotFound { player: String, season: u16 },

    /// Transport failure or non-success status from the upstream site.
    #[error("upstream request to {url} failed: {message}")]
    Upstream { url: String, message: String },

    /// The retrieved page did not have the expected shape.
    #[error("failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },
}

// ---------------------------------------------------------------------------
// Page source
// ---------------------------------------------------------------------------

/// Retrieves raw page bodies by URL. The production implementation is HTTP;
/// tests substitute a canned in-memory source.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get_page(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed page source with a request timeout and a browser-style
/// user agent (the reference site rejects default library agents).
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    pub fn from_config(source: &SourceConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(source.timeout_secs))
            .user_agent(source.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn get_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Upstream {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Upstream {
                url: url.to_string(),
                message: format!("status {status}"),
            });
        }

        response.text().await.map_err(|e| FetchError::Upstream {
            url: url.to_string(),
            message: format!("failed to read body: {e}"),
        })
    }
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Locates a player's profile and scrapes one season's game log.
pub struct GameLogFetcher<S: PageSource> {
    source: S,
    base_url: String,
}

impl<S: PageSource> GameLogFetcher<S> {
    pub fn new(source: S, base_url: impl Into<String>) -> Self {
        Self {
            source,
            base_url: base_url.into(),
        }
    }

    /// Fetch the season game log for `player`. Issues one index retrieval
    /// and one game-log retrieval; no retry on failure.
    pub async fn fetch(
        &self,
        player: &PlayerIdentity,
        season: u16,
    ) -> Result<SeasonGameLog, FetchError> {
        let href = self.resolve_profile(player, season).await?;

        let url = format!("{}{href}/gamelog/{season}/", self.base_url);
        debug!(player = %player, season, url, "retrieving game log page");
        let html = self.source.get_page(&url).await?;

        let rows = parse_game_log(&html, player.position).map_err(|e| FetchError::Parse {
            what: "game log table",
            message: e.to_string(),
        })?;

        info!(player = %player, season, games = rows.len(), "scraped season game log");
        Ok(SeasonGameLog::new(player.clone(), season, rows))
    }

    /// Resolve the player's profile href from the per-initial index page.
    ///
    /// A candidate matches when its printed active-seasons range contains
    /// `season`, its printed line contains the player's full name, and its
    /// position tag matches. The first match in document order wins; an
    /// ambiguous index (multiple qualifying entries) is logged, not resolved.
    async fn resolve_profile(
        &self,
        player: &PlayerIdentity,
        season: u16,
    ) -> Result<String, FetchError> {
        let Some(initial) = player.last_initial() else {
            warn!(player = %player, "player name has no last name, cannot resolve profile");
            return Err(FetchError::NotFound {
                player: player.name.clone(),
                season,
            });
        };

        let url = format!("{}/players/{initial}/", self.base_url);
        debug!(player = %player, url, "retrieving profile index");
        let html = self.source.get_page(&url).await?;

        let entries = parse_profile_index(&html).map_err(|e| FetchError::Parse {
            what: "profile index",
            message: e.to_string(),
        })?;

        let matches: Vec<&ProfileEntry> = entries
            .iter()
            .filter(|entry| entry_matches(entry, player, season))
            .collect();

        if matches.len() > 1 {
            warn!(
                player = %player,
                season,
                candidates = matches.len(),
                "ambiguous profile match, taking the first in index order"
            );
        }

        match matches.first() {
            Some(entry) => {
                debug!(player = %player, href = entry.href, "resolved profile");
                Ok(entry.href.clone())
            }
            None => Err(FetchError::NotFound {
                player: player.name.clone(),
                season,
            }),
        }
    }
}

/// Matching predicate for one index entry. The position is matched against
/// the parenthesized tag, not a raw substring: a bare "K" would match any
/// capital K in the printed name.
fn entry_matches(entry: &ProfileEntry, player: &PlayerIdentity, season: u16) -> bool {
    let Some((start, end)) = active_seasons(&entry.text) else {
        return false;
    };
    (start..=end).contains(&season)
        && entry.text.contains(&player.name)
        && entry
            .text
            .contains(&format!("({})", player.position.display_str()))
}

/// Parse the printed active-seasons range, the last whitespace token of an
/// index line (e.g. "Josh Allen (QB) 2018-2024" -> (2018, 2024)).
fn active_seasons(text: &str) -> Option<(u16, u16)> {
    let token = text.split_whitespace().next_back()?;
    let (start, end) = token.split_once('-')?;
    Some((start.parse().ok()?, end.parse().ok()?))
}
