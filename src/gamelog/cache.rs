// On-disk cache of scraped season game logs.
//
// One CSV file per (player, season), keyed by the player's display name with
// whitespace collapsed to underscores plus the season year. Entries are never
// invalidated or expired: past-season logs are immutable upstream, so the
// store only grows. A cached season means the network is never consulted
// again for that key within the cache directory's lifetime.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::gamelog::types::{GameLogRow, SeasonGameLog};
use crate::roster::PlayerIdentity;

/// File-per-key store for season game logs.
pub struct GameLogCache {
    dir: PathBuf,
}

impl GameLogCache {
    /// Open the cache rooted at `dir`, creating the directory if absent.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create cache directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Path of the cache entry for this (player, season) key.
    fn entry_path(&self, player: &PlayerIdentity, season: u16) -> PathBuf {
        self.dir
            .join(format!("{}_{season}.csv", player.cache_stem()))
    }

    /// Look up a cached season. Returns `None` on a miss, and also on an
    /// unreadable or malformed entry: corruption is treated as a miss so the
    /// caller re-fetches and overwrites rather than failing the request.
    pub fn get(&self, player: &PlayerIdentity, season: u16) -> Option<SeasonGameLog> {
        let path = self.entry_path(player, season);
        if !path.exists() {
            return None;
        }

        match read_rows(&path) {
            Ok(rows) => {
                debug!(player = %player, season, rows = rows.len(), "cache hit");
                Some(SeasonGameLog::new(player.clone(), season, rows))
            }
            Err(e) => {
                warn!(
                    player = %player,
                    season,
                    error = %e,
                    "unreadable cache entry, treating as miss"
                );
                None
            }
        }
    }

    /// Persist a season game log under its (player, season) key, replacing
    /// any existing entry. The rows are written to a temporary file and
    /// renamed into place so a concurrent reader never observes a partial
    /// write.
    pub fn put(&self, log: &SeasonGameLog) -> Result<()> {
        let path = self.entry_path(&log.player, log.season);
        let tmp = path.with_extension("csv.tmp");

        write_rows(&tmp, &log.rows)
            .with_context(|| format!("failed to write cache entry {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to move cache entry into place at {}", path.display()))?;

        debug!(player = %log.player, season = log.season, rows = log.rows.len(), "cache write");
        Ok(())
    }

    /// Whether an entry exists for this key (readable or not).
    pub fn contains(&self, player: &PlayerIdentity, season: u16) -> bool {
        self.entry_path(player, season).exists()
    }
}

fn read_rows(path: &Path) -> Result<Vec<GameLogRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<GameLogRow>, _>>()?;
    Ok(rows)
}

fn write_rows(path: &Path, rows: &[GameLogRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
