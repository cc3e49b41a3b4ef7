// Player grader entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Parse and validate the grading request from CLI arguments
// 3. Load config
// 4. Open the game-log cache and build the acquisition pipeline
// 5. Aggregate, grade, print

use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::Datelike;
use tracing::info;

use player_grader::config;
use player_grader::gamelog::{GameLogCache, GameLogFetcher, HttpPageSource, StatAggregator};
use player_grader::grading::PlayerGrader;
use player_grader::roster::{PlayerIdentity, Position, RosterEntry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("player grader starting up");

    let request = GradeRequest::from_args(std::env::args().skip(1))
        .context("invalid grading request")?;
    info!(
        "grading {} against a {}-player roster, seasons {}-{}",
        request.player,
        request.roster.len(),
        request.seasons.start(),
        request.seasons.end()
    );

    let config = config::load_config().context("failed to load configuration")?;

    let cache = GameLogCache::open(&config.cache.dir).context("failed to open game-log cache")?;
    let source =
        HttpPageSource::from_config(&config.source).context("failed to build HTTP client")?;
    let fetcher = GameLogFetcher::new(source, config.source.base_url.clone());
    let aggregator = StatAggregator::new(
        cache,
        fetcher,
        Duration::from_secs(config.fetch.delay_secs),
    );
    let grader = PlayerGrader::new(aggregator);

    let grade = grader
        .grade(&request.player, &request.roster, request.seasons.clone())
        .await;

    println!("Grade: {grade:.2}/10");
    Ok(())
}

// ---------------------------------------------------------------------------
// Request parsing
// ---------------------------------------------------------------------------

/// A validated grading request assembled from CLI arguments.
#[derive(Debug)]
struct GradeRequest {
    player: PlayerIdentity,
    roster: Vec<RosterEntry>,
    seasons: RangeInclusive<u16>,
}

const USAGE: &str = "usage: gridiron --player <name> --position <QB|RB|WR|TE|K|DEF> \
                     --roster <roster.json> [--seasons <start-end> | --rookie]";

impl GradeRequest {
    /// Parse flags into a request. Missing player name, unparsable position,
    /// or an unreadable roster file are the only errors this binary surfaces;
    /// everything downstream degrades to a need-only grade instead of
    /// failing.
    fn from_args(args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut name: Option<String> = None;
        let mut position: Option<String> = None;
        let mut roster_path: Option<String> = None;
        let mut seasons_arg: Option<String> = None;
        let mut rookie = false;

        let mut args = args;
        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--player" => name = args.next(),
                "--position" => position = args.next(),
                "--roster" => roster_path = args.next(),
                "--seasons" => seasons_arg = args.next(),
                "--rookie" => rookie = true,
                other => bail!("unknown argument `{other}`\n{USAGE}"),
            }
        }

        let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
            bail!("player name is required\n{USAGE}");
        };
        let Some(position) = position.and_then(|p| Position::from_str_pos(&p)) else {
            bail!("a valid position is required\n{USAGE}");
        };
        let Some(roster_path) = roster_path else {
            bail!("a roster file is required\n{USAGE}");
        };

        let roster_text = std::fs::read_to_string(&roster_path)
            .with_context(|| format!("failed to read roster file {roster_path}"))?;
        let roster: Vec<RosterEntry> = serde_json::from_str(&roster_text)
            .with_context(|| format!("failed to parse roster file {roster_path}"))?;
        if roster.is_empty() {
            bail!("roster must not be empty\n{USAGE}");
        }

        let seasons = resolve_seasons(seasons_arg.as_deref(), rookie)?;

        Ok(Self {
            player: PlayerIdentity::new(name, position),
            roster,
            seasons,
        })
    }
}

/// Resolve the season range: an explicit `start-end` argument, the empty
/// rookie range, or the last three completed seasons by default.
fn resolve_seasons(arg: Option<&str>, rookie: bool) -> anyhow::Result<RangeInclusive<u16>> {
    let current_year = chrono::Utc::now().year() as u16;

    if rookie {
        // Inverted range: the aggregator treats it as "no history".
        return Ok(current_year..=current_year - 1);
    }

    match arg {
        Some(text) => {
            let Some((start, end)) = text.split_once('-') else {
                bail!("seasons must look like 2021-2023, got `{text}`");
            };
            let start: u16 = start.parse().context("invalid start season")?;
            let end: u16 = end.parse().context("invalid end season")?;
            if start > end {
                bail!("season range start {start} is after end {end}");
            }
            Ok(start..=end)
        }
        None => Ok(current_year - 3..=current_year - 1),
    }
}

/// Initialize tracing to log to a file (keeps stdout clean for the grade).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("gridiron.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("player_grader=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
