// Structured game-log data as parsed from a player's per-season page.

use serde::{Deserialize, Serialize};

use crate::roster::PlayerIdentity;

/// One played game. Position-specific columns are `None` when the source
/// table does not carry them for the player's position (a kicker's rows have
/// no passing columns, etc.). Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogRow {
    pub date: String,
    pub week: u32,
    pub team: String,
    /// True when the game was played at home (no "@" marker upstream).
    pub home: bool,
    pub opponent: String,
    /// Result letter as printed: "W", "L", or "T".
    pub result: String,
    pub team_pts: u32,
    pub opp_pts: u32,

    // Passing
    pub pass_cmp: Option<u32>,
    pub pass_att: Option<u32>,
    pub pass_yds: Option<i32>,
    pub pass_td: Option<u32>,
    pub pass_int: Option<u32>,
    pub pass_rating: Option<f64>,
    pub sacked: Option<u32>,

    // Rushing
    pub rush_att: Option<u32>,
    pub rush_yds: Option<i32>,
    pub rush_td: Option<u32>,

    // Receiving
    pub targets: Option<u32>,
    pub receptions: Option<u32>,
    pub rec_yds: Option<i32>,
    pub rec_td: Option<u32>,
}

impl GameLogRow {
    /// A row with only the shared game columns filled in. Used by parsers as
    /// the starting point before position-specific extraction.
    pub fn base(
        date: String,
        week: u32,
        team: String,
        home: bool,
        opponent: String,
        result: String,
        team_pts: u32,
        opp_pts: u32,
    ) -> Self {
        Self {
            date,
            week,
            team,
            home,
            opponent,
            result,
            team_pts,
            opp_pts,
            pass_cmp: None,
            pass_att: None,
            pass_yds: None,
            pass_td: None,
            pass_int: None,
            pass_rating: None,
            sacked: None,
            rush_att: None,
            rush_yds: None,
            rush_td: None,
            targets: None,
            receptions: None,
            rec_yds: None,
            rec_td: None,
        }
    }
}

/// The ordered rows of one (player, season) pair, the unit of caching.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonGameLog {
    pub player: PlayerIdentity,
    pub season: u16,
    pub rows: Vec<GameLogRow>,
}

impl SeasonGameLog {
    pub fn new(player: PlayerIdentity, season: u16, rows: Vec<GameLogRow>) -> Self {
        Self {
            player,
            season,
            rows,
        }
    }

    pub fn games_played(&self) -> usize {
        self.rows.len()
    }
}
