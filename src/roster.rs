// Player identity and roster representation.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Fantasy football positions tracked by the grading engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
}

/// All tracked positions in the fixed order used for feature-vector assembly.
/// The order is load-bearing: position counts are always emitted in this
/// sequence, whether or not a roster has entries at a position.
pub const TRACKED_POSITIONS: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
    Position::Kicker,
    Position::Defense,
];

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles Sleeper-style abbreviations: "QB", "RB", "WR", "TE", "K",
    /// and "DEF"/"DST" for team defense.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" => Some(Position::Kicker),
            "DEF" | "DST" => Some(Position::Defense),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
        }
    }

    /// Index of this position within `TRACKED_POSITIONS`.
    pub fn tracked_index(&self) -> usize {
        match self {
            Position::Quarterback => 0,
            Position::RunningBack => 1,
            Position::WideReceiver => 2,
            Position::TightEnd => 3,
            Position::Kicker => 4,
            Position::Defense => 5,
        }
    }

    /// Relative roster importance of this position. These weights motivate
    /// the need-based target score; they are not a direct multiplier in the
    /// fitted model.
    pub fn importance_weight(&self) -> f64 {
        match self {
            Position::Quarterback => 0.20,
            Position::RunningBack => 0.30,
            Position::WideReceiver => 0.30,
            Position::TightEnd => 0.10,
            Position::Kicker => 0.05,
            Position::Defense => 0.05,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Player identity
// ---------------------------------------------------------------------------

/// The name + position pair used for profile lookup and cache keying.
///
/// No numeric player ID is resolved anywhere in the pipeline: two distinct
/// real players who share an exact printed name and position collide. This
/// is a known limitation of name-based identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub name: String,
    pub position: Position,
}

impl PlayerIdentity {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// First letter of the player's last name, used as the profile index
    /// bucket. Returns `None` for single-word names, which cannot be
    /// resolved against the upstream index.
    pub fn last_initial(&self) -> Option<char> {
        self.name.split_whitespace().nth(1)?.chars().next()
    }

    /// Deterministic cache key stem: display name with whitespace replaced
    /// by underscores, case preserved.
    pub fn cache_stem(&self) -> String {
        self.name.split_whitespace().collect::<Vec<_>>().join("_")
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.position)
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// One player slot on a fantasy team as supplied by the calling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Display name of the rostered player. Optional: need counting only
    /// requires the position.
    #[serde(default)]
    pub player_name: Option<String>,
    /// Position string as reported by the platform (e.g. "QB", "DST").
    pub player_position: String,
}

impl RosterEntry {
    /// Parse the platform position string; entries outside the six tracked
    /// positions return `None` and are ignored for need counting.
    pub fn position(&self) -> Option<Position> {
        Position::from_str_pos(&self.player_position)
    }
}
