// Feature-vector assembly for the grading model.

use crate::gamelog::AggregatedStats;
use crate::roster::{Position, RosterEntry, TRACKED_POSITIONS};

/// Roster occupancy per tracked position, in the fixed
/// {QB, RB, WR, TE, K, DEF} order. The counts are the scarcity signal: the
/// fewer entries a roster holds at a position, the higher the need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionNeed {
    counts: [u32; 6],
}

impl PositionNeed {
    /// Count roster entries per tracked position. Entries at positions
    /// outside the six tracked ones are ignored.
    pub fn from_roster(roster: &[RosterEntry]) -> Self {
        let mut counts = [0u32; 6];
        for entry in roster {
            if let Some(pos) = entry.position() {
                counts[pos.tracked_index()] += 1;
            }
        }
        Self { counts }
    }

    pub fn count(&self, position: Position) -> u32 {
        self.counts[position.tracked_index()]
    }

    /// The need-based target score for grading a player at `position`:
    /// ten minus the current occupancy at that position.
    pub fn target(&self, position: Position) -> f64 {
        10.0 - f64::from(self.count(position))
    }
}

/// Assemble the model input: six position counts in fixed order, with the
/// aggregated stat totals appended (in fixed order) only when stats are
/// available. The vector is 6 or 13 elements; the model is refit per call,
/// so the variable dimensionality is fine.
pub fn feature_vector(need: &PositionNeed, stats: Option<&AggregatedStats>) -> Vec<f64> {
    let mut features: Vec<f64> = TRACKED_POSITIONS
        .iter()
        .map(|&pos| f64::from(need.count(pos)))
        .collect();

    if let Some(stats) = stats {
        features.extend_from_slice(&[
            stats.pass_yds as f64,
            f64::from(stats.pass_td),
            stats.rush_yds as f64,
            f64::from(stats.rush_td),
            stats.rec_yds as f64,
            f64::from(stats.rec_td),
            f64::from(stats.games),
        ]);
    }

    features
}
