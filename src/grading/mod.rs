// Need-adjusted player grading.
//
// The grader combines roster scarcity with aggregated historical performance:
// position counts (and stat totals, when available) form the feature vector,
// the scarcity-derived target is fit with a per-call linear regression, and
// the prediction is clipped into [0, 10]. A grade is always produced; when no
// performance data exists the grade degrades to positional need alone.

pub mod features;
pub mod model;

use std::ops::RangeInclusive;

use tracing::debug;

use crate::gamelog::{AggregatedStats, PageSource, StatAggregator};
use crate::grading::features::{feature_vector, PositionNeed};
use crate::grading::model::{clip_and_round, LinearModel};
use crate::roster::{PlayerIdentity, Position, RosterEntry};

/// Grade a player from roster need and optional aggregated stats.
///
/// This is the stateless core of the engine: fit a linear model on the
/// single (features, target) observation, predict on it, clip and round.
pub fn grade_from_stats(
    position: Position,
    roster: &[RosterEntry],
    stats: Option<&AggregatedStats>,
) -> f64 {
    let need = PositionNeed::from_roster(roster);
    let target = need.target(position);
    let features = feature_vector(&need, stats);

    let model = LinearModel::fit(&[features.clone()], &[target]);
    let prediction = model.predict(&features);

    debug!(
        position = %position,
        target,
        dims = features.len(),
        prediction,
        "fitted grading model"
    );
    clip_and_round(prediction)
}

/// Full grading pipeline: aggregate the player's season range through the
/// cache-backed scraper, then grade.
pub struct PlayerGrader<S: PageSource> {
    aggregator: StatAggregator<S>,
}

impl<S: PageSource> PlayerGrader<S> {
    pub fn new(aggregator: StatAggregator<S>) -> Self {
        Self { aggregator }
    }

    /// Grade `player` against `roster` using game logs from `seasons`.
    ///
    /// An empty (rookie) range skips acquisition entirely; acquisition
    /// failures degrade to a need-only grade. This call never fails.
    pub async fn grade(
        &self,
        player: &PlayerIdentity,
        roster: &[RosterEntry],
        seasons: RangeInclusive<u16>,
    ) -> f64 {
        let stats = self.aggregator.collect(player, seasons).await;
        grade_from_stats(player.position, roster, stats.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pos: &str) -> RosterEntry {
        RosterEntry {
            player_name: None,
            player_position: pos.into(),
        }
    }

    fn sample_roster() -> Vec<RosterEntry> {
        vec![
            entry("QB"),
            entry("RB"),
            entry("RB"),
            entry("RB"),
            entry("WR"),
            entry("WR"),
            entry("TE"),
            entry("K"),
            entry("DEF"),
        ]
    }

    #[test]
    fn te_with_no_stats_grades_to_need_target() {
        // Roster {QB:1, RB:3, WR:2, TE:1, K:1, DEF:1}: target = 10 - 1 = 9.
        let grade = grade_from_stats(Position::TightEnd, &sample_roster(), None);
        assert_eq!(grade, 9.0);
    }

    #[test]
    fn crowded_position_grades_lower() {
        let grade = grade_from_stats(Position::RunningBack, &sample_roster(), None);
        assert_eq!(grade, 7.0);
    }

    #[test]
    fn stats_change_dimensionality_not_the_one_sample_result() {
        let stats = AggregatedStats {
            pass_yds: 4000,
            pass_td: 30,
            rush_yds: 200,
            rush_td: 2,
            rec_yds: 0,
            rec_td: 0,
            games: 16,
        };
        let grade = grade_from_stats(Position::Quarterback, &sample_roster(), Some(&stats));
        assert_eq!(grade, 9.0);
    }

    #[test]
    fn grade_is_clipped_into_range() {
        // Eleven QBs push the raw target negative; the grade floors at zero.
        let roster: Vec<RosterEntry> = (0..11).map(|_| entry("QB")).collect();
        let grade = grade_from_stats(Position::Quarterback, &roster, None);
        assert_eq!(grade, 0.0);

        // An empty roster maxes the target at exactly ten.
        let grade = grade_from_stats(Position::Kicker, &[], None);
        assert_eq!(grade, 10.0);
    }

    #[test]
    fn grade_always_within_bounds() {
        for count in 0..20 {
            let roster: Vec<RosterEntry> = (0..count).map(|_| entry("WR")).collect();
            let grade = grade_from_stats(Position::WideReceiver, &roster, None);
            assert!((0.0..=10.0).contains(&grade), "grade {grade} out of range");
        }
    }
}
