// HTML extraction for the profile index and per-season game-log tables.
//
// Game-log tables carry one `data-stat` attribute per cell. Each tracked
// position gets a column manifest: a primary stat key whose absence marks a
// section-separator row (skipped, not data), plus the stat groups relevant to
// that position. Missing individual columns coerce to `None` rather than
// failing the row.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

use crate::gamelog::types::GameLogRow;
use crate::roster::Position;

// ---------------------------------------------------------------------------
// Column manifests
// ---------------------------------------------------------------------------

/// Which columns a position's game-log parser extracts.
#[derive(Debug, Clone, Copy)]
pub struct ColumnManifest {
    /// `data-stat` key that distinguishes data rows from separator rows.
    pub primary: &'static str,
    pub passing: bool,
    pub rushing: bool,
    pub receiving: bool,
}

/// Manifest for each tracked position. Quarterback is the reference parser;
/// the rest follow the same per-row extraction over their relevant columns.
/// Kickers and team defenses carry no yardage/TD groups, so their rows
/// contribute games played only.
pub fn manifest_for(position: Position) -> ColumnManifest {
    match position {
        Position::Quarterback => ColumnManifest {
            primary: "pass_cmp",
            passing: true,
            rushing: true,
            receiving: false,
        },
        Position::RunningBack => ColumnManifest {
            primary: "rush_att",
            passing: false,
            rushing: true,
            receiving: true,
        },
        Position::WideReceiver | Position::TightEnd => ColumnManifest {
            primary: "rec",
            passing: false,
            rushing: true,
            receiving: true,
        },
        Position::Kicker => ColumnManifest {
            primary: "fgm",
            passing: false,
            rushing: false,
            receiving: false,
        },
        Position::Defense => ColumnManifest {
            primary: "tackles_combined",
            passing: false,
            rushing: false,
            receiving: false,
        },
    }
}

// ---------------------------------------------------------------------------
// Game-log table parsing
// ---------------------------------------------------------------------------

/// Parse a season game-log page into structured rows for `position`.
///
/// Fails only when the page has no game-log table body at all; individual
/// malformed cells degrade to zero/absent values.
pub fn parse_game_log(html: &str, position: Position) -> Result<Vec<GameLogRow>> {
    let document = Html::parse_document(html);
    let tbody_selector =
        Selector::parse("tbody").map_err(|e| anyhow!("invalid tbody selector: {e}"))?;
    let tr_selector = Selector::parse("tr").map_err(|e| anyhow!("invalid tr selector: {e}"))?;

    let tbody = document
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| anyhow!("game-log table body not found"))?;

    let manifest = manifest_for(position);
    let mut rows = Vec::new();

    for tr in tbody.select(&tr_selector) {
        let cells = stat_cells(&tr);
        // Separator rows lack the primary stat column.
        if !cells.contains_key(manifest.primary) {
            continue;
        }
        rows.push(parse_row(&cells, &manifest));
    }

    Ok(rows)
}

/// Collect a row's cells keyed by their `data-stat` attribute.
fn stat_cells<'a>(tr: &ElementRef<'a>) -> HashMap<&'a str, String> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .filter_map(|el| {
            let key = el.value().attr("data-stat")?;
            let text = el.text().collect::<String>().trim().to_string();
            Some((key, text))
        })
        .collect()
}

fn parse_row(cells: &HashMap<&str, String>, manifest: &ColumnManifest) -> GameLogRow {
    // The result cell prints like "W 38-10": letter, then team-opponent score.
    let result_text = text(cells, "game_result");
    let mut result_parts = result_text.split_whitespace();
    let result = result_parts.next().unwrap_or_default().to_string();
    let (team_pts, opp_pts) = result_parts
        .next()
        .and_then(|score| {
            let (team, opp) = score.split_once('-')?;
            Some((team.parse().ok()?, opp.parse().ok()?))
        })
        .unwrap_or((0, 0));

    let mut row = GameLogRow::base(
        text(cells, "game_date"),
        uint(cells, "week_num").unwrap_or(0),
        text(cells, "team"),
        text(cells, "game_location") != "@",
        text(cells, "opp"),
        result,
        team_pts,
        opp_pts,
    );

    if manifest.passing {
        row.pass_cmp = uint(cells, "pass_cmp");
        row.pass_att = uint(cells, "pass_att");
        row.pass_yds = int(cells, "pass_yds");
        row.pass_td = uint(cells, "pass_td");
        row.pass_int = uint(cells, "pass_int");
        row.pass_rating = float(cells, "pass_rating");
        row.sacked = uint(cells, "pass_sacked");
    }
    if manifest.rushing {
        row.rush_att = uint(cells, "rush_att");
        row.rush_yds = int(cells, "rush_yds");
        row.rush_td = uint(cells, "rush_td");
    }
    if manifest.receiving {
        row.targets = uint(cells, "targets");
        row.receptions = uint(cells, "rec");
        row.rec_yds = int(cells, "rec_yds");
        row.rec_td = uint(cells, "rec_td");
    }

    row
}

fn text(cells: &HashMap<&str, String>, key: &str) -> String {
    cells.get(key).cloned().unwrap_or_default()
}

fn uint(cells: &HashMap<&str, String>, key: &str) -> Option<u32> {
    cells.get(key)?.parse().ok()
}

fn int(cells: &HashMap<&str, String>, key: &str) -> Option<i32> {
    cells.get(key)?.parse().ok()
}

fn float(cells: &HashMap<&str, String>, key: &str) -> Option<f64> {
    cells.get(key)?.parse().ok()
}

// ---------------------------------------------------------------------------
// Profile index parsing
// ---------------------------------------------------------------------------

/// One entry from the per-initial player index: the printed line (name,
/// position tag, active-seasons range) and the profile href it links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    pub text: String,
    pub href: String,
}

/// Extract profile entries from a per-initial index page. Entries without a
/// link are dropped.
pub fn parse_profile_index(html: &str) -> Result<Vec<ProfileEntry>> {
    let document = Html::parse_document(html);
    let section_selector = Selector::parse("div#div_players")
        .map_err(|e| anyhow!("invalid players section selector: {e}"))?;
    let p_selector = Selector::parse("p").map_err(|e| anyhow!("invalid entry selector: {e}"))?;
    let a_selector = Selector::parse("a").map_err(|e| anyhow!("invalid link selector: {e}"))?;

    let section = document
        .select(&section_selector)
        .next()
        .ok_or_else(|| anyhow!("player index section not found"))?;

    let mut entries = Vec::new();
    for p in section.select(&p_selector) {
        let Some(link) = p.select(&a_selector).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        entries.push(ProfileEntry {
            text: p.text().collect::<String>().trim().to_string(),
            href: href.trim_end_matches(".htm").to_string(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qb_game_log_html() -> &'static str {
        r#"<html><body><table id="stats"><tbody>
        <tr>
            <td data-stat="game_date">2023-09-11</td>
            <td data-stat="week_num">1</td>
            <td data-stat="team">BUF</td>
            <td data-stat="game_location">@</td>
            <td data-stat="opp">NYJ</td>
            <td data-stat="game_result">L 16-22</td>
            <td data-stat="pass_cmp">29</td>
            <td data-stat="pass_att">41</td>
            <td data-stat="pass_yds">236</td>
            <td data-stat="pass_td">1</td>
            <td data-stat="pass_int">3</td>
            <td data-stat="pass_rating">58.9</td>
            <td data-stat="pass_sacked">5</td>
            <td data-stat="rush_att">6</td>
            <td data-stat="rush_yds">36</td>
            <td data-stat="rush_td">1</td>
        </tr>
        <tr>
            <td data-stat="game_date">Games</td>
        </tr>
        <tr>
            <td data-stat="game_date">2023-09-17</td>
            <td data-stat="week_num">2</td>
            <td data-stat="team">BUF</td>
            <td data-stat="game_location"></td>
            <td data-stat="opp">LVR</td>
            <td data-stat="game_result">W 38-10</td>
            <td data-stat="pass_cmp">31</td>
            <td data-stat="pass_att">37</td>
            <td data-stat="pass_yds">274</td>
            <td data-stat="pass_td">3</td>
            <td data-stat="pass_int">0</td>
            <td data-stat="pass_rating">118.9</td>
            <td data-stat="pass_sacked">1</td>
            <td data-stat="rush_att">4</td>
            <td data-stat="rush_yds">-2</td>
            <td data-stat="rush_td">0</td>
        </tr>
        </tbody></table></body></html>"#
    }

    #[test]
    fn qb_rows_parsed_with_separator_skipped() {
        let rows = parse_game_log(qb_game_log_html(), Position::Quarterback).unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.date, "2023-09-11");
        assert_eq!(first.week, 1);
        assert!(!first.home);
        assert_eq!(first.opponent, "NYJ");
        assert_eq!(first.result, "L");
        assert_eq!(first.team_pts, 16);
        assert_eq!(first.opp_pts, 22);
        assert_eq!(first.pass_cmp, Some(29));
        assert_eq!(first.pass_yds, Some(236));
        assert_eq!(first.pass_rating, Some(58.9));
        assert_eq!(first.sacked, Some(5));
        assert_eq!(first.rush_yds, Some(36));
        // QB manifest has no receiving group.
        assert_eq!(first.receptions, None);

        let second = &rows[1];
        assert!(second.home);
        assert_eq!(second.result, "W");
        assert_eq!(second.rush_yds, Some(-2));
    }

    #[test]
    fn receiver_rows_use_rec_primary() {
        let html = r#"<table><tbody>
        <tr>
            <td data-stat="game_date">2023-09-10</td>
            <td data-stat="week_num">1</td>
            <td data-stat="team">MIA</td>
            <td data-stat="game_location"></td>
            <td data-stat="opp">LAC</td>
            <td data-stat="game_result">W 36-34</td>
            <td data-stat="targets">15</td>
            <td data-stat="rec">11</td>
            <td data-stat="rec_yds">215</td>
            <td data-stat="rec_td">2</td>
        </tr>
        <tr><td data-stat="game_date">Receiving</td></tr>
        </tbody></table>"#;

        let rows = parse_game_log(html, Position::WideReceiver).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].receptions, Some(11));
        assert_eq!(rows[0].rec_yds, Some(215));
        assert_eq!(rows[0].rec_td, Some(2));
        // Rushing columns absent from the page coerce to None, not an error.
        assert_eq!(rows[0].rush_yds, None);
        assert_eq!(rows[0].pass_yds, None);
    }

    #[test]
    fn running_back_rows_extract_rushing_and_receiving() {
        let html = r#"<table><tbody>
        <tr>
            <td data-stat="game_date">2023-09-10</td>
            <td data-stat="week_num">1</td>
            <td data-stat="team">SFO</td>
            <td data-stat="game_location"></td>
            <td data-stat="opp">PIT</td>
            <td data-stat="game_result">W 30-7</td>
            <td data-stat="rush_att">22</td>
            <td data-stat="rush_yds">152</td>
            <td data-stat="rush_td">1</td>
            <td data-stat="targets">7</td>
            <td data-stat="rec">5</td>
            <td data-stat="rec_yds">17</td>
            <td data-stat="rec_td">1</td>
            <td data-stat="pass_cmp">1</td>
            <td data-stat="pass_yds">18</td>
        </tr>
        <tr><td data-stat="game_date">Rushing</td></tr>
        </tbody></table>"#;

        let rows = parse_game_log(html, Position::RunningBack).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rush_att, Some(22));
        assert_eq!(rows[0].rush_yds, Some(152));
        assert_eq!(rows[0].receptions, Some(5));
        assert_eq!(rows[0].rec_td, Some(1));
        // The RB manifest carries no passing group, even when the page does.
        assert_eq!(rows[0].pass_cmp, None);
        assert_eq!(rows[0].pass_yds, None);
    }

    #[test]
    fn kicker_rows_extract_shared_columns_only() {
        let html = r#"<table><tbody>
        <tr>
            <td data-stat="game_date">2023-09-10</td>
            <td data-stat="week_num">1</td>
            <td data-stat="team">BAL</td>
            <td data-stat="game_location">@</td>
            <td data-stat="opp">HOU</td>
            <td data-stat="game_result">W 25-9</td>
            <td data-stat="fgm">4</td>
            <td data-stat="fga">4</td>
            <td data-stat="xpm">1</td>
        </tr>
        <tr><td data-stat="game_date">Scoring</td></tr>
        </tbody></table>"#;

        let rows = parse_game_log(html, Position::Kicker).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2023-09-10");
        assert_eq!(rows[0].result, "W");
        assert_eq!(rows[0].team_pts, 25);
        assert!(!rows[0].home);
        // No stat groups in the kicker manifest: every stat column is absent.
        assert_eq!(rows[0].pass_yds, None);
        assert_eq!(rows[0].rush_yds, None);
        assert_eq!(rows[0].rec_yds, None);

        // The season still counts toward games played, with zero totals.
        let stats = crate::gamelog::AggregatedStats::from_rows(&rows).unwrap();
        assert_eq!(stats.games, 1);
        assert_eq!(stats.pass_yds, 0);
        assert_eq!(stats.rush_td, 0);
        assert_eq!(stats.rec_yds, 0);
    }

    #[test]
    fn defense_rows_use_tackles_primary() {
        let html = r#"<table><tbody>
        <tr>
            <td data-stat="game_date">2023-09-10</td>
            <td data-stat="week_num">1</td>
            <td data-stat="team">DAL</td>
            <td data-stat="game_location"></td>
            <td data-stat="opp">NYG</td>
            <td data-stat="game_result">W 40-0</td>
            <td data-stat="tackles_combined">6</td>
            <td data-stat="sacks">1.0</td>
        </tr>
        <tr><td data-stat="game_date">Defense</td></tr>
        </tbody></table>"#;

        let rows = parse_game_log(html, Position::Defense).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].opponent, "NYG");
        assert_eq!(rows[0].opp_pts, 0);
        assert_eq!(rows[0].pass_yds, None);
        assert_eq!(rows[0].rush_yds, None);
        assert_eq!(rows[0].rec_yds, None);
    }

    #[test]
    fn missing_table_body_is_an_error() {
        let html = "<html><body><p>No table here</p></body></html>";
        assert!(parse_game_log(html, Position::Quarterback).is_err());
    }

    #[test]
    fn malformed_result_cell_degrades_to_zero() {
        let html = r#"<table><tbody>
        <tr>
            <td data-stat="game_date">2023-10-01</td>
            <td data-stat="week_num">4</td>
            <td data-stat="team">BUF</td>
            <td data-stat="game_location"></td>
            <td data-stat="opp">MIA</td>
            <td data-stat="game_result"></td>
            <td data-stat="pass_cmp">21</td>
        </tr>
        </tbody></table>"#;

        let rows = parse_game_log(html, Position::Quarterback).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].result, "");
        assert_eq!(rows[0].team_pts, 0);
        assert_eq!(rows[0].opp_pts, 0);
        assert_eq!(rows[0].pass_cmp, Some(21));
    }

    #[test]
    fn profile_index_extracts_text_and_href() {
        let html = r#"<div id="div_players">
            <p><a href="/players/A/AlleJo02.htm">Josh Allen</a> (QB) 2018-2024</p>
            <p><a href="/players/A/AlleJo03.htm">Josh Allen</a> (LB) 2019-2024</p>
            <p>Retired Player (RB) 1990-1999</p>
        </div>"#;

        let entries = parse_profile_index(html).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].href, "/players/A/AlleJo02");
        assert!(entries[0].text.contains("Josh Allen"));
        assert!(entries[0].text.contains("(QB)"));
        assert!(entries[0].text.ends_with("2018-2024"));
    }

    #[test]
    fn profile_index_missing_section_is_an_error() {
        assert!(parse_profile_index("<div id=\"other\"></div>").is_err());
    }
}
