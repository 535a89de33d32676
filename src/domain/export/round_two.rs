//! Round 2 export projections.
//!
//! A top-3 podium sheet with member rosters, and a full-list variant with
//! the external judges' complete score breakdown.

use std::collections::BTreeMap;

use crate::domain::event::Event;
use crate::domain::foundation::{JudgeId, Round, TeamId};
use crate::domain::judge::Judge;
use crate::domain::progression::RoundTwoResultSet;
use crate::domain::scoring::Score;
use crate::domain::team::{joined_names, Team};

use super::{CellValue, Report, ReportSheet};

const NO_RESULTS_NOTICE: &str =
    "No Round 2 results available to export. Calculate Round 2 results first.";

fn team_index(teams: &[Team]) -> BTreeMap<TeamId, &Team> {
    teams.iter().map(|t| (*t.id(), t)).collect()
}

/// Builds the Round 2 top-3 podium sheet.
///
/// Member rosters are flattened to a joined string; problem statements
/// and idea descriptions ride along for the ceremony script.
pub fn round_two_top3(event: &Event, teams: &[Team], results: &RoundTwoResultSet) -> Report {
    if results.entries.is_empty() {
        return Report::empty_with_notice(NO_RESULTS_NOTICE);
    }
    let index = team_index(teams);

    let mut sheet = ReportSheet::new(
        "Round 2 Top 3",
        vec![
            "Rank",
            "Domain Name",
            "Team Name",
            "Members",
            "Problem Statement",
            "Idea Description",
            "Total Score",
        ],
    );

    let mut podium: Vec<_> = results.entries.iter().collect();
    podium.sort_by_key(|e| e.rank);
    for entry in podium.into_iter().take(3) {
        let team = index.get(&entry.team_id);
        sheet.push_row(vec![
            entry.rank.into(),
            event.domain_name(&entry.domain).into(),
            team.map_or(CellValue::Empty, |t| t.team_name().into()),
            team.map_or(CellValue::Empty, |t| joined_names(t.members()).into()),
            team.map_or(CellValue::Empty, |t| t.problem_statement().into()),
            team.and_then(|t| t.idea_description())
                .map_or(CellValue::Empty, CellValue::from),
            entry.total_score.into(),
        ]);
    }

    Report::new(vec![sheet])
}

/// Builds the full Round 2 report: every cohort team ranked, plus the
/// per-judge score breakdown.
pub fn round_two_full(
    event: &Event,
    teams: &[Team],
    judges: &[Judge],
    results: &RoundTwoResultSet,
    scores: &[Score],
) -> Report {
    if results.entries.is_empty() {
        return Report::empty_with_notice(NO_RESULTS_NOTICE);
    }
    let index = team_index(teams);

    let mut ranking = ReportSheet::new(
        "Round 2 Results",
        vec![
            "Rank",
            "Domain Name",
            "Team ID",
            "Team Name",
            "Judge Count",
            "Average Score",
            "Total Score",
        ],
    );
    let mut ordered: Vec<_> = results.entries.iter().collect();
    ordered.sort_by_key(|e| e.rank);
    for entry in ordered {
        let team = index.get(&entry.team_id);
        ranking.push_row(vec![
            entry.rank.into(),
            event.domain_name(&entry.domain).into(),
            entry.team_id.to_string().into(),
            team.map_or(CellValue::Empty, |t| t.team_name().into()),
            entry.judge_count.into(),
            entry.average_score.into(),
            entry.total_score.into(),
        ]);
    }

    Report::new(vec![ranking, breakdown_sheet(event, &index, judges, scores)])
}

fn breakdown_sheet(
    event: &Event,
    index: &BTreeMap<TeamId, &Team>,
    judges: &[Judge],
    scores: &[Score],
) -> ReportSheet {
    let judge_names: BTreeMap<JudgeId, String> = judges
        .iter()
        .map(|j| (*j.id(), j.name().to_string()))
        .collect();

    let mut columns = vec![
        "Judge Name".to_string(),
        "S.No".to_string(),
        "Team Name".to_string(),
    ];
    columns.extend(event.scoring_criteria().iter().map(|c| c.name().to_string()));
    columns.push("Bonus".to_string());
    columns.push("Total Score".to_string());
    let mut sheet = ReportSheet::new(
        "Judge Breakdown",
        columns.iter().map(String::as_str).collect(),
    );

    let mut grouped: BTreeMap<String, Vec<&Score>> = BTreeMap::new();
    for score in scores {
        if !score.is_finalized()
            || score.key().round != Round::Round2
            || score.key().event_id != *event.id()
        {
            continue;
        }
        let name = judge_names
            .get(&score.key().judge_id)
            .cloned()
            .unwrap_or_else(|| "Unknown Judge".to_string());
        grouped.entry(name).or_default().push(score);
    }

    for (judge_name, judge_scores) in grouped {
        sheet.push_row(vec![judge_name.into()]);
        for (i, score) in judge_scores.iter().enumerate() {
            let mut row = vec![
                CellValue::Empty,
                (i + 1).into(),
                index
                    .get(&score.key().team_id)
                    .map_or(CellValue::Empty, |t| t.team_name().into()),
            ];
            for criterion in event.scoring_criteria() {
                row.push(score.criterion_value(criterion.id()).unwrap_or(0.0).into());
            }
            row.push(score.bonus().points().into());
            row.push(score.total_score().into());
            sheet.push_row(row);
        }
        sheet.push_blank();
    }

    sheet
}
