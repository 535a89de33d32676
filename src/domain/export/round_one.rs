//! Round 1 export projections.
//!
//! Mirrors the admin export workbook: one sheet per domain grouped by
//! judge with an unscored-team appendix, an all-teams aggregated ranking
//! sheet, and a top-3-per-domain sheet.

use std::collections::BTreeMap;

use crate::domain::event::Event;
use crate::domain::foundation::{JudgeId, Round, TeamId};
use crate::domain::judge::Judge;
use crate::domain::scoring::{aggregate_team, sort_for_ranking, Score, TeamAggregate};
use crate::domain::team::Team;

use super::{CellValue, Report, ReportSheet};

/// Spreadsheet sheet names cap at 31 characters.
fn sheet_name(name: &str) -> String {
    name.chars().take(31).collect()
}

fn score_columns(event: &Event) -> Vec<String> {
    let mut columns = vec![
        "Judge Name".to_string(),
        "S.No".to_string(),
        "Team ID".to_string(),
        "Team Name".to_string(),
        "Problem Statement".to_string(),
    ];
    columns.extend(event.scoring_criteria().iter().map(|c| c.name().to_string()));
    columns.push("Bonus".to_string());
    columns.push("Total Score".to_string());
    columns
}

fn score_row(event: &Event, index: usize, team: &Team, score: &Score) -> Vec<CellValue> {
    let mut row = vec![
        CellValue::Empty,
        (index + 1).into(),
        team.id().to_string().into(),
        team.team_name().into(),
        team.problem_statement().into(),
    ];
    for criterion in event.scoring_criteria() {
        row.push(score.criterion_value(criterion.id()).unwrap_or(0.0).into());
    }
    row.push(score.bonus().points().into());
    row.push(score.total_score().into());
    row
}

fn unscored_row(event: &Event, index: usize, team: &Team) -> Vec<CellValue> {
    let mut row = vec![
        CellValue::Empty,
        (index + 1).into(),
        team.id().to_string().into(),
        team.team_name().into(),
        team.problem_statement().into(),
    ];
    for _ in event.scoring_criteria() {
        row.push(CellValue::Empty);
    }
    row.push(CellValue::Empty);
    row.push(CellValue::Empty);
    row
}

/// Groups finalized scores by judge display name, name order.
fn by_judge<'a>(
    scores: &[&'a Score],
    judge_names: &BTreeMap<JudgeId, String>,
) -> Vec<(String, Vec<&'a Score>)> {
    let mut grouped: BTreeMap<String, Vec<&Score>> = BTreeMap::new();
    for score in scores {
        let name = judge_names
            .get(&score.key().judge_id)
            .cloned()
            .unwrap_or_else(|| "Unknown Judge".to_string());
        grouped.entry(name).or_default().push(*score);
    }
    grouped.into_iter().collect()
}

/// Builds the Round 1 scores workbook.
///
/// Returns an empty report with a notice when no domain has teams or
/// scores to show.
pub fn round_one_workbook(
    event: &Event,
    teams: &[Team],
    judges: &[Judge],
    scores: &[Score],
) -> Report {
    let judge_names: BTreeMap<JudgeId, String> = judges
        .iter()
        .map(|j| (*j.id(), j.name().to_string()))
        .collect();
    let finalized: Vec<&Score> = scores
        .iter()
        .filter(|s| {
            s.is_finalized() && s.key().round == Round::Round1 && s.key().event_id == *event.id()
        })
        .collect();

    let mut sheets = Vec::new();

    for domain in event.domains() {
        let domain_teams: Vec<&Team> =
            teams.iter().filter(|t| t.domain() == &domain.key).collect();
        let team_ids: Vec<TeamId> = domain_teams.iter().map(|t| *t.id()).collect();
        let domain_scores: Vec<&Score> = finalized
            .iter()
            .copied()
            .filter(|s| team_ids.contains(&s.key().team_id))
            .collect();
        if domain_teams.is_empty() && domain_scores.is_empty() {
            continue;
        }

        let mut sheet = ReportSheet::new(
            sheet_name(&domain.name),
            score_columns(event).iter().map(String::as_str).collect(),
        );

        for (judge_name, judge_scores) in by_judge(&domain_scores, &judge_names) {
            sheet.push_row(vec![judge_name.into()]);
            for (index, score) in judge_scores.iter().enumerate() {
                let Some(team) = domain_teams.iter().find(|t| *t.id() == score.key().team_id)
                else {
                    continue;
                };
                sheet.push_row(score_row(event, index, team, score));
            }
            sheet.push_blank();
        }

        let scored_ids: Vec<TeamId> = domain_scores.iter().map(|s| s.key().team_id).collect();
        let unscored: Vec<&&Team> = domain_teams
            .iter()
            .filter(|t| !scored_ids.contains(t.id()))
            .collect();
        if !unscored.is_empty() {
            sheet.push_row(vec!["Unscored Teams".into()]);
            for (index, team) in unscored.iter().enumerate() {
                sheet.push_row(unscored_row(event, index, team));
            }
        }

        sheets.push(sheet);
    }

    let ranked = ranked_aggregates(event, teams, scores);
    if !ranked.is_empty() {
        sheets.push(aggregated_sheet(event, teams, &ranked));
        sheets.push(top3_by_domain_sheet(event, teams, &ranked));
    }

    if sheets.iter().all(ReportSheet::is_empty) {
        return Report::empty_with_notice("No data available to export for any domain.");
    }
    Report::new(sheets)
}

/// Aggregates every scored team and orders them for cross-domain ranking.
fn ranked_aggregates(event: &Event, teams: &[Team], scores: &[Score]) -> Vec<TeamAggregate> {
    let relevant: Vec<Score> = scores
        .iter()
        .filter(|s| s.key().event_id == *event.id())
        .cloned()
        .collect();
    let mut aggs: Vec<TeamAggregate> = teams
        .iter()
        .map(|t| {
            aggregate_team(
                *t.id(),
                Round::Round1,
                &relevant,
                t.allocated_judges().count(Round::Round1),
            )
        })
        .filter(|agg| agg.scores_received > 0)
        .collect();
    sort_for_ranking(&mut aggs, Round::Round1);
    aggs
}

const AGGREGATE_COLUMNS: [&str; 7] = [
    "Rank",
    "Team ID",
    "Team Name",
    "Domain",
    "Judge Count",
    "Total Score Sum",
    "Average Score",
];

fn aggregated_sheet(event: &Event, teams: &[Team], ranked: &[TeamAggregate]) -> ReportSheet {
    let mut sheet = ReportSheet::new("All Teams Aggregated", AGGREGATE_COLUMNS.to_vec());
    for (index, agg) in ranked.iter().enumerate() {
        let team = teams.iter().find(|t| *t.id() == agg.team_id);
        sheet.push_row(vec![
            (index + 1).into(),
            agg.team_id.to_string().into(),
            team.map_or(CellValue::Empty, |t| t.team_name().into()),
            team.map_or(CellValue::Empty, |t| event.domain_name(t.domain()).into()),
            agg.scores_received.into(),
            agg.total_score.into(),
            agg.average_score.into(),
        ]);
    }
    sheet
}

fn top3_by_domain_sheet(event: &Event, teams: &[Team], ranked: &[TeamAggregate]) -> ReportSheet {
    let mut sheet = ReportSheet::new(
        "Top 3 by Domain",
        vec![
            "Domain",
            "Rank",
            "Team ID",
            "Team Name",
            "Judge Count",
            "Total Score Sum",
            "Average Score",
        ],
    );

    for domain in event.domains() {
        let domain_top: Vec<&TeamAggregate> = ranked
            .iter()
            .filter(|agg| {
                teams
                    .iter()
                    .any(|t| *t.id() == agg.team_id && t.domain() == &domain.key)
            })
            .take(3)
            .collect();
        if domain_top.is_empty() {
            continue;
        }

        sheet.push_row(vec![domain.name.as_str().into()]);
        for (index, agg) in domain_top.iter().enumerate() {
            let team = teams.iter().find(|t| *t.id() == agg.team_id);
            sheet.push_row(vec![
                CellValue::Empty,
                (index + 1).into(),
                agg.team_id.to_string().into(),
                team.map_or(CellValue::Empty, |t| t.team_name().into()),
                agg.scores_received.into(),
                agg.total_score.into(),
                agg.average_score.into(),
            ]);
        }
        sheet.push_blank();
    }
    sheet
}
