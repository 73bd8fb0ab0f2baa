// 🧮 Skills aggregation - raw skills runs → one SkillRecord per team
//
// A team's record comes from its best event: per event, keep the best
// programming run and the best driver run, total = sum, and pick the event
// with the highest total. highest_auto / highest_driver look across ALL
// events, so they can come from a different event than the totals.

use crate::error::Result;
use crate::records::{SkillRecord, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

// ============================================================================
// RAW RUN TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRun {
    pub event: RunEvent,
    pub team: RunTeam,
    #[serde(rename = "type")]
    pub run_type: RunType,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTeam {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunType {
    Programming,
    Driver,
    #[serde(other)]
    Other,
}

// ============================================================================
// PER-EVENT ACCUMULATOR
// ============================================================================

#[derive(Debug, Clone)]
struct EventScores {
    event_name: String,
    team_name: String,
    programming: f64,
    driver: f64,
}

impl EventScores {
    fn total(&self) -> f64 {
        self.programming + self.driver
    }
}

/// Build one team's record from its runs; `None` when there are no runs
pub fn aggregate_runs(team_identifier: TeamId, runs: &[SkillRun]) -> Option<SkillRecord> {
    // Insertion-ordered so ties between events go to the first one seen
    let mut events: Vec<EventScores> = Vec::new();
    let mut by_event: HashMap<u64, usize> = HashMap::new();
    let mut highest_auto = 0.0_f64;
    let mut highest_driver = 0.0_f64;

    for run in runs {
        let slot = *by_event.entry(run.event.id).or_insert_with(|| {
            events.push(EventScores {
                event_name: run.event.name.clone(),
                team_name: run.team.name.clone(),
                programming: 0.0,
                driver: 0.0,
            });
            events.len() - 1
        });
        let scores = &mut events[slot];

        match run.run_type {
            RunType::Programming => {
                scores.programming = scores.programming.max(run.score);
                highest_auto = highest_auto.max(run.score);
            }
            RunType::Driver => {
                scores.driver = scores.driver.max(run.score);
                highest_driver = highest_driver.max(run.score);
            }
            RunType::Other => {
                debug!(team_id = %team_identifier, event = run.event.id, "ignoring unknown run type");
            }
        }
    }

    let mut best: Option<&EventScores> = None;
    for event in &events {
        if best.map_or(true, |b| event.total() > b.total()) {
            best = Some(event);
        }
    }
    let best = best?;

    Some(SkillRecord {
        team_identifier: Some(team_identifier),
        team_name: Some(best.team_name.clone()),
        event_name: Some(best.event_name.clone()),
        programming_score: Some(best.programming),
        driver_score: Some(best.driver),
        total_score: Some(best.total()),
        highest_auto: Some(highest_auto),
        highest_driver: Some(highest_driver),
    })
}

/// Read `{"<team id>": [runs...], ...}`, keeping the file's team order
pub fn parse_runs_json(bytes: &[u8]) -> Result<Vec<(TeamId, Vec<SkillRun>)>> {
    let by_team: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(bytes)?;

    let mut runs_by_team = Vec::with_capacity(by_team.len());
    for (key, value) in by_team {
        let runs: Vec<SkillRun> = serde_json::from_value(value)?;
        runs_by_team.push((TeamId::from_key(&key), runs));
    }

    Ok(runs_by_team)
}

/// Aggregate every team; teams without runs are skipped
pub fn aggregate_all<I>(runs_by_team: I) -> Vec<SkillRecord>
where
    I: IntoIterator<Item = (TeamId, Vec<SkillRun>)>,
{
    runs_by_team
        .into_iter()
        .filter_map(|(team_id, runs)| {
            let record = aggregate_runs(team_id.clone(), &runs);
            if record.is_none() {
                info!(team_id = %team_id, "team has no skills data");
            }
            record
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_run(event_id: u64, run_type: RunType, score: f64) -> SkillRun {
        SkillRun {
            event: RunEvent {
                id: event_id,
                name: format!("Event {}", event_id),
            },
            team: RunTeam {
                name: "Robo Lions".to_string(),
            },
            run_type,
            score,
        }
    }

    #[test]
    fn test_best_event_by_total() {
        let runs = vec![
            create_test_run(1, RunType::Programming, 40.0),
            create_test_run(1, RunType::Driver, 50.0),
            create_test_run(2, RunType::Programming, 30.0),
            create_test_run(2, RunType::Driver, 70.0),
            create_test_run(2, RunType::Driver, 65.0),
        ];

        let record = aggregate_runs(TeamId::from(7), &runs).unwrap();

        assert_eq!(record.event_name.as_deref(), Some("Event 2"));
        assert_eq!(record.programming_score, Some(30.0));
        assert_eq!(record.driver_score, Some(70.0));
        assert_eq!(record.total_score, Some(100.0));
        assert_eq!(record.team_name.as_deref(), Some("Robo Lions"));
    }

    #[test]
    fn test_highest_scores_span_events() {
        let runs = vec![
            create_test_run(1, RunType::Programming, 60.0),
            create_test_run(2, RunType::Programming, 10.0),
            create_test_run(2, RunType::Driver, 80.0),
        ];

        let record = aggregate_runs(TeamId::from(7), &runs).unwrap();

        assert_eq!(record.event_name.as_deref(), Some("Event 2"));
        assert_eq!(record.highest_auto, Some(60.0));
        assert_eq!(record.highest_driver, Some(80.0));
    }

    #[test]
    fn test_tied_events_keep_first_seen() {
        let runs = vec![
            create_test_run(9, RunType::Driver, 50.0),
            create_test_run(3, RunType::Driver, 50.0),
        ];

        let record = aggregate_runs(TeamId::from(7), &runs).unwrap();

        assert_eq!(record.event_name.as_deref(), Some("Event 9"));
    }

    #[test]
    fn test_unknown_run_type_opens_event_without_score() {
        let runs = vec![create_test_run(1, RunType::Other, 99.0)];

        let record = aggregate_runs(TeamId::from(7), &runs).unwrap();

        assert_eq!(record.total_score, Some(0.0));
        assert_eq!(record.highest_auto, Some(0.0));
    }

    #[test]
    fn test_no_runs_means_no_record() {
        assert!(aggregate_runs(TeamId::from(7), &[]).is_none());

        let records = aggregate_all(vec![
            (TeamId::from(1), vec![create_test_run(1, RunType::Driver, 5.0)]),
            (TeamId::from(2), vec![]),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].team_identifier, Some(TeamId::from(1)));
    }

    #[test]
    fn test_deserialize_raw_runs() {
        let payload = r#"[
            {"event": {"id": 55, "name": "VA States"}, "team": {"name": "Gears"},
             "type": "programming", "score": 41},
            {"event": {"id": 55, "name": "VA States"}, "team": {"name": "Gears"},
             "type": "package_probably", "score": 3}
        ]"#;

        let runs: Vec<SkillRun> = serde_json::from_str(payload).unwrap();

        assert_eq!(runs[0].run_type, RunType::Programming);
        assert_eq!(runs[1].run_type, RunType::Other);
        assert_eq!(runs[0].score, 41.0);
    }

    #[test]
    fn test_runs_file_keeps_team_order() {
        let payload = br#"{
            "4086": [{"event": {"id": 1, "name": "A"}, "team": {"name": "Tin Men"},
                      "type": "driver", "score": 10}],
            "121849": [{"event": {"id": 2, "name": "B"}, "team": {"name": "Robo Lions"},
                        "type": "driver", "score": 10}],
            "99X": []
        }"#;

        let runs_by_team = parse_runs_json(payload).unwrap();
        let ids: Vec<_> = runs_by_team.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(
            ids,
            vec![TeamId::from(4086), TeamId::from(121849), TeamId::new("99X")]
        );

        let records = aggregate_all(runs_by_team);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].team_name.as_deref(), Some("Tin Men"));
        assert_eq!(records[1].team_name.as_deref(), Some("Robo Lions"));
    }

    #[test]
    fn test_malformed_runs_file_is_an_error() {
        assert!(parse_runs_json(br#"{"1": [{"score": "x"}]}"#).is_err());
        assert!(parse_runs_json(b"[]").is_err());
    }
}
