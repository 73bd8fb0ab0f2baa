// 🎨 Highlight Classifier - two-tier status annotation
//
// Pass 1: every qualified team → Qualified.
// Pass 2: walking in rank order, unannotated teams → Provisional until
//         qualified + provisional reaches the cap.
//
// Not "top N teams": all qualified teams are always marked, and only the
// remaining headroom under the cap goes to provisional teams.

use crate::ranking::RankedTeam;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Total number of annotated (qualified + provisional) teams
pub const DEFAULT_CAP: usize = 56;

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightStatus {
    #[default]
    None,
    /// Present in the qualification roster
    Qualified,
    /// Would qualify if the season ended today
    Provisional,
}

impl HighlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightStatus::None => "none",
            HighlightStatus::Qualified => "qualified",
            HighlightStatus::Provisional => "provisional",
        }
    }

    /// Row class used by the web presenter
    pub fn css_class(&self) -> &'static str {
        match self {
            HighlightStatus::None => "",
            HighlightStatus::Qualified => "green",
            HighlightStatus::Provisional => "yellow",
        }
    }

    /// Human-readable legend text
    pub fn label(&self) -> &'static str {
        match self {
            HighlightStatus::None => "",
            HighlightStatus::Qualified => "Already Qualified",
            HighlightStatus::Provisional => "Will Qualify if Season Ends Today",
        }
    }

    pub fn is_annotated(&self) -> bool {
        *self != HighlightStatus::None
    }
}

impl fmt::Display for HighlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HighlightStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "unannotated" => Ok(HighlightStatus::None),
            "qualified" | "green" => Ok(HighlightStatus::Qualified),
            "provisional" | "yellow" => Ok(HighlightStatus::Provisional),
            other => Err(format!("unknown highlight status: {}", other)),
        }
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSummary {
    pub total_teams: usize,
    pub qualified: usize,
    pub provisional: usize,
    pub unannotated: usize,
    pub cap: usize,
}

impl HighlightSummary {
    pub fn from_teams(teams: &[RankedTeam], cap: usize) -> Self {
        let mut summary = HighlightSummary {
            total_teams: teams.len(),
            cap,
            ..Default::default()
        };

        for team in teams {
            match team.status {
                HighlightStatus::Qualified => summary.qualified += 1,
                HighlightStatus::Provisional => summary.provisional += 1,
                HighlightStatus::None => summary.unannotated += 1,
            }
        }

        summary
    }

    pub fn annotated(&self) -> usize {
        self.qualified + self.provisional
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone)]
pub struct HighlightClassifier {
    pub cap: usize,
}

impl HighlightClassifier {
    pub fn new() -> Self {
        HighlightClassifier { cap: DEFAULT_CAP }
    }

    pub fn with_cap(cap: usize) -> Self {
        HighlightClassifier { cap }
    }

    /// Annotate a rank-ordered list. Input order is kept as-is.
    pub fn classify(&self, ranked: Vec<RankedTeam>) -> Vec<RankedTeam> {
        // Pass 1
        let qualified_count = ranked.iter().filter(|t| t.is_qualified).count();
        let mut annotated = qualified_count;

        // Pass 2
        let classified: Vec<RankedTeam> = ranked
            .into_iter()
            .map(|team| {
                if team.is_qualified {
                    team.with_status(HighlightStatus::Qualified)
                } else if annotated < self.cap {
                    annotated += 1;
                    team.with_status(HighlightStatus::Provisional)
                } else {
                    team.with_status(HighlightStatus::None)
                }
            })
            .collect();

        info!(
            qualified = qualified_count,
            provisional = annotated - qualified_count,
            cap = self.cap,
            "highlight classification complete"
        );

        classified
    }
}

impl Default for HighlightClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TeamId;

    fn create_test_team(rank: usize, qualified: bool) -> RankedTeam {
        RankedTeam {
            rank,
            team_identifier: Some(TeamId::from(rank as u64)),
            team_number: Some(format!("{}A", rank)),
            team_name: format!("Team {}", rank),
            programming_score: None,
            driver_score: None,
            total_score: Some(1000.0 - rank as f64),
            highest_auto: None,
            is_qualified: qualified,
            status: HighlightStatus::None,
        }
    }

    fn statuses(teams: &[RankedTeam]) -> Vec<HighlightStatus> {
        teams.iter().map(|t| t.status).collect()
    }

    use HighlightStatus::{None as N, Provisional as P, Qualified as Q};

    #[test]
    fn test_fills_cap_with_provisional_in_rank_order() {
        let classifier = HighlightClassifier::with_cap(2);
        let teams = vec![
            create_test_team(1, false),
            create_test_team(2, false),
            create_test_team(3, false),
        ];

        let result = classifier.classify(teams);

        assert_eq!(statuses(&result), vec![P, P, N]);
    }

    #[test]
    fn test_qualified_count_meeting_cap_blocks_provisional() {
        let classifier = HighlightClassifier::with_cap(1);
        let teams = vec![
            create_test_team(1, false),
            create_test_team(2, false),
            create_test_team(3, true),
        ];

        let result = classifier.classify(teams);

        assert_eq!(statuses(&result), vec![N, N, Q]);
    }

    #[test]
    fn test_qualified_teams_skip_provisional_budget() {
        let classifier = HighlightClassifier::with_cap(3);
        let teams = vec![
            create_test_team(1, true),
            create_test_team(2, false),
            create_test_team(3, true),
            create_test_team(4, false),
            create_test_team(5, false),
        ];

        let result = classifier.classify(teams);

        assert_eq!(statuses(&result), vec![Q, P, Q, N, N]);
    }

    #[test]
    fn test_qualified_over_cap_is_not_truncated() {
        let classifier = HighlightClassifier::with_cap(2);
        let teams: Vec<_> = (1..=5).map(|r| create_test_team(r, r != 2)).collect();

        let result = classifier.classify(teams);

        assert_eq!(statuses(&result), vec![Q, N, Q, Q, Q]);
        assert_eq!(HighlightSummary::from_teams(&result, 2).qualified, 4);
    }

    #[test]
    fn test_cap_larger_than_field_marks_everyone() {
        let classifier = HighlightClassifier::new();
        let teams: Vec<_> = (1..=10).map(|r| create_test_team(r, r == 10)).collect();

        let result = classifier.classify(teams);

        let summary = HighlightSummary::from_teams(&result, DEFAULT_CAP);
        assert_eq!(summary.qualified, 1);
        assert_eq!(summary.provisional, 9);
        assert_eq!(summary.unannotated, 0);
    }

    #[test]
    fn test_annotated_count_formula_with_default_cap() {
        let classifier = HighlightClassifier::new();
        let teams: Vec<_> = (1..=120).map(|r| create_test_team(r, r % 9 == 0)).collect();
        let qualified_count = teams.iter().filter(|t| t.is_qualified).count();
        let unqualified = teams.len() - qualified_count;

        let result = classifier.classify(teams);
        let summary = HighlightSummary::from_teams(&result, DEFAULT_CAP);

        assert_eq!(
            summary.annotated(),
            qualified_count + (DEFAULT_CAP - qualified_count).min(unqualified)
        );
        assert!(summary.annotated() <= DEFAULT_CAP);
        for team in &result {
            assert_eq!(team.is_qualified, team.status == Q);
        }
        let ranks: Vec<_> = result.iter().map(|t| t.rank).collect();
        assert_eq!(ranks, (1..=120).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_cap_marks_only_qualified() {
        let classifier = HighlightClassifier::with_cap(0);
        let teams = vec![create_test_team(1, false), create_test_team(2, true)];

        assert_eq!(statuses(&classifier.classify(teams)), vec![N, Q]);
    }

    #[test]
    fn test_status_display_attributes() {
        assert_eq!(Q.css_class(), "green");
        assert_eq!(P.css_class(), "yellow");
        assert_eq!(N.css_class(), "");
        assert_eq!("Provisional".parse::<HighlightStatus>().unwrap(), P);
        assert_eq!("green".parse::<HighlightStatus>().unwrap(), Q);
        assert!("purple".parse::<HighlightStatus>().is_err());
        assert_eq!(serde_json::to_string(&Q).unwrap(), "\"qualified\"");
    }
}
