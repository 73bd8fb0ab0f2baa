// 📊 Leaderboard - the merge → rank → highlight pipeline
//
// Pure and synchronous: takes a fully materialized snapshot and builds a
// fresh, rank-ordered list. Nothing is shared between runs.

use crate::highlight::{HighlightClassifier, HighlightStatus, HighlightSummary, DEFAULT_CAP};
use crate::merger::merge;
use crate::ranking::{RankedTeam, RankingEngine};
use crate::records::{QualifiedSet, SkillRecord, Snapshot, TeamRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Run the full pipeline over the three datasets
pub fn compute(
    skills: &[SkillRecord],
    teams: &[TeamRecord],
    qualified: &QualifiedSet,
    cap: usize,
) -> Vec<RankedTeam> {
    let drafts = merge(skills, teams, qualified);
    let ranked = RankingEngine::new().rank(drafts);
    HighlightClassifier::with_cap(cap).classify(ranked)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    pub teams: Vec<RankedTeam>,
    pub cap: usize,
    pub generated_at: DateTime<Utc>,
}

impl Leaderboard {
    pub fn from_snapshot(snapshot: &Snapshot, cap: usize) -> Self {
        Leaderboard {
            teams: compute(&snapshot.skills, &snapshot.teams, &snapshot.qualified, cap),
            cap,
            generated_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> HighlightSummary {
        HighlightSummary::from_teams(&self.teams, self.cap)
    }

    pub fn with_status(&self, status: HighlightStatus) -> Vec<&RankedTeam> {
        self.teams.iter().filter(|t| t.status == status).collect()
    }

    /// Case-insensitive match on the display name
    pub fn find_by_name(&self, name: &str) -> Vec<&RankedTeam> {
        let needle = name.trim().to_lowercase();
        self.teams
            .iter()
            .filter(|t| t.team_name.to_lowercase() == needle)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl From<&Snapshot> for Leaderboard {
    fn from(snapshot: &Snapshot) -> Self {
        Leaderboard::from_snapshot(snapshot, DEFAULT_CAP)
    }
}
