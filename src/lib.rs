// Skills Leaderboard - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod records;
pub mod merger;         // Merge: skills ⋈ teams + qualification flag
pub mod ranking;        // Rank: cascading comparator, dense ranks
pub mod highlight;      // Highlight: qualified / provisional under a cap
pub mod leaderboard;    // Pipeline over a snapshot
pub mod source;         // Concurrent retrieval of the three datasets
pub mod aggregation;    // Raw skills runs → SkillRecord
pub mod report;
pub mod config;
pub mod logging;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use error::{Dataset, LeaderboardError, Result};
pub use records::{
    QualifiedSet, SkillRecord, Snapshot, TeamId, TeamRecord,
    parse_qualified_json, parse_skills_csv, parse_skills_json, parse_teams_json,
};
pub use merger::{merge, RankedTeamDraft, TeamIndex, UNKNOWN_TEAM_NAME};
pub use ranking::{RankedTeam, RankingEngine};
pub use highlight::{HighlightClassifier, HighlightStatus, HighlightSummary, DEFAULT_CAP};
pub use leaderboard::{compute, Leaderboard};
pub use source::{ConfiguredSource, DataSource, Location, SourceConfig, StaticSource};
pub use aggregation::{aggregate_all, aggregate_runs, parse_runs_json, SkillRun};
pub use config::SourceArgs;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
