// ⚙️ Source configuration - CLI flags with environment fallbacks
//
// Each dataset location may be a file path or an http(s) URL. Anything not
// given explicitly resolves to the default file name inside --data-dir.

use crate::highlight::DEFAULT_CAP;
use crate::source::{Location, SourceConfig, QUALIFIED_FILE, SKILLS_FILE, TEAMS_FILE};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Directory holding skills_list.json, team_list.json and qualified.json
    #[arg(long, env = "LEADERBOARD_DATA_DIR", default_value = "public")]
    pub data_dir: PathBuf,

    /// Skills list (path or URL; .csv is read as CSV)
    #[arg(long, env = "LEADERBOARD_SKILLS")]
    pub skills: Option<String>,

    /// Team list (path or URL)
    #[arg(long, env = "LEADERBOARD_TEAMS")]
    pub teams: Option<String>,

    /// Qualified roster (path or URL)
    #[arg(long, env = "LEADERBOARD_QUALIFIED")]
    pub qualified: Option<String>,

    /// Total number of highlighted teams (qualified + provisional)
    #[arg(long, env = "LEADERBOARD_CAP", default_value_t = DEFAULT_CAP)]
    pub cap: usize,
}

impl SourceArgs {
    pub fn source_config(&self) -> SourceConfig {
        let resolve = |explicit: &Option<String>, file: &str| match explicit {
            Some(raw) => Location::parse(raw),
            None => Location::File(self.data_dir.join(file)),
        };

        SourceConfig {
            skills: resolve(&self.skills, SKILLS_FILE),
            teams: resolve(&self.teams, TEAMS_FILE),
            qualified: resolve(&self.qualified, QUALIFIED_FILE),
        }
    }
}
