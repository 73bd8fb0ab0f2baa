// 📥 Data sources - concurrent retrieval of the three datasets
//
// Fan-out / join-all: skills, teams and roster are fetched concurrently and
// the snapshot only exists once all three succeed. The first failure wins
// and no partial snapshot is ever returned.

use crate::error::{Dataset, LeaderboardError, Result};
use crate::records::{
    parse_qualified_json, parse_skills_csv, parse_skills_json, parse_teams_json, QualifiedSet,
    SkillRecord, Snapshot, TeamRecord,
};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const SKILLS_FILE: &str = "skills_list.json";
pub const TEAMS_FILE: &str = "team_list.json";
pub const QUALIFIED_FILE: &str = "qualified.json";

// ============================================================================
// LOCATION
// ============================================================================

/// Where one dataset lives: a local file or an http(s) URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Url(String),
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Location::Url(trimmed.to_string())
        } else {
            Location::File(PathBuf::from(trimmed))
        }
    }

    fn is_csv(&self) -> bool {
        let path = match self {
            Location::File(p) => p.to_string_lossy().to_lowercase(),
            Location::Url(u) => u.split(|c| c == '?' || c == '#').next().unwrap_or(u).to_lowercase(),
        };
        path.ends_with(".csv")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(p) => write!(f, "{}", p.display()),
            Location::Url(u) => f.write_str(u),
        }
    }
}

// ============================================================================
// SOURCE CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub skills: Location,
    pub teams: Location,
    pub qualified: Location,
}

impl SourceConfig {
    /// The three default file names inside one directory
    pub fn from_dir(dir: &Path) -> Self {
        SourceConfig {
            skills: Location::File(dir.join(SKILLS_FILE)),
            teams: Location::File(dir.join(TEAMS_FILE)),
            qualified: Location::File(dir.join(QUALIFIED_FILE)),
        }
    }
}

// ============================================================================
// DATA SOURCE TRAIT
// ============================================================================

/// Supplies a complete snapshot, however the data is obtained
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Snapshot>;

    /// Short description for logs
    fn describe(&self) -> String {
        "data source".to_string()
    }
}

// ============================================================================
// CONFIGURED SOURCE (files + HTTP)
// ============================================================================

pub struct ConfiguredSource {
    config: SourceConfig,
    client: reqwest::Client,
}

impl ConfiguredSource {
    pub fn new(config: SourceConfig) -> Self {
        ConfiguredSource {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn read(&self, dataset: Dataset, location: &Location) -> Result<Vec<u8>> {
        let result = match location {
            Location::File(path) => tokio::fs::read(path).await.map_err(LeaderboardError::from),
            Location::Url(url) => self.get(url).await,
        };

        let bytes = result.map_err(|e| LeaderboardError::fetch(dataset, location.to_string(), e))?;
        info!(dataset = %dataset, location = %location, bytes = bytes.len(), "fetched dataset");
        Ok(bytes)
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LeaderboardError::Status {
                location: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_skills(&self) -> Result<Vec<SkillRecord>> {
        let location = &self.config.skills;
        let bytes = self.read(Dataset::Skills, location).await?;

        let parsed = if location.is_csv() {
            parse_skills_csv(&bytes)
        } else {
            parse_skills_json(&bytes)
        };
        parsed.map_err(|e| LeaderboardError::fetch(Dataset::Skills, location.to_string(), e))
    }

    async fn fetch_teams(&self) -> Result<Vec<TeamRecord>> {
        let location = &self.config.teams;
        let bytes = self.read(Dataset::Teams, location).await?;

        parse_teams_json(&bytes)
            .map_err(|e| LeaderboardError::fetch(Dataset::Teams, location.to_string(), e))
    }

    async fn fetch_qualified(&self) -> Result<QualifiedSet> {
        let location = &self.config.qualified;
        let bytes = self.read(Dataset::Qualified, location).await?;

        parse_qualified_json(&bytes)
            .map_err(|e| LeaderboardError::fetch(Dataset::Qualified, location.to_string(), e))
    }
}

#[async_trait]
impl DataSource for ConfiguredSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let (skills, teams, qualified) =
            tokio::try_join!(self.fetch_skills(), self.fetch_teams(), self.fetch_qualified())?;

        info!(
            skills = skills.len(),
            teams = teams.len(),
            qualified = qualified.len(),
            "snapshot ready"
        );
        if qualified.is_empty() {
            warn!(location = %self.config.qualified, "qualified roster is empty");
        }

        Ok(Snapshot {
            skills,
            teams,
            qualified,
        })
    }

    fn describe(&self) -> String {
        format!(
            "skills={} teams={} qualified={}",
            self.config.skills, self.config.teams, self.config.qualified
        )
    }
}

// ============================================================================
// STATIC SOURCE (in-memory)
// ============================================================================

/// Hands out clones of a fixed snapshot
pub struct StaticSource {
    snapshot: Snapshot,
}

impl StaticSource {
    pub fn new(snapshot: Snapshot) -> Self {
        StaticSource { snapshot }
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory snapshot ({} skills)", self.snapshot.skills.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================
