// ⚠️ Error types for the retrieval boundary
// The core (merge / rank / highlight) never fails; everything here comes from
// fetching or decoding one of the three datasets.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeaderboardError>;

/// Which of the three input datasets an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Skills,
    Teams,
    Qualified,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Skills => "skills list",
            Dataset::Teams => "team list",
            Dataset::Qualified => "qualified roster",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{location} answered with HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("Malformed qualified roster: {0}")]
    Roster(String),

    /// Retrieval of one dataset failed; the whole computation is abandoned
    #[error("Failed to fetch {dataset} from {location}: {source}")]
    Fetch {
        dataset: Dataset,
        location: String,
        #[source]
        source: Box<LeaderboardError>,
    },
}

impl LeaderboardError {
    pub fn fetch(dataset: Dataset, location: impl Into<String>, source: LeaderboardError) -> Self {
        LeaderboardError::Fetch {
            dataset,
            location: location.into(),
            source: Box::new(source),
        }
    }

    /// Dataset that failed, if the error was raised while fetching one
    pub fn dataset(&self) -> Option<Dataset> {
        match self {
            LeaderboardError::Fetch { dataset, .. } => Some(*dataset),
            _ => None,
        }
    }
}
