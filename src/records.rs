// 📋 Input records - the three raw datasets as parsed structured data
//
// Field names follow the JSON files produced by the backend scripts:
//   skills_list.json  → SkillRecord  (identifier lives under "team_number"!)
//   team_list.json    → TeamRecord   (identifier lives under "team_id")
//   qualified.json    → QualifiedSet ({"team_name": {"0": "...", ...}})

use crate::error::{LeaderboardError, Result};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// TEAM IDENTIFIER
// ============================================================================

/// Foreign key shared by skill records and team records.
///
/// The JSON kind is kept: the number `7` and the string `"7"` are different
/// identifiers, and text is compared exactly as given (no trimming).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamId {
    Number(u64),
    Text(String),
}

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        TeamId::Text(id.into())
    }

    /// Object keys are always text; all-digit keys are read back as numeric ids
    pub fn from_key(key: &str) -> Self {
        if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = key.parse::<u64>() {
                return TeamId::Number(n);
            }
        }
        TeamId::Text(key.to_string())
    }
}

impl From<u64> for TeamId {
    fn from(id: u64) -> Self {
        TeamId::Number(id)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        TeamId::Text(id.to_string())
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamId::Number(n) => write!(f, "{}", n),
            TeamId::Text(s) => f.write_str(s),
        }
    }
}

/// Anything that cannot be an identifier (null, missing, fractional or
/// negative numbers, booleans, containers) decodes as absent. An absent id
/// never matches a team record.
struct TeamIdVisitor;

impl<'de> Visitor<'de> for TeamIdVisitor {
    type Value = Option<TeamId>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a team identifier (number or string)")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Ok(Some(TeamId::Number(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(u64::try_from(v).ok().map(TeamId::Number))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        // 121849.0 is the same number as 121849
        if v.is_finite() && v.fract() == 0.0 && v >= 0.0 && v < u64::MAX as f64 {
            Ok(Some(TeamId::Number(v as u64)))
        } else {
            Ok(None)
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(Some(TeamId::Text(v.to_string())))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Self::Value, D::Error> {
        d.deserialize_any(TeamIdVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<TeamId>, D::Error> {
    d.deserialize_any(TeamIdVisitor)
}

// ============================================================================
// LENIENT FIELD DECODERS
// ============================================================================

/// Scores are never validated by the sources. Anything that is not a number
/// (or numeric text, as CSV cells are) becomes `None` instead of failing the load.
struct ScoreVisitor;

impl<'de> Visitor<'de> for ScoreVisitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a score")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(v.trim().parse::<f64>().ok())
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Self::Value, D::Error> {
        d.deserialize_any(ScoreVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

fn lenient_score<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<f64>, D::Error> {
    d.deserialize_any(ScoreVisitor)
}

/// Display strings such as team numbers ("1234A") occasionally arrive as bare
/// numbers. Null or non-scalar values become `None`.
struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Self::Value, D::Error> {
        d.deserialize_any(TextVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    d.deserialize_any(TextVisitor)
}

// ============================================================================
// SKILL RECORD
// ============================================================================

/// One team's best skills result, as reported by the skills source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// Foreign key into the team list; `None` never joins
    #[serde(rename = "team_number", default, deserialize_with = "lenient_id")]
    pub team_identifier: Option<TeamId>,

    /// Name as spelled by the skills source; used for the qualification lookup
    #[serde(default, deserialize_with = "lenient_text")]
    pub team_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_score")]
    pub programming_score: Option<f64>,

    #[serde(default, deserialize_with = "lenient_score")]
    pub driver_score: Option<f64>,

    #[serde(default, deserialize_with = "lenient_score")]
    pub total_score: Option<f64>,

    #[serde(default, deserialize_with = "lenient_score")]
    pub highest_auto: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub highest_driver: Option<f64>,
}

impl SkillRecord {
    pub fn new(team_identifier: impl Into<TeamId>, team_name: &str) -> Self {
        SkillRecord {
            team_identifier: Some(team_identifier.into()),
            team_name: Some(team_name.to_string()),
            event_name: None,
            programming_score: None,
            driver_score: None,
            total_score: None,
            highest_auto: None,
            highest_driver: None,
        }
    }

    /// Builder: programming + driver, with total derived from both
    pub fn with_scores(mut self, programming: f64, driver: f64) -> Self {
        self.programming_score = Some(programming);
        self.driver_score = Some(driver);
        self.total_score = Some(programming + driver);
        self
    }

    pub fn with_total(mut self, total: f64) -> Self {
        self.total_score = Some(total);
        self
    }

    pub fn with_highest_auto(mut self, highest_auto: f64) -> Self {
        self.highest_auto = Some(highest_auto);
        self
    }

    pub fn with_event(mut self, event_name: &str) -> Self {
        self.event_name = Some(event_name.to_string());
        self
    }
}

// ============================================================================
// TEAM RECORD
// ============================================================================

/// Reference row from the team list (never mutated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    #[serde(rename = "team_id", default, deserialize_with = "lenient_id")]
    pub team_identifier: Option<TeamId>,

    /// Display identifier, e.g. "1234A"
    #[serde(default, deserialize_with = "lenient_text")]
    pub team_number: Option<String>,

    /// Canonical display name
    #[serde(default, deserialize_with = "lenient_text")]
    pub team_name: Option<String>,
}

impl TeamRecord {
    pub fn new(team_identifier: impl Into<TeamId>, team_number: &str, team_name: &str) -> Self {
        TeamRecord {
            team_identifier: Some(team_identifier.into()),
            team_number: Some(team_number.to_string()),
            team_name: Some(team_name.to_string()),
        }
    }
}

// ============================================================================
// QUALIFIED SET
// ============================================================================

/// Names of teams already qualified. Matched by name, not identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualifiedSet {
    names: HashSet<String>,
}

impl QualifiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the roster from the `qualified.json` payload.
    ///
    /// The expected shape is an object whose `team_name` member maps arbitrary
    /// keys to names; every string value counts, whatever its key. A bare array
    /// of names is accepted as well. Non-string values are skipped.
    pub fn from_roster(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => match map.get("team_name") {
                Some(inner) => Self::collect_strings(inner),
                None => Err(LeaderboardError::Roster(
                    "expected a `team_name` mapping".to_string(),
                )),
            },
            serde_json::Value::Array(_) => Self::collect_strings(value),
            other => Err(LeaderboardError::Roster(format!(
                "expected an object or array, found {}",
                json_kind(other)
            ))),
        }
    }

    fn collect_strings(value: &serde_json::Value) -> Result<Self> {
        let names: Box<dyn Iterator<Item = &serde_json::Value> + '_> = match value {
            serde_json::Value::Object(map) => Box::new(map.values()),
            serde_json::Value::Array(items) => Box::new(items.iter()),
            other => {
                return Err(LeaderboardError::Roster(format!(
                    "`team_name` must be a mapping, found {}",
                    json_kind(other)
                )))
            }
        };

        Ok(names.filter_map(|v| v.as_str()).map(str::to_string).collect())
    }

    pub fn contains(&self, team_name: &str) -> bool {
        self.names.contains(team_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for QualifiedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        QualifiedSet {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// The three datasets, fully materialized. Input to one leaderboard computation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub skills: Vec<SkillRecord>,
    pub teams: Vec<TeamRecord>,
    pub qualified: QualifiedSet,
}

// ============================================================================
// DECODERS
// ============================================================================

pub fn parse_skills_json(bytes: &[u8]) -> Result<Vec<SkillRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Skills exported as CSV, same column names as the JSON keys
pub fn parse_skills_csv(bytes: &[u8]) -> Result<Vec<SkillRecord>> {
    let mut rdr = csv::Reader::from_reader(bytes);

    let mut skills = Vec::new();
    for result in rdr.deserialize() {
        let record: SkillRecord = result?;
        skills.push(record);
    }

    Ok(skills)
}

pub fn parse_teams_json(bytes: &[u8]) -> Result<Vec<TeamRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn parse_qualified_json(bytes: &[u8]) -> Result<QualifiedSet> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    QualifiedSet::from_roster(&value)
}

// ============================================================================
// TESTS
// ============================================================================
