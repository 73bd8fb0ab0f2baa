// 🔗 Merger - join skills with team identity + qualification flag
//
// Skills are the driving side of an outer join: every skill record yields
// exactly one draft, whether or not a team record matches.
// Qualification is looked up by the SKILL's team name, not the joined name.

use crate::records::{QualifiedSet, SkillRecord, TeamId, TeamRecord};
use std::collections::HashMap;
use tracing::debug;

/// Display name used when no team record matches (or the match has no name)
pub const UNKNOWN_TEAM_NAME: &str = "Unknown";

/// A joined record before ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTeamDraft {
    pub team_identifier: Option<TeamId>,
    pub team_number: Option<String>,
    pub team_name: String,
    pub programming_score: Option<f64>,
    pub driver_score: Option<f64>,
    pub total_score: Option<f64>,
    pub highest_auto: Option<f64>,
    pub is_qualified: bool,
}

/// Hash index over the team list.
///
/// Equivalent to a first-match linear scan: when an identifier appears more
/// than once, the earliest record wins. Records without an identifier are
/// left out, so an absent id never matches.
pub struct TeamIndex<'a> {
    by_id: HashMap<&'a TeamId, &'a TeamRecord>,
}

impl<'a> TeamIndex<'a> {
    pub fn build(teams: &'a [TeamRecord]) -> Self {
        let mut by_id = HashMap::with_capacity(teams.len());
        for team in teams {
            if let Some(id) = &team.team_identifier {
                by_id.entry(id).or_insert(team);
            }
        }
        TeamIndex { by_id }
    }

    pub fn get(&self, id: &TeamId) -> Option<&'a TeamRecord> {
        self.by_id.get(id).copied()
    }
}

/// Join every skill record with its team record and tag qualification.
///
/// Output keeps the input order of `skills`; ranks are not assigned here.
pub fn merge(
    skills: &[SkillRecord],
    teams: &[TeamRecord],
    qualified: &QualifiedSet,
) -> Vec<RankedTeamDraft> {
    let index = TeamIndex::build(teams);

    skills
        .iter()
        .map(|skill| {
            let team = skill.team_identifier.as_ref().and_then(|id| index.get(id));
            if team.is_none() {
                debug!(team_id = ?skill.team_identifier, "no team record for skill entry");
            }

            let team_name = team
                .and_then(|t| t.team_name.as_deref())
                .filter(|name| !name.is_empty())
                .unwrap_or(UNKNOWN_TEAM_NAME)
                .to_string();

            RankedTeamDraft {
                team_identifier: skill.team_identifier.clone(),
                team_number: team.and_then(|t| t.team_number.clone()),
                team_name,
                programming_score: skill.programming_score,
                driver_score: skill.driver_score,
                total_score: skill.total_score,
                highest_auto: skill.highest_auto,
                is_qualified: skill
                    .team_name
                    .as_deref()
                    .is_some_and(|name| qualified.contains(name)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_skill(id: u64, name: &str, total: f64) -> SkillRecord {
        SkillRecord::new(id, name).with_total(total).with_highest_auto(0.0)
    }

    #[test]
    fn test_merge_joins_by_identifier() {
        let skills = vec![create_test_skill(1, "Alpha", 100.0)];
        let teams = vec![TeamRecord::new(1, "1A", "Alpha Robotics")];

        let drafts = merge(&skills, &teams, &QualifiedSet::new());

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].team_number.as_deref(), Some("1A"));
        assert_eq!(drafts[0].team_name, "Alpha Robotics");
        assert_eq!(drafts[0].total_score, Some(100.0));
        assert!(!drafts[0].is_qualified);
    }

    #[test]
    fn test_unmatched_skill_falls_back_to_unknown() {
        let skills = vec![create_test_skill(99, "Ghost", 10.0)];
        let teams = vec![TeamRecord::new(1, "1A", "Alpha")];

        let drafts = merge(&skills, &teams, &QualifiedSet::new());

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].team_name, UNKNOWN_TEAM_NAME);
        assert_eq!(drafts[0].team_number, None);
    }

    #[test]
    fn test_nameless_team_record_falls_back_to_unknown() {
        let skills = vec![create_test_skill(1, "Alpha", 10.0)];
        let teams = vec![TeamRecord {
            team_identifier: Some(TeamId::from(1)),
            team_number: Some("1A".to_string()),
            team_name: None,
        }];

        let drafts = merge(&skills, &teams, &QualifiedSet::new());

        assert_eq!(drafts[0].team_name, UNKNOWN_TEAM_NAME);
        assert_eq!(drafts[0].team_number.as_deref(), Some("1A"));
    }

    #[test]
    fn test_qualification_uses_skill_name_not_team_name() {
        let skills = vec![
            create_test_skill(1, "alpha (skills spelling)", 10.0),
            create_test_skill(2, "Beta", 20.0),
        ];
        let teams = vec![
            TeamRecord::new(1, "1A", "Alpha"),
            TeamRecord::new(2, "2B", "Beta Canonical"),
        ];
        let qualified: QualifiedSet = ["Alpha", "Beta"].into_iter().collect();

        let drafts = merge(&skills, &teams, &qualified);

        // Canonical name matches the roster, but the skills spelling does not
        assert!(!drafts[0].is_qualified);
        assert!(drafts[1].is_qualified);
    }

    #[test]
    fn test_duplicate_team_ids_first_match_wins() {
        let skills = vec![create_test_skill(1, "Alpha", 10.0)];
        let teams = vec![
            TeamRecord::new(1, "1A", "First"),
            TeamRecord::new(1, "1B", "Second"),
        ];

        let drafts = merge(&skills, &teams, &QualifiedSet::new());

        assert_eq!(drafts[0].team_name, "First");
        let index = TeamIndex::build(&teams);
        assert_eq!(index.get(&TeamId::from(1)).map(|t| t.team_number.as_deref()), Some(Some("1A")));
    }

    #[test]
    fn test_every_skill_yields_one_draft() {
        let skills: Vec<_> = (0..10).map(|i| create_test_skill(i, "T", i as f64)).collect();
        let teams = vec![TeamRecord::new(3, "3C", "Three")];

        let drafts = merge(&skills, &teams, &QualifiedSet::new());

        assert_eq!(drafts.len(), skills.len());
        for (draft, skill) in drafts.iter().zip(&skills) {
            assert_eq!(draft.team_identifier, skill.team_identifier);
        }
    }

    #[test]
    fn test_identifier_kind_must_match_exactly() {
        let skills = vec![
            create_test_skill(7, "Seven", 10.0),
            SkillRecord::new(" 8", "Eight").with_total(5.0),
        ];
        let teams = vec![
            TeamRecord::new("7", "7A", "Seven Text"),
            TeamRecord::new("8", "8A", "Eight Text"),
        ];

        let drafts = merge(&skills, &teams, &QualifiedSet::new());

        // Number 7 is not the string "7", and " 8" is not "8"
        assert_eq!(drafts[0].team_name, UNKNOWN_TEAM_NAME);
        assert_eq!(drafts[1].team_name, UNKNOWN_TEAM_NAME);
    }

    #[test]
    fn test_absent_identifier_never_joins() {
        let mut skill = create_test_skill(1, "Alpha", 10.0);
        skill.team_identifier = None;
        let nameless_team = TeamRecord {
            team_identifier: None,
            team_number: Some("0X".to_string()),
            team_name: Some("No Id".to_string()),
        };

        let drafts = merge(&[skill], &[nameless_team], &QualifiedSet::new());

        assert_eq!(drafts[0].team_name, UNKNOWN_TEAM_NAME);
        assert_eq!(drafts[0].team_number, None);
    }

    #[test]
    fn test_absent_skill_name_is_not_qualified() {
        let mut skill = create_test_skill(1, "", 10.0);
        skill.team_name = None;
        let qualified: QualifiedSet = [""].into_iter().collect();

        let drafts = merge(&[skill], &[], &qualified);

        assert!(!drafts[0].is_qualified);
    }
}
