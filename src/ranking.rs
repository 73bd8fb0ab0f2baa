// 🏆 Ranking Engine - cascading sort + dense 1-based ranks
//
// Order: total_score desc → highest_auto desc → driver_score desc.
// Absent or NaN scores sort below every present value (treated as -inf).
// The sort is stable, so entries tied on all three keys keep their input order.

use crate::highlight::HighlightStatus;
use crate::merger::RankedTeamDraft;
use crate::records::TeamId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// RANKED TEAM
// ============================================================================

/// One leaderboard row. Built fresh on every computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTeam {
    pub rank: usize,
    pub team_identifier: Option<TeamId>,
    pub team_number: Option<String>,
    pub team_name: String,
    pub programming_score: Option<f64>,
    pub driver_score: Option<f64>,
    pub total_score: Option<f64>,
    pub highest_auto: Option<f64>,
    pub is_qualified: bool,
    pub status: HighlightStatus,
}

impl RankedTeam {
    fn from_draft(rank: usize, draft: RankedTeamDraft) -> Self {
        RankedTeam {
            rank,
            team_identifier: draft.team_identifier,
            team_number: draft.team_number,
            team_name: draft.team_name,
            programming_score: draft.programming_score,
            driver_score: draft.driver_score,
            total_score: draft.total_score,
            highest_auto: draft.highest_auto,
            is_qualified: draft.is_qualified,
            status: HighlightStatus::None,
        }
    }

    /// Copy of this row carrying a different status
    pub fn with_status(self, status: HighlightStatus) -> Self {
        RankedTeam { status, ..self }
    }
}

// ============================================================================
// RANKING ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RankingEngine;

impl RankingEngine {
    pub fn new() -> Self {
        RankingEngine
    }

    /// Sort drafts and assign rank = position + 1
    pub fn rank(&self, mut drafts: Vec<RankedTeamDraft>) -> Vec<RankedTeam> {
        drafts.sort_by(Self::compare);

        drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| RankedTeam::from_draft(i + 1, draft))
            .collect()
    }

    /// Leaderboard comparator: `Less` means `a` ranks ahead of `b`
    pub fn compare(a: &RankedTeamDraft, b: &RankedTeamDraft) -> Ordering {
        descending(a.total_score, b.total_score)
            .then_with(|| descending(a.highest_auto, b.highest_auto))
            .then_with(|| descending(a.driver_score, b.driver_score))
    }
}

/// Total order over optional scores; None and NaN collapse to -inf
fn score_key(score: Option<f64>) -> f64 {
    match score {
        Some(v) if !v.is_nan() => v,
        _ => f64::NEG_INFINITY,
    }
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    // NaN is gone after score_key, so partial_cmp always answers
    score_key(b)
        .partial_cmp(&score_key(a))
        .unwrap_or(Ordering::Equal)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_draft(
        id: u64,
        total: Option<f64>,
        auto: Option<f64>,
        driver: Option<f64>,
    ) -> RankedTeamDraft {
        RankedTeamDraft {
            team_identifier: Some(TeamId::from(id)),
            team_number: Some(format!("{}A", id)),
            team_name: format!("Team {}", id),
            programming_score: None,
            driver_score: driver,
            total_score: total,
            highest_auto: auto,
            is_qualified: false,
        }
    }

    fn ids(ranked: &[RankedTeam]) -> Vec<String> {
        ranked
            .iter()
            .filter_map(|t| t.team_identifier.as_ref().map(ToString::to_string))
            .collect()
    }

    #[test]
    fn test_sorts_by_total_descending() {
        let engine = RankingEngine::new();
        let drafts = vec![
            create_test_draft(1, Some(80.0), Some(0.0), Some(0.0)),
            create_test_draft(2, Some(100.0), Some(0.0), Some(0.0)),
            create_test_draft(3, Some(90.0), Some(0.0), Some(0.0)),
        ];

        let ranked = engine.rank(drafts);

        assert_eq!(ids(&ranked), vec!["2", "3", "1"]);
        assert_eq!(ranked.iter().map(|t| t.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_tie_breaks_cascade() {
        let engine = RankingEngine::new();
        let drafts = vec![
            create_test_draft(1, Some(100.0), Some(30.0), Some(70.0)),
            create_test_draft(2, Some(100.0), Some(40.0), Some(10.0)),
            create_test_draft(3, Some(100.0), Some(30.0), Some(75.0)),
        ];

        let ranked = engine.rank(drafts);

        // 2 wins on highest_auto; 3 beats 1 on driver_score
        assert_eq!(ids(&ranked), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_full_tie_gets_distinct_ranks_in_input_order() {
        let engine = RankingEngine::new();
        let drafts = vec![
            create_test_draft(7, Some(50.0), Some(20.0), Some(30.0)),
            create_test_draft(3, Some(50.0), Some(20.0), Some(30.0)),
        ];

        let first = engine.rank(drafts.clone());
        let second = engine.rank(drafts);

        assert_eq!(first[0].rank, 1);
        assert_eq!(first[1].rank, 2);
        assert_eq!(ids(&first), vec!["7", "3"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_scores_sort_last() {
        let engine = RankingEngine::new();
        let drafts = vec![
            create_test_draft(1, None, Some(99.0), Some(99.0)),
            create_test_draft(2, Some(0.0), None, None),
            create_test_draft(3, Some(f64::NAN), Some(50.0), None),
            create_test_draft(4, Some(-5.0), None, None),
        ];

        let ranked = engine.rank(drafts);

        // 1 and 3 both collapse to -inf on total; 1 wins on highest_auto
        assert_eq!(ids(&ranked), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_missing_tie_breaker_loses_to_present_one() {
        let a = create_test_draft(1, Some(10.0), None, Some(5.0));
        let b = create_test_draft(2, Some(10.0), Some(0.0), Some(1.0));

        assert_eq!(RankingEngine::compare(&a, &b), Ordering::Greater);
        assert_eq!(RankingEngine::compare(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_signed_zero_compares_equal() {
        let a = create_test_draft(1, Some(0.0), Some(0.0), Some(0.0));
        let b = create_test_draft(2, Some(-0.0), Some(-0.0), Some(-0.0));

        assert_eq!(RankingEngine::compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_adjacent_pairs_respect_comparator() {
        let engine = RankingEngine::new();
        let drafts: Vec<_> = (0..40u64)
            .map(|i| {
                create_test_draft(
                    i,
                    Some(((i * 37) % 11) as f64),
                    Some(((i * 13) % 5) as f64),
                    if i % 7 == 0 { None } else { Some((i % 3) as f64) },
                )
            })
            .collect();

        let ranked = engine.rank(drafts);

        assert_eq!(ranked.len(), 40);
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert_eq!(b.rank, a.rank + 1);

            let ta = score_key(a.total_score);
            let tb = score_key(b.total_score);
            assert!(ta >= tb);
            if ta == tb {
                let (aa, ab) = (score_key(a.highest_auto), score_key(b.highest_auto));
                assert!(aa >= ab);
                if aa == ab {
                    assert!(score_key(a.driver_score) >= score_key(b.driver_score));
                }
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(RankingEngine::new().rank(Vec::new()).is_empty());
    }
}
