use crate::core::{
    criteria::{availability_overlap, college_similarity, reputation_score, topic_overlap, CriterionValues},
    explain::explain_match,
    weights::normalize_weights,
};
use crate::models::{MatchExplanation, MatchingWeights, MenteeRequest, MentorProfile};
use std::cmp::Ordering;

/// Raw scores closer than this are treated as tied
pub const SCORE_TIE_TOLERANCE: f64 = 0.001;

/// A scored mentor for one mentee request
#[derive(Debug, Clone)]
pub struct MatchCandidate<'a> {
    pub mentor: &'a MentorProfile,
    /// Percentage score (0-100) rounded to 2 decimals, for display
    pub score: f64,
    /// Unrounded weighted score (0-1), used for ranking
    pub raw_score: f64,
    pub explanation: MatchExplanation,
}

/// Selects the best mentor for a mentee request
///
/// # Pipeline Stages
/// 1. Eligibility filter (active, below capacity)
/// 2. Criterion scoring and explanation
/// 3. Ranking by raw score with the karma / rating / recency tie-break chain
#[derive(Debug, Clone)]
pub struct MatchSelector {
    weights: MatchingWeights,
}

impl MatchSelector {
    pub fn new(weights: MatchingWeights) -> Self {
        Self {
            weights: normalize_weights(&weights),
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(MatchingWeights::default())
    }

    /// Normalized weights this selector scores with
    pub fn weights(&self) -> &MatchingWeights {
        &self.weights
    }

    /// Pick the best eligible mentor, or `None` when nobody is eligible
    pub fn select_best<'a, I>(&self, mentee: &MenteeRequest, pool: I) -> Option<MatchCandidate<'a>>
    where
        I: IntoIterator<Item = &'a MentorProfile>,
    {
        let mut considered = 0usize;

        let best = pool
            .into_iter()
            .filter(|mentor| mentor.is_eligible())
            .map(|mentor| {
                considered += 1;
                self.score(mentee, mentor)
            })
            .min_by(compare_candidates);

        match &best {
            Some(candidate) => tracing::debug!(
                "Selected mentor {} for request {} (score {}, {} eligible)",
                candidate.mentor.id,
                mentee.id,
                candidate.score,
                considered
            ),
            None => tracing::debug!("No eligible mentor for request {}", mentee.id),
        }

        best
    }

    /// Score a single mentor against a mentee request, ignoring eligibility
    pub fn score<'a>(&self, mentee: &MenteeRequest, mentor: &'a MentorProfile) -> MatchCandidate<'a> {
        let values = CriterionValues {
            topic_overlap: topic_overlap(&mentor.topics, &mentee.topics),
            college_match: college_similarity(&mentor.college, &mentee.college),
            availability_overlap: availability_overlap(
                &mentor.availability,
                &mentee.preferred_availability,
            ),
            reputation: reputation_score(mentor),
        };

        let raw_score = values.topic_overlap * self.weights.topic_overlap
            + values.college_match * self.weights.college_similarity
            + values.availability_overlap * self.weights.availability
            + values.reputation * self.weights.reputation;

        MatchCandidate {
            mentor,
            score: round_percentage(raw_score),
            raw_score,
            explanation: explain_match(&values, mentor, mentee, &self.weights),
        }
    }
}

impl Default for MatchSelector {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Select the best mentor for `mentee` from `pool` using `weights`
///
/// Convenience wrapper around [`MatchSelector::select_best`].
pub fn select_best_match<'a>(
    mentee: &MenteeRequest,
    pool: &'a [MentorProfile],
    weights: &MatchingWeights,
) -> Option<MatchCandidate<'a>> {
    MatchSelector::new(*weights).select_best(mentee, pool)
}

/// Ranking order: better candidates compare as `Less`
///
/// Keys, in order: raw score (desc, within tolerance), karma (desc),
/// rating (desc), last activity (most recent first).
pub fn compare_candidates(a: &MatchCandidate<'_>, b: &MatchCandidate<'_>) -> Ordering {
    let by_score = if (a.raw_score - b.raw_score).abs() <= SCORE_TIE_TOLERANCE {
        Ordering::Equal
    } else {
        b.raw_score.total_cmp(&a.raw_score)
    };

    by_score
        .then_with(|| b.mentor.karma.cmp(&a.mentor.karma))
        .then_with(|| b.mentor.rating.total_cmp(&a.mentor.rating))
        .then_with(|| b.mentor.last_active_at.cmp(&a.mentor.last_active_at))
}

#[inline]
fn round_percentage(raw: f64) -> f64 {
    (raw * 100.0 * 100.0).round() / 100.0
}
