use crate::core::criteria::{same_college, shared_topics, CriterionValues};
use crate::models::{CriterionScore, MatchExplanation, MatchingWeights, MenteeRequest, MentorProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Strength,
    Consideration,
}

/// Inputs the qualitative annotations are evaluated against
struct Signals<'a> {
    values: &'a CriterionValues,
    mentor: &'a MentorProfile,
}

struct Annotation {
    kind: Kind,
    label: &'static str,
    applies: fn(&Signals<'_>) -> bool,
}

/// Qualitative heuristics, evaluated in order
const ANNOTATIONS: &[Annotation] = &[
    Annotation {
        kind: Kind::Strength,
        label: "Strong topic alignment",
        applies: |s| s.values.topic_overlap >= 0.7,
    },
    Annotation {
        kind: Kind::Consideration,
        label: "Limited topic overlap",
        applies: |s| s.values.topic_overlap < 0.3,
    },
    Annotation {
        kind: Kind::Strength,
        label: "Same college connection",
        applies: |s| s.values.college_match == 1.0,
    },
    Annotation {
        kind: Kind::Strength,
        label: "Good schedule compatibility",
        applies: |s| s.values.availability_overlap >= 0.5,
    },
    Annotation {
        kind: Kind::Consideration,
        label: "Scheduling may be challenging",
        applies: |s| s.values.availability_overlap < 0.2,
    },
    Annotation {
        kind: Kind::Strength,
        label: "Highly experienced mentor",
        applies: |s| s.mentor.rating >= 4.5 && s.mentor.karma >= 500,
    },
    Annotation {
        kind: Kind::Consideration,
        label: "Developing mentor experience",
        applies: |s| s.mentor.rating < 3.0 || s.mentor.karma < 100,
    },
];

/// Build the audit trail for a pairing
///
/// Each raw criterion value is scaled by its (already normalized) weight and
/// by 100, so the four contributions add up to `total_score` on a 0-100 scale.
pub fn explain_match(
    values: &CriterionValues,
    mentor: &MentorProfile,
    mentee: &MenteeRequest,
    weights: &MatchingWeights,
) -> MatchExplanation {
    let topic_overlap = CriterionScore {
        score: values.topic_overlap * weights.topic_overlap * 100.0,
        reason: topic_reason(mentor, mentee),
    };
    let college_match = CriterionScore {
        score: values.college_match * weights.college_similarity * 100.0,
        reason: college_reason(&mentor.college, &mentee.college),
    };
    let availability_overlap = CriterionScore {
        score: values.availability_overlap * weights.availability * 100.0,
        reason: format!(
            "{}% of requested time slots overlap",
            (values.availability_overlap * 100.0).round()
        ),
    };
    let reputation = CriterionScore {
        score: values.reputation * weights.reputation * 100.0,
        reason: format!(
            "Karma {}, rating {}/5, {}-week streak",
            mentor.karma, mentor.rating, mentor.streak
        ),
    };

    let total_score =
        topic_overlap.score + college_match.score + availability_overlap.score + reputation.score;

    let signals = Signals { values, mentor };
    let mut strengths = Vec::new();
    let mut considerations = Vec::new();
    for annotation in ANNOTATIONS.iter().filter(|a| (a.applies)(&signals)) {
        match annotation.kind {
            Kind::Strength => strengths.push(annotation.label.to_string()),
            Kind::Consideration => considerations.push(annotation.label.to_string()),
        }
    }

    MatchExplanation {
        topic_overlap,
        college_match,
        availability_overlap,
        reputation,
        total_score,
        strengths,
        considerations,
        weights: *weights,
    }
}

fn topic_reason(mentor: &MentorProfile, mentee: &MenteeRequest) -> String {
    let shared = shared_topics(&mentor.topics, &mentee.topics);
    if shared.is_empty() {
        return format!("No shared topics (0 of {} requested)", mentee.topics.len());
    }

    format!(
        "Shares {} of {} requested topics: {}",
        shared.len(),
        mentee.topics.len(),
        shared.join(", ")
    )
}

fn college_reason(mentor_college: &str, mentee_college: &str) -> String {
    if same_college(mentor_college, mentee_college) {
        format!("Both attend {}", mentor_college.trim())
    } else {
        format!(
            "Different colleges ({} vs {})",
            mentor_college.trim(),
            mentee_college.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Urgency};
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn topics(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn mentor(karma: u32, rating: f64) -> MentorProfile {
        MentorProfile {
            id: "mentor".to_string(),
            name: "Mentor".to_string(),
            college: "Stanford".to_string(),
            topics: topics(&["anxiety", "depression", "sleep"]),
            availability: Availability::new(),
            karma,
            streak: 10,
            rating,
            is_active: true,
            max_mentees: 3,
            current_mentees: vec![],
            last_active_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    fn mentee(college: &str) -> MenteeRequest {
        MenteeRequest {
            id: "req".to_string(),
            mentee_id: "mentee".to_string(),
            college: college.to_string(),
            topics: topics(&["anxiety", "depression"]),
            preferred_availability: Availability::new(),
            urgency: Urgency::Medium,
            created_at: Utc::now(),
        }
    }

    fn values(topic: f64, college: f64, availability: f64, reputation: f64) -> CriterionValues {
        CriterionValues {
            topic_overlap: topic,
            college_match: college,
            availability_overlap: availability,
            reputation,
        }
    }

    #[test]
    fn test_contributions_sum_to_total() {
        let explanation = explain_match(
            &values(1.0, 1.0, 0.5, 0.8),
            &mentor(600, 4.8),
            &mentee("stanford"),
            &MatchingWeights::default(),
        );

        assert!((explanation.topic_overlap.score - 40.0).abs() < 1e-9);
        assert!((explanation.college_match.score - 20.0).abs() < 1e-9);
        assert!((explanation.availability_overlap.score - 10.0).abs() < 1e-9);
        assert!((explanation.reputation.score - 16.0).abs() < 1e-9);
        assert!((explanation.total_score - 86.0).abs() < 1e-9);
    }

    #[test]
    fn test_strengths() {
        let explanation = explain_match(
            &values(1.0, 1.0, 0.5, 0.8),
            &mentor(600, 4.8),
            &mentee("stanford"),
            &MatchingWeights::default(),
        );

        assert_eq!(
            explanation.strengths,
            vec![
                "Strong topic alignment",
                "Same college connection",
                "Good schedule compatibility",
                "Highly experienced mentor",
            ]
        );
        assert!(explanation.considerations.is_empty());
    }

    #[test]
    fn test_considerations() {
        let explanation = explain_match(
            &values(0.0, 0.0, 0.1, 0.2),
            &mentor(50, 4.8),
            &mentee("berkeley"),
            &MatchingWeights::default(),
        );

        assert!(explanation.strengths.is_empty());
        assert_eq!(
            explanation.considerations,
            vec![
                "Limited topic overlap",
                "Scheduling may be challenging",
                "Developing mentor experience",
            ]
        );
    }

    #[test]
    fn test_reasons_name_concrete_values() {
        let explanation = explain_match(
            &values(1.0, 0.0, 0.333, 0.5),
            &mentor(420, 3.5),
            &mentee("Berkeley"),
            &MatchingWeights::default(),
        );

        assert_eq!(
            explanation.topic_overlap.reason,
            "Shares 2 of 2 requested topics: anxiety, depression"
        );
        assert_eq!(explanation.college_match.reason, "Different colleges (Stanford vs Berkeley)");
        assert_eq!(explanation.availability_overlap.reason, "33% of requested time slots overlap");
        assert_eq!(explanation.reputation.reason, "Karma 420, rating 3.5/5, 10-week streak");
    }

    #[test]
    fn test_reputation_reason_keeps_unrounded_rating() {
        let explanation = explain_match(
            &values(1.0, 1.0, 0.5, 0.7),
            &mentor(600, 4.46),
            &mentee("stanford"),
            &MatchingWeights::default(),
        );
        assert!(explanation.reputation.reason.contains("rating 4.46/5"));
        assert!(!explanation.strengths.contains(&"Highly experienced mentor".to_string()));

        let explanation = explain_match(
            &values(1.0, 1.0, 0.5, 0.5),
            &mentor(600, 2.96),
            &mentee("stanford"),
            &MatchingWeights::default(),
        );
        assert!(explanation.reputation.reason.contains("rating 2.96/5"));
        assert!(explanation.considerations.contains(&"Developing mentor experience".to_string()));
    }
}
