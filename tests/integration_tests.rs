// Integration tests for Mentor Match

use mentor_match::core::{allocate_batch, select_best_match, MatchSelector};
use mentor_match::models::{
    Availability, DayOfWeek, MatchingWeights, MenteeRequest, MentorProfile, Urgency,
};
use chrono::{Duration, Utc};
use std::collections::BTreeSet;

fn topics(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

fn evenings() -> Availability {
    let mut availability = Availability::new();
    availability.insert(DayOfWeek::Monday, topics(&["evening"]));
    availability.insert(DayOfWeek::Wednesday, topics(&["evening"]));
    availability
}

fn create_mentor(id: &str, college: &str, mentor_topics: &[&str], max_mentees: u32) -> MentorProfile {
    MentorProfile {
        id: id.to_string(),
        name: format!("Mentor {}", id),
        college: college.to_string(),
        topics: topics(mentor_topics),
        availability: evenings(),
        karma: 250,
        streak: 8,
        rating: 4.1,
        is_active: true,
        max_mentees,
        current_mentees: vec![],
        last_active_at: Utc::now(),
        created_at: Utc::now(),
    }
}

fn create_request(id: &str, college: &str, request_topics: &[&str], urgency: Urgency) -> MenteeRequest {
    MenteeRequest {
        id: id.to_string(),
        mentee_id: format!("mentee-{}", id),
        college: college.to_string(),
        topics: topics(request_topics),
        preferred_availability: evenings(),
        urgency,
        created_at: Utc::now(),
    }
}

#[test]
fn test_integration_end_to_end_selection() {
    let pool = vec![
        create_mentor("grief", "Stanford", &["grief"], 2),
        create_mentor("anxiety_far", "Berkeley", &["anxiety", "depression"], 2),
        create_mentor("anxiety_near", "STANFORD", &["anxiety", "depression"], 2),
    ];
    let request = create_request("r1", "stanford", &["anxiety", "depression"], Urgency::High);

    let best = select_best_match(&request, &pool, &MatchingWeights::default()).unwrap();

    assert_eq!(best.mentor.id, "anxiety_near");
    assert!(best.score > 0.0 && best.score <= 100.0);
    assert!(best.explanation.strengths.contains(&"Same college connection".to_string()));
    assert!(best.explanation.strengths.contains(&"Strong topic alignment".to_string()));
    assert!(best.explanation.strengths.contains(&"Good schedule compatibility".to_string()));
    assert_eq!(best.explanation.college_match.reason, "Both attend STANFORD");
}

#[test]
fn test_scores_within_range_for_any_weights() {
    let pool = vec![create_mentor("a", "MIT", &["sleep"], 1)];
    let request = create_request("r", "Harvard", &["sleep", "stress"], Urgency::Low);

    for weights in [
        MatchingWeights { topic_overlap: 5.0, college_similarity: 0.0, availability: 1.0, reputation: 0.0 },
        MatchingWeights { topic_overlap: 0.0, college_similarity: 0.0, availability: 0.0, reputation: 0.0 },
        MatchingWeights { topic_overlap: 0.1, college_similarity: 0.1, availability: 0.1, reputation: 0.1 },
    ] {
        let best = select_best_match(&request, &pool, &weights).unwrap();
        assert!(best.score >= 0.0 && best.score <= 100.0, "score {} out of range", best.score);
        let sum = best.explanation.weights.sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_recently_active_mentor_wins_tie() {
    let mut idle = create_mentor("idle", "MIT", &["anxiety"], 1);
    idle.last_active_at = Utc::now() - Duration::weeks(2);
    let active = create_mentor("active", "MIT", &["anxiety"], 1);
    let request = create_request("r", "MIT", &["anxiety"], Urgency::Medium);

    let pool = vec![idle, active];
    let best = MatchSelector::with_default_weights()
        .select_best(&request, &pool)
        .unwrap();
    assert_eq!(best.mentor.id, "active");
}

#[test]
fn test_batch_respects_existing_load() {
    let mut busy = create_mentor("busy", "MIT", &["anxiety"], 2);
    busy.current_mentees = vec!["someone".to_string()];
    let pool = vec![busy];
    let requests = vec![
        create_request("a", "MIT", &["anxiety"], Urgency::Medium),
        create_request("b", "MIT", &["anxiety"], Urgency::High),
    ];

    let result = allocate_batch(&requests, &pool, &MatchingWeights::default());

    assert_eq!(result.matched_count(), 1);
    assert_eq!(result.decisions[0].mentee.id, "b");
    assert!(result.decisions[0].assignment.is_some());
    assert!(result.decisions[1].assignment.is_none());
}

#[test]
fn test_batch_skips_inactive_mentors() {
    let mut resting = create_mentor("resting", "MIT", &["anxiety"], 5);
    resting.is_active = false;
    let pool = vec![resting, create_mentor("on_duty", "Harvard", &[], 1)];
    let requests = vec![
        create_request("a", "MIT", &["anxiety"], Urgency::Low),
        create_request("b", "MIT", &["anxiety"], Urgency::Low),
    ];

    let result = allocate_batch(&requests, &pool, &MatchingWeights::default());

    assert_eq!(result.decisions[0].assignment.as_ref().unwrap().mentor.id, "on_duty");
    assert!(result.decisions[1].assignment.is_none());
    assert_eq!(result.remaining.remaining("resting"), 5);
}

#[test]
fn test_batch_is_deterministic() {
    let pool: Vec<MentorProfile> = (0..5)
        .map(|i| create_mentor(&format!("m{}", i), "MIT", &["anxiety", "stress"], 1 + i % 2))
        .collect();
    let requests: Vec<MenteeRequest> = (0..8)
        .map(|i| {
            let urgency = match i % 3 {
                0 => Urgency::High,
                1 => Urgency::Medium,
                _ => Urgency::Low,
            };
            create_request(&format!("r{}", i), "MIT", &["anxiety"], urgency)
        })
        .collect();

    let summarize = || {
        allocate_batch(&requests, &pool, &MatchingWeights::default())
            .decisions
            .iter()
            .map(|d| (d.mentee.id.clone(), d.assignment.as_ref().map(|a| a.mentor.id.clone())))
            .collect::<Vec<_>>()
    };

    assert_eq!(summarize(), summarize());
}
