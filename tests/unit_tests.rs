// Unit tests for Mentor Match

use mentor_match::core::{
    criteria::{availability_overlap, college_similarity, reputation_score, topic_overlap},
    lifecycle::should_cleanup,
    weights::normalize_weights,
    FixedClock, MatchLifecycleManager, SequentialIds,
};
use mentor_match::models::{
    Availability, DayOfWeek, MatchStatus, MatchingWeights, MentorProfile, CriterionScore, MatchExplanation,
};
use chrono::{Duration, TimeZone, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;

fn topics(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

fn empty_explanation() -> MatchExplanation {
    let empty = CriterionScore { score: 0.0, reason: String::new() };
    MatchExplanation {
        topic_overlap: empty.clone(),
        college_match: empty.clone(),
        availability_overlap: empty.clone(),
        reputation: empty,
        total_score: 0.0,
        strengths: vec![],
        considerations: vec![],
        weights: MatchingWeights::default(),
    }
}

#[test]
fn test_normalize_positive_weights() {
    let weights = MatchingWeights {
        topic_overlap: 3.0,
        college_similarity: 0.5,
        availability: 0.5,
        reputation: 1.0,
    };

    let normalized = normalize_weights(&weights);
    assert!((normalized.sum() - 1.0).abs() < 1e-9);
    assert!((normalized.topic_overlap - 0.6).abs() < 1e-9);
}

#[test]
fn test_normalize_zero_weights_falls_back() {
    let zero = MatchingWeights {
        topic_overlap: 0.0,
        college_similarity: 0.0,
        availability: 0.0,
        reputation: 0.0,
    };

    let normalized = normalize_weights(&zero);
    assert_eq!(normalized.topic_overlap, 0.4);
    assert_eq!(normalized.college_similarity, 0.2);
    assert_eq!(normalized.availability, 0.2);
    assert_eq!(normalized.reputation, 0.2);
}

#[test]
fn test_topic_overlap_exact() {
    let score = topic_overlap(&topics(&["anxiety", "depression"]), &topics(&["anxiety", "depression"]));
    assert_eq!(score, 1.0);
}

#[test]
fn test_college_similarity_case_insensitive() {
    assert_eq!(college_similarity("STANFORD", "stanford"), 1.0);
    assert_eq!(college_similarity("stanford\n", " Stanford"), 1.0);
}

#[test]
fn test_availability_counts_per_day() {
    let mut mentor = Availability::new();
    mentor.insert(DayOfWeek::Saturday, topics(&["morning"]));

    let mut mentee = Availability::new();
    // same slot tag on a different day does not count
    mentee.insert(DayOfWeek::Sunday, topics(&["morning"]));
    assert_eq!(availability_overlap(&mentor, &mentee), 0.0);

    mentee.insert(DayOfWeek::Saturday, topics(&["morning"]));
    assert!((availability_overlap(&mentor, &mentee) - 0.5).abs() < 1e-9);
}

#[test]
fn test_reputation_is_bounded() {
    let mentor = MentorProfile {
        id: "m".to_string(),
        name: "M".to_string(),
        college: "MIT".to_string(),
        topics: BTreeSet::new(),
        availability: Availability::new(),
        karma: 50_000,
        streak: 1_000,
        rating: 5.0,
        is_active: true,
        max_mentees: 1,
        current_mentees: vec![],
        last_active_at: Utc::now(),
        created_at: Utc::now(),
    };

    let score = reputation_score(&mentor);
    assert!(score >= 0.0 && score <= 1.0 + 1e-12);
}

#[test]
fn test_should_cleanup_scenarios() {
    let matched_at = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
    let manager = MatchLifecycleManager::new(
        Arc::new(FixedClock::new(matched_at)),
        Arc::new(SequentialIds::new("match")),
    );
    let mut m = manager.create_match("req", "mentor", "mentee", 80.0, empty_explanation());
    let now = matched_at + Duration::days(60);

    m.last_interaction_at = Some(now - Duration::days(35));
    assert!(should_cleanup(&m, now), "35 idle days should expire");

    m.last_interaction_at = Some(now - Duration::days(20));
    assert!(!should_cleanup(&m, now), "20 idle days should not expire");

    m.status = MatchStatus::Completed;
    m.last_interaction_at = Some(now - Duration::days(365));
    assert!(!should_cleanup(&m, now), "completed matches never expire");
}
