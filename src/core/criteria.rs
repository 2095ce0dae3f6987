use crate::models::{Availability, DayOfWeek, MentorProfile};
use std::collections::BTreeSet;

/// Karma above this adds nothing to reputation
pub const KARMA_CAP: u32 = 1000;
/// Streak weeks above this add nothing to reputation
pub const STREAK_CAP: u32 = 52;
pub const MAX_RATING: f64 = 5.0;

/// Raw [0, 1] criterion values for one mentor/mentee pairing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionValues {
    pub topic_overlap: f64,
    pub college_match: f64,
    pub availability_overlap: f64,
    pub reputation: f64,
}

/// Fraction of the mentee's topics the mentor also covers (0-1)
///
/// An empty mentee topic list scores 0.
#[inline]
pub fn topic_overlap(mentor_topics: &BTreeSet<String>, mentee_topics: &BTreeSet<String>) -> f64 {
    if mentee_topics.is_empty() {
        return 0.0;
    }

    let shared = mentee_topics.intersection(mentor_topics).count();
    shared as f64 / mentee_topics.len() as f64
}

/// Topics present on both sides, in sorted order
pub fn shared_topics<'a>(
    mentor_topics: &'a BTreeSet<String>,
    mentee_topics: &'a BTreeSet<String>,
) -> Vec<&'a str> {
    mentee_topics
        .intersection(mentor_topics)
        .map(String::as_str)
        .collect()
}

/// Fraction of the mentee's requested slots the mentor also offers (0-1)
///
/// Slots are compared day by day over the Monday-first week. No requested
/// slots at all scores 0.
pub fn availability_overlap(mentor: &Availability, mentee: &Availability) -> f64 {
    let (matched, requested) = DayOfWeek::ALL.iter().fold((0usize, 0usize), |(matched, requested), day| {
        let Some(wanted) = mentee.get(day) else {
            return (matched, requested);
        };

        let offered = mentor
            .get(day)
            .map(|slots| wanted.intersection(slots).count())
            .unwrap_or(0);

        (matched + offered, requested + wanted.len())
    });

    if requested == 0 {
        return 0.0;
    }

    matched as f64 / requested as f64
}

/// 1 when both colleges are the same after trimming and ignoring case, else 0
#[inline]
pub fn college_similarity(mentor_college: &str, mentee_college: &str) -> f64 {
    if same_college(mentor_college, mentee_college) { 1.0 } else { 0.0 }
}

pub(crate) fn same_college(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Mentor reputation (0-1)
///
/// score = 0.4 * min(karma, 1000) / 1000
///       + 0.4 * rating / 5
///       + 0.2 * min(streak, 52) / 52
pub fn reputation_score(mentor: &MentorProfile) -> f64 {
    let karma = mentor.karma.min(KARMA_CAP) as f64 / KARMA_CAP as f64;
    let rating = mentor.rating.clamp(0.0, MAX_RATING) / MAX_RATING;
    let streak = mentor.streak.min(STREAK_CAP) as f64 / STREAK_CAP as f64;

    0.4 * karma + 0.4 * rating + 0.2 * streak
}
