use crate::core::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::models::{
    Availability, MatchExplanation, MatchStatus, MenteeRequest, MentorMatch, MentorProfile,
    MentorReview, Urgency,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Idle time after which an active match expires (30 days)
pub const INACTIVE_SESSION_THRESHOLD_MS: i64 = 2_592_000_000;

pub const MIN_REVIEW_RATING: u8 = 1;
pub const MAX_REVIEW_RATING: u8 = 5;

pub fn inactive_session_threshold() -> Duration {
    Duration::milliseconds(INACTIVE_SESSION_THRESHOLD_MS)
}

/// True when an active match has been idle for longer than `threshold`
///
/// Idle time is measured from the last interaction, falling back to the
/// session start and then the match time. Non-active matches never expire.
pub fn should_cleanup_after(mentor_match: &MentorMatch, now: DateTime<Utc>, threshold: Duration) -> bool {
    if mentor_match.status != MatchStatus::Active {
        return false;
    }

    now - mentor_match.last_activity() > threshold
}

/// [`should_cleanup_after`] with the default 30 day threshold
pub fn should_cleanup(mentor_match: &MentorMatch, now: DateTime<Utc>) -> bool {
    should_cleanup_after(mentor_match, now, inactive_session_threshold())
}

/// Matches split by a cleanup sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanupResult {
    /// Untouched records
    pub active: Vec<MentorMatch>,
    /// Copies with status rewritten to `expired`
    pub cleaned: Vec<MentorMatch>,
}

/// Partition `matches` into kept records and newly expired copies
pub fn cleanup_inactive_matches(
    matches: &[MentorMatch],
    now: DateTime<Utc>,
    threshold: Duration,
) -> CleanupResult {
    let mut result = CleanupResult::default();

    for mentor_match in matches {
        if should_cleanup_after(mentor_match, now, threshold) {
            let mut expired = mentor_match.clone();
            expired.status = MatchStatus::Expired;
            result.cleaned.push(expired);
        } else {
            result.active.push(mentor_match.clone());
        }
    }

    result
}

/// Fields for registering a mentor
#[derive(Debug, Clone)]
pub struct NewMentor {
    pub name: String,
    pub college: String,
    pub topics: BTreeSet<String>,
    pub availability: Availability,
    pub karma: u32,
    pub streak: u32,
    pub rating: f64,
    pub max_mentees: u32,
}

/// Fields for a mentee's support request
#[derive(Debug, Clone)]
pub struct NewMenteeRequest {
    pub mentee_id: String,
    pub college: String,
    pub topics: BTreeSet<String>,
    pub preferred_availability: Availability,
    pub urgency: Urgency,
}

/// Creates records and decides when active matches expire
///
/// Time and identifiers come from the injected [`Clock`] and [`IdGenerator`].
#[derive(Clone)]
pub struct MatchLifecycleManager {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    threshold: Duration,
}

impl MatchLifecycleManager {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            clock,
            ids,
            threshold: inactive_session_threshold(),
        }
    }

    /// Override the inactivity threshold (30 days by default)
    pub fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// True when a request has waited unmatched for longer than the threshold
    pub fn is_request_stale(&self, request: &MenteeRequest) -> bool {
        self.clock.now() - request.created_at > self.threshold
    }

    pub fn create_match(
        &self,
        request_id: &str,
        mentor_id: &str,
        mentee_id: &str,
        score: f64,
        explanation: MatchExplanation,
    ) -> MentorMatch {
        let now = self.clock.now();

        MentorMatch {
            id: self.ids.next_id(),
            request_id: request_id.to_string(),
            mentor_id: mentor_id.to_string(),
            mentee_id: mentee_id.to_string(),
            score,
            explanation,
            status: MatchStatus::Active,
            matched_at: now,
            session_started_at: Some(now),
            last_interaction_at: Some(now),
            expires_at: Some(now + self.threshold),
        }
    }

    pub fn create_mentor(&self, mentor: NewMentor) -> MentorProfile {
        let now = self.clock.now();

        MentorProfile {
            id: self.ids.next_id(),
            name: mentor.name,
            college: mentor.college,
            topics: mentor.topics,
            availability: mentor.availability,
            karma: mentor.karma,
            streak: mentor.streak,
            rating: mentor.rating.clamp(0.0, 5.0),
            is_active: true,
            max_mentees: mentor.max_mentees.max(1),
            current_mentees: Vec::new(),
            last_active_at: now,
            created_at: now,
        }
    }

    pub fn create_request(&self, request: NewMenteeRequest) -> MenteeRequest {
        MenteeRequest {
            id: self.ids.next_id(),
            mentee_id: request.mentee_id,
            college: request.college,
            topics: request.topics,
            preferred_availability: request.preferred_availability,
            urgency: request.urgency,
            created_at: self.clock.now(),
        }
    }

    /// Rating is clamped into 1..=5
    pub fn create_review(
        &self,
        match_id: &str,
        reviewer_id: &str,
        rating: i64,
        comment: Option<String>,
    ) -> MentorReview {
        let rating = rating.clamp(MIN_REVIEW_RATING as i64, MAX_REVIEW_RATING as i64) as u8;

        MentorReview {
            id: self.ids.next_id(),
            match_id: match_id.to_string(),
            reviewer_id: reviewer_id.to_string(),
            rating,
            comment,
            created_at: self.clock.now(),
        }
    }

    pub fn should_cleanup(&self, mentor_match: &MentorMatch, now: DateTime<Utc>) -> bool {
        should_cleanup_after(mentor_match, now, self.threshold)
    }

    /// Sweep `matches` against the injected clock
    pub fn cleanup_inactive_matches(&self, matches: &[MentorMatch]) -> CleanupResult {
        cleanup_inactive_matches(matches, self.clock.now(), self.threshold)
    }
}

impl Default for MatchLifecycleManager {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}

impl std::fmt::Debug for MatchLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchLifecycleManager")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
