use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Day of the week, in the canonical Monday-first order used for availability scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];
}

/// Weekly availability: day -> time-slot tags (e.g. "morning", "18:00-19:00")
pub type Availability = BTreeMap<DayOfWeek, BTreeSet<String>>;

/// Volunteer mentor profile, as supplied by the mentor store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub college: String,
    #[serde(default)]
    pub topics: BTreeSet<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub karma: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "maxMentees")]
    pub max_mentees: u32,
    #[serde(rename = "currentMentees", default)]
    pub current_mentees: Vec<String>,
    #[serde(rename = "lastActiveAt")]
    pub last_active_at: DateTime<Utc>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl MentorProfile {
    /// Open mentee slots according to the profile itself
    pub fn open_slots(&self) -> u32 {
        (self.max_mentees as usize).saturating_sub(self.current_mentees.len()) as u32
    }

    /// Active and below capacity
    pub fn is_eligible(&self) -> bool {
        self.is_active && self.current_mentees.len() < self.max_mentees as usize
    }
}

fn default_true() -> bool { true }

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Medium
    }
}

/// A mentee's request for support
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenteeRequest {
    pub id: String,
    #[serde(rename = "menteeId")]
    pub mentee_id: String,
    pub college: String,
    #[serde(default)]
    pub topics: BTreeSet<String>,
    #[serde(rename = "preferredAvailability", default)]
    pub preferred_availability: Availability,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Matched,
    Expired,
}

/// Relative importance of each matching criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchingWeights {
    #[serde(rename = "topicOverlap")]
    pub topic_overlap: f64,
    #[serde(rename = "collegeSimilarity")]
    pub college_similarity: f64,
    pub availability: f64,
    pub reputation: f64,
}

impl MatchingWeights {
    pub fn sum(&self) -> f64 {
        self.topic_overlap + self.college_similarity + self.availability + self.reputation
    }
}

impl Default for MatchingWeights {
    fn default() -> Self {
        Self {
            topic_overlap: 0.4,
            college_similarity: 0.2,
            availability: 0.2,
            reputation: 0.2,
        }
    }
}

/// One criterion's contribution (0-100 scale) to the total score, with its audit text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: f64,
    pub reason: String,
}

/// Full audit trail for why a mentor was paired with a mentee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchExplanation {
    #[serde(rename = "topicOverlap")]
    pub topic_overlap: CriterionScore,
    #[serde(rename = "collegeMatch")]
    pub college_match: CriterionScore,
    #[serde(rename = "availabilityOverlap")]
    pub availability_overlap: CriterionScore,
    pub reputation: CriterionScore,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
    pub strengths: Vec<String>,
    pub considerations: Vec<String>,
    pub weights: MatchingWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Active,
    Completed,
    Cancelled,
    Expired,
}

/// Returned when a status change is attempted on a match that is no longer active
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move match from {from:?} to {to:?}")]
pub struct InvalidTransition {
    pub from: MatchStatus,
    pub to: MatchStatus,
}

/// A mentor/mentee pairing and its lifecycle timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorMatch {
    pub id: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "mentorId")]
    pub mentor_id: String,
    #[serde(rename = "menteeId")]
    pub mentee_id: String,
    pub score: f64,
    pub explanation: MatchExplanation,
    pub status: MatchStatus,
    #[serde(rename = "matchedAt")]
    pub matched_at: DateTime<Utc>,
    #[serde(rename = "sessionStartedAt", default)]
    pub session_started_at: Option<DateTime<Utc>>,
    #[serde(rename = "lastInteractionAt", default)]
    pub last_interaction_at: Option<DateTime<Utc>>,
    #[serde(rename = "expiresAt", default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl MentorMatch {
    /// Most recent activity: last interaction, else session start, else match time
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_interaction_at
            .or(self.session_started_at)
            .unwrap_or(self.matched_at)
    }

    pub fn is_active(&self) -> bool {
        self.status == MatchStatus::Active
    }

    pub fn complete(&mut self) -> Result<(), InvalidTransition> {
        self.transition(MatchStatus::Completed)
    }

    pub fn cancel(&mut self) -> Result<(), InvalidTransition> {
        self.transition(MatchStatus::Cancelled)
    }

    pub fn record_interaction(&mut self, at: DateTime<Utc>) -> Result<(), InvalidTransition> {
        if !self.is_active() {
            return Err(InvalidTransition { from: self.status, to: MatchStatus::Active });
        }
        self.last_interaction_at = Some(at);
        Ok(())
    }

    fn transition(&mut self, to: MatchStatus) -> Result<(), InvalidTransition> {
        if !self.is_active() {
            return Err(InvalidTransition { from: self.status, to });
        }
        self.status = to;
        Ok(())
    }
}

/// Mentee feedback on a finished match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorReview {
    pub id: String,
    #[serde(rename = "matchId")]
    pub match_id: String,
    #[serde(rename = "reviewerId")]
    pub reviewer_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
