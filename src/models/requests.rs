use crate::core::{NewMenteeRequest, NewMentor};
use crate::models::domain::{Availability, Urgency};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Request to register a mentor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterMentorRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub college: String,
    #[serde(default)]
    pub topics: BTreeSet<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub karma: u32,
    #[serde(default)]
    pub streak: u32,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: f64,
    #[validate(range(min = 1, max = 100))]
    #[serde(alias = "max_mentees", rename = "maxMentees", default = "default_max_mentees")]
    pub max_mentees: u32,
}

fn default_max_mentees() -> u32 {
    3
}

impl From<RegisterMentorRequest> for NewMentor {
    fn from(req: RegisterMentorRequest) -> Self {
        NewMentor {
            name: req.name,
            college: req.college,
            topics: req.topics,
            availability: req.availability,
            karma: req.karma,
            streak: req.streak,
            rating: req.rating,
            max_mentees: req.max_mentees,
        }
    }
}

/// Request for mentee support
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitRequestRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "mentee_id", rename = "menteeId")]
    pub mentee_id: String,
    pub college: String,
    #[serde(default)]
    pub topics: BTreeSet<String>,
    #[serde(alias = "preferred_availability", rename = "preferredAvailability", default)]
    pub preferred_availability: Availability,
    #[serde(default)]
    pub urgency: Urgency,
}

impl From<SubmitRequestRequest> for NewMenteeRequest {
    fn from(req: SubmitRequestRequest) -> Self {
        NewMenteeRequest {
            mentee_id: req.mentee_id,
            college: req.college,
            topics: req.topics,
            preferred_availability: req.preferred_availability,
            urgency: req.urgency,
        }
    }
}

/// Request to match one pending mentee request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "request_id", rename = "requestId")]
    pub request_id: String,
}

/// Record activity on a match; defaults to now
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionRequest {
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}
