use crate::models::domain::{MentorMatch, Urgency};
use serde::{Deserialize, Serialize};

/// Response for the find match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    /// `None` when no mentor was eligible
    #[serde(rename = "match")]
    pub mentor_match: Option<MentorMatch>,
}

/// One decision of a batch allocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationEntry {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "menteeId")]
    pub mentee_id: String,
    pub urgency: Urgency,
    #[serde(rename = "match")]
    pub mentor_match: Option<MentorMatch>,
}

/// Response for the batch endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub allocations: Vec<AllocationEntry>,
    pub matched: usize,
    pub unmatched: usize,
}

/// Response for the cleanup endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub expired: Vec<MentorMatch>,
    pub count: usize,
    #[serde(rename = "expiredRequests")]
    pub expired_requests: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
