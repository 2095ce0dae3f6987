// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Availability, CriterionScore, DayOfWeek, InvalidTransition, MatchExplanation, MatchStatus,
    MatchingWeights, MenteeRequest, MentorMatch, MentorProfile, MentorReview, RequestStatus, Urgency,
};
pub use requests::{FindMatchRequest, InteractionRequest, RegisterMentorRequest, SubmitRequestRequest};
pub use responses::{
    AllocationEntry, BatchResponse, CleanupResponse, ErrorResponse, FindMatchResponse, HealthResponse,
};
