//! Mentor Match - explainable, capacity-aware mentor matching
//!
//! This library provides the matching engine that pairs mentees with
//! volunteer mentors: weighted multi-criteria scoring, deterministic
//! tie-breaking, urgency-ordered batch allocation under bounded mentor
//! capacity, and match lifecycle expiry.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    allocate_batch, normalize_weights, select_best_match, MatchLifecycleManager, MatchSelector,
};
pub use crate::models::{MatchExplanation, MatchingWeights, MenteeRequest, MentorMatch, MentorProfile};
