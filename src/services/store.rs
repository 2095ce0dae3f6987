use crate::core::{allocate_batch, MatchLifecycleManager, MatchSelector, NewMenteeRequest, NewMentor};
use crate::models::{
    InvalidTransition, MatchExplanation, MenteeRequest, MentorMatch, MentorProfile, RequestStatus,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur with store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request {0} is not pending")]
    RequestNotPending(String),

    #[error("Mentor {0} has no remaining capacity")]
    CapacityExhausted(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(#[from] InvalidTransition),
}

#[derive(Debug, Clone)]
struct StoredRequest {
    request: MenteeRequest,
    status: RequestStatus,
}

#[derive(Debug, Default)]
struct StoreState {
    mentors: BTreeMap<String, MentorProfile>,
    requests: BTreeMap<String, StoredRequest>,
    matches: BTreeMap<String, MentorMatch>,
}

/// What a cleanup sweep changed
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    /// Matches moved to `expired`
    pub matches: Vec<MentorMatch>,
    /// Pending requests that went unmatched for longer than the threshold
    pub requests: Vec<String>,
}

/// A match chosen by the selector, not yet committed
struct Pick {
    mentor_id: String,
    score: f64,
    explanation: MatchExplanation,
}

/// In-memory mentor / request / match store
///
/// All mentor capacity lives behind one async mutex. Selection and the
/// capacity claim that follows it happen inside the same critical section,
/// so concurrent requests can never overbook a mentor.
pub struct MatchStore {
    state: Mutex<StoreState>,
    selector: MatchSelector,
    lifecycle: MatchLifecycleManager,
}

impl MatchStore {
    pub fn new(selector: MatchSelector, lifecycle: MatchLifecycleManager) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            selector,
            lifecycle,
        }
    }

    pub async fn register_mentor(&self, mentor: NewMentor) -> MentorProfile {
        let mentor = self.lifecycle.create_mentor(mentor);
        let mut state = self.state.lock().await;
        state.mentors.insert(mentor.id.clone(), mentor.clone());

        tracing::info!("Registered mentor {} (capacity {})", mentor.id, mentor.max_mentees);
        mentor
    }

    pub async fn mentor(&self, mentor_id: &str) -> Result<MentorProfile, StoreError> {
        let state = self.state.lock().await;
        state
            .mentors
            .get(mentor_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("mentor {}", mentor_id)))
    }

    pub async fn submit_request(&self, request: NewMenteeRequest) -> MenteeRequest {
        let request = self.lifecycle.create_request(request);
        let mut state = self.state.lock().await;
        state.requests.insert(
            request.id.clone(),
            StoredRequest {
                request: request.clone(),
                status: RequestStatus::Pending,
            },
        );

        tracing::debug!("Request {} submitted ({:?})", request.id, request.urgency);
        request
    }

    pub async fn request_status(&self, request_id: &str) -> Result<RequestStatus, StoreError> {
        let state = self.state.lock().await;
        state
            .requests
            .get(request_id)
            .map(|stored| stored.status)
            .ok_or_else(|| StoreError::NotFound(format!("request {}", request_id)))
    }

    pub async fn get_match(&self, match_id: &str) -> Result<MentorMatch, StoreError> {
        let state = self.state.lock().await;
        state
            .matches
            .get(match_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("match {}", match_id)))
    }

    /// Match one pending request against the current mentor pool
    ///
    /// Returns `Ok(None)` when no mentor is eligible; the request stays pending.
    pub async fn find_match(&self, request_id: &str) -> Result<Option<MentorMatch>, StoreError> {
        let mut state = self.state.lock().await;

        let stored = state
            .requests
            .get(request_id)
            .ok_or_else(|| StoreError::NotFound(format!("request {}", request_id)))?;
        if stored.status != RequestStatus::Pending {
            return Err(StoreError::RequestNotPending(request_id.to_string()));
        }
        let request = stored.request.clone();

        let pick = self
            .selector
            .select_best(&request, state.mentors.values())
            .map(|candidate| Pick {
                mentor_id: candidate.mentor.id.clone(),
                score: candidate.score,
                explanation: candidate.explanation,
            });

        match pick {
            Some(pick) => {
                let created = self.commit(&mut state, &request, pick)?;
                Ok(Some(created))
            }
            None => {
                tracing::info!("No eligible mentor for request {}", request_id);
                Ok(None)
            }
        }
    }

    /// Allocate every pending request in one batch
    ///
    /// Pending requests are taken oldest first; the allocator then orders them
    /// by urgency. Unmatched requests stay pending.
    pub async fn allocate_pending(
        &self,
    ) -> Result<Vec<(MenteeRequest, Option<MentorMatch>)>, StoreError> {
        let mut state = self.state.lock().await;

        let mut pending: Vec<MenteeRequest> = state
            .requests
            .values()
            .filter(|stored| stored.status == RequestStatus::Pending)
            .map(|stored| stored.request.clone())
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let pool: Vec<MentorProfile> = state.mentors.values().cloned().collect();

        let decisions: Vec<(MenteeRequest, Option<Pick>)> =
            allocate_batch(&pending, &pool, self.selector.weights())
                .decisions
                .into_iter()
                .map(|decision| {
                    let pick = decision.assignment.map(|candidate| Pick {
                        mentor_id: candidate.mentor.id.clone(),
                        score: candidate.score,
                        explanation: candidate.explanation,
                    });
                    (decision.mentee.clone(), pick)
                })
                .collect();

        let mut results = Vec::with_capacity(decisions.len());
        for (request, pick) in decisions {
            let created = match pick {
                Some(pick) => Some(self.commit(&mut state, &request, pick)?),
                None => None,
            };
            results.push((request, created));
        }

        let matched = results.iter().filter(|(_, m)| m.is_some()).count();
        tracing::info!("Batch allocation matched {} of {} pending requests", matched, results.len());

        Ok(results)
    }

    pub async fn complete_match(&self, match_id: &str) -> Result<MentorMatch, StoreError> {
        self.finish(match_id, MentorMatch::complete).await
    }

    pub async fn cancel_match(&self, match_id: &str) -> Result<MentorMatch, StoreError> {
        self.finish(match_id, MentorMatch::cancel).await
    }

    /// Touch an active match; `at` defaults to the lifecycle clock
    pub async fn record_interaction(
        &self,
        match_id: &str,
        at: Option<DateTime<Utc>>,
    ) -> Result<MentorMatch, StoreError> {
        let at = at.unwrap_or_else(|| self.lifecycle.now());
        let mut state = self.state.lock().await;

        let mentor_match = state
            .matches
            .get_mut(match_id)
            .ok_or_else(|| StoreError::NotFound(format!("match {}", match_id)))?;
        mentor_match.record_interaction(at)?;
        let updated = mentor_match.clone();

        if let Some(mentor) = state.mentors.get_mut(&updated.mentor_id) {
            mentor.last_active_at = mentor.last_active_at.max(at);
        }

        Ok(updated)
    }

    /// Expire idle matches, free their mentor slots, and expire stale requests
    pub async fn cleanup_inactive(&self) -> Sweep {
        let mut state = self.state.lock().await;

        let active: Vec<MentorMatch> = state
            .matches
            .values()
            .filter(|m| m.is_active())
            .cloned()
            .collect();
        let result = self.lifecycle.cleanup_inactive_matches(&active);

        for expired in &result.cleaned {
            release_slot(&mut state, &expired.mentor_id, &expired.mentee_id);
            state.matches.insert(expired.id.clone(), expired.clone());
        }

        let mut requests = Vec::new();
        for (id, stored) in state.requests.iter_mut() {
            if stored.status == RequestStatus::Pending && self.lifecycle.is_request_stale(&stored.request) {
                stored.status = RequestStatus::Expired;
                requests.push(id.clone());
            }
        }

        if !result.cleaned.is_empty() || !requests.is_empty() {
            tracing::info!(
                "Expired {} inactive matches and {} stale requests",
                result.cleaned.len(),
                requests.len()
            );
        }

        Sweep {
            matches: result.cleaned,
            requests,
        }
    }

    async fn finish(
        &self,
        match_id: &str,
        transition: fn(&mut MentorMatch) -> Result<(), InvalidTransition>,
    ) -> Result<MentorMatch, StoreError> {
        let mut state = self.state.lock().await;

        let mentor_match = state
            .matches
            .get_mut(match_id)
            .ok_or_else(|| StoreError::NotFound(format!("match {}", match_id)))?;
        transition(mentor_match)?;
        let updated = mentor_match.clone();

        release_slot(&mut state, &updated.mentor_id, &updated.mentee_id);
        tracing::info!("Match {} is now {:?}", updated.id, updated.status);

        Ok(updated)
    }

    /// Claim a mentor slot and record the match
    ///
    /// Capacity is re-checked here (compare-and-decrement) even though the
    /// caller selected an eligible mentor under the same lock.
    fn commit(
        &self,
        state: &mut StoreState,
        request: &MenteeRequest,
        pick: Pick,
    ) -> Result<MentorMatch, StoreError> {
        let mentor = state
            .mentors
            .get_mut(&pick.mentor_id)
            .ok_or_else(|| StoreError::NotFound(format!("mentor {}", pick.mentor_id)))?;
        if !mentor.is_eligible() {
            tracing::warn!("Mentor {} filled up before request {} committed", mentor.id, request.id);
            return Err(StoreError::CapacityExhausted(pick.mentor_id));
        }
        mentor.current_mentees.push(request.mentee_id.clone());

        let created = self.lifecycle.create_match(
            &request.id,
            &pick.mentor_id,
            &request.mentee_id,
            pick.score,
            pick.explanation,
        );
        state.matches.insert(created.id.clone(), created.clone());
        if let Some(stored) = state.requests.get_mut(&request.id) {
            stored.status = RequestStatus::Matched;
        }

        tracing::info!(
            "Matched request {} to mentor {} (score {})",
            request.id,
            created.mentor_id,
            created.score
        );

        Ok(created)
    }
}

fn release_slot(state: &mut StoreState, mentor_id: &str, mentee_id: &str) {
    if let Some(mentor) = state.mentors.get_mut(mentor_id) {
        if let Some(pos) = mentor.current_mentees.iter().position(|id| id == mentee_id) {
            mentor.current_mentees.remove(pos);
        }
    }
}

impl std::fmt::Debug for MatchStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchStore")
            .field("selector", &self.selector)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
