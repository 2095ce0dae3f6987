use crate::core::selector::{MatchCandidate, MatchSelector};
use crate::models::{MatchingWeights, MenteeRequest, MentorProfile};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Remaining mentee slots per mentor for the duration of one batch
///
/// Built once from the pool and decremented as mentors are claimed. A ledger
/// belongs to a single batch call; share it across threads only behind a lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityLedger {
    remaining: HashMap<String, u32>,
}

impl CapacityLedger {
    pub fn from_pool(pool: &[MentorProfile]) -> Self {
        let remaining = pool
            .iter()
            .map(|mentor| (mentor.id.clone(), mentor.open_slots()))
            .collect();

        Self { remaining }
    }

    /// Slots left for `mentor_id` (0 for unknown mentors)
    pub fn remaining(&self, mentor_id: &str) -> u32 {
        self.remaining.get(mentor_id).copied().unwrap_or(0)
    }

    pub fn has_capacity(&self, mentor_id: &str) -> bool {
        self.remaining(mentor_id) > 0
    }

    /// Take one slot; returns false if the mentor had none left
    pub fn claim(&mut self, mentor_id: &str) -> bool {
        match self.remaining.get_mut(mentor_id) {
            Some(slots) if *slots > 0 => {
                *slots -= 1;
                true
            }
            _ => false,
        }
    }
}

/// Allocation decision for one mentee
#[derive(Debug, Clone)]
pub struct Allocation<'a> {
    pub mentee: &'a MenteeRequest,
    pub assignment: Option<MatchCandidate<'a>>,
}

/// Result of a batch run: decisions in processing order plus the final ledger
#[derive(Debug, Clone)]
pub struct BatchAllocation<'a> {
    pub decisions: Vec<Allocation<'a>>,
    pub remaining: CapacityLedger,
}

impl BatchAllocation<'_> {
    pub fn matched_count(&self) -> usize {
        self.decisions.iter().filter(|d| d.assignment.is_some()).count()
    }
}

/// Order requests by urgency: high first, stable within a tier
pub fn urgency_order(mentees: &[MenteeRequest]) -> Vec<&MenteeRequest> {
    let mut ordered: Vec<&MenteeRequest> = mentees.iter().collect();
    ordered.sort_by_key(|mentee| Reverse(mentee.urgency));
    ordered
}

/// Greedily allocate mentors to many mentees
///
/// Mentees are processed strictly in sequence: each assignment consumes a
/// slot in the ledger before the next mentee is scored, so higher-urgency
/// requests get first claim on scarce mentors.
pub fn allocate_batch<'a>(
    mentees: &'a [MenteeRequest],
    pool: &'a [MentorProfile],
    weights: &MatchingWeights,
) -> BatchAllocation<'a> {
    let selector = MatchSelector::new(*weights);
    let mut ledger = CapacityLedger::from_pool(pool);
    let mut decisions = Vec::with_capacity(mentees.len());

    for mentee in urgency_order(mentees) {
        let available = pool
            .iter()
            .filter(|mentor| mentor.is_active && ledger.has_capacity(&mentor.id));

        let assignment = selector.select_best(mentee, available);

        if let Some(candidate) = &assignment {
            ledger.claim(&candidate.mentor.id);
        }

        decisions.push(Allocation { mentee, assignment });
    }

    let result = BatchAllocation { decisions, remaining: ledger };

    tracing::debug!(
        "Allocated {} of {} mentees across {} mentors",
        result.matched_count(),
        mentees.len(),
        pool.len()
    );

    result
}
