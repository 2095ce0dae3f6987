// Core algorithm exports
pub mod allocator;
pub mod clock;
pub mod criteria;
pub mod explain;
pub mod lifecycle;
pub mod selector;
pub mod weights;

pub use allocator::{allocate_batch, urgency_order, Allocation, BatchAllocation, CapacityLedger};
pub use clock::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidGenerator};
pub use criteria::{availability_overlap, college_similarity, reputation_score, topic_overlap, CriterionValues};
pub use explain::explain_match;
pub use lifecycle::{
    cleanup_inactive_matches, should_cleanup, CleanupResult, MatchLifecycleManager, NewMenteeRequest,
    NewMentor, INACTIVE_SESSION_THRESHOLD_MS,
};
pub use selector::{compare_candidates, select_best_match, MatchCandidate, MatchSelector};
pub use weights::normalize_weights;
