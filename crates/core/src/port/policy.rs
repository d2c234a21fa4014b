// Join Policy Port - the host-extensible veto hook
//
// Policies register by name and run once per join attempt, in
// registration order, in a fixed slot of the evaluation sequence.

use tracing::trace;

use crate::domain::{Actor, JoinRequest, QueueTypeId, RejectReason};

/// What one policy had to say about a join attempt.
///
/// `code` mirrors the legacy error-slot convention: a review forces an
/// immediate rejection only when `objection` is set AND a failing code
/// was written. A code written without an objection stays in the slot
/// and still rejects after the rule chain if nothing else fired first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyReview {
    pub objection: bool,
    pub code: Option<RejectReason>,
}

impl PolicyReview {
    /// No objection, slot untouched
    pub fn clear() -> Self {
        Self {
            objection: false,
            code: None,
        }
    }

    /// Objection with a failing code: rejects immediately
    pub fn deny(code: RejectReason) -> Self {
        Self {
            objection: true,
            code: Some(code),
        }
    }
}

impl Default for PolicyReview {
    fn default() -> Self {
        Self::clear()
    }
}

/// Capability interface consulted once per join attempt.
///
/// Reviews must return promptly; the gate holds its lock across them
/// and neither retries nor awaits.
pub trait JoinPolicy: Send + Sync {
    fn review(&self, actor: &Actor, request: &JoinRequest) -> PolicyReview;

    /// Observer hook, fired after a ticket was issued
    fn on_joined(&self, _actor: &Actor, _queue_type: QueueTypeId) {}
}

/// Ordered policy registry. Built once at composition time; the gate
/// never mutates it.
#[derive(Default)]
pub struct PolicySet {
    policies: Vec<(String, Box<dyn JoinPolicy>)>,
}

impl PolicySet {
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, policy: Box<dyn JoinPolicy>) {
        self.policies.push((name.into(), policy));
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.policies.iter().map(|(name, _)| name.as_str())
    }

    /// Run every policy in order. A later write to the code slot
    /// replaces an earlier one; objections accumulate.
    pub fn review_all(&self, actor: &Actor, request: &JoinRequest) -> PolicyReview {
        let mut combined = PolicyReview::clear();
        for (name, policy) in &self.policies {
            let review = policy.review(actor, request);
            if review.code.is_some() {
                combined.code = review.code;
            }
            if review.objection {
                trace!(policy = %name, actor = actor.id, "policy objected");
                combined.objection = true;
            }
        }
        combined
    }

    /// Fan a successful join out to every policy's observer hook
    pub fn notify_joined(&self, actor: &Actor, queue_type: QueueTypeId) {
        for (_, policy) in &self.policies {
            policy.on_joined(actor, queue_type);
        }
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Policy returning a fixed review; records observed joins.
    ///
    /// Clones share the join log, so tests can keep a handle after
    /// registering the policy.
    #[derive(Clone)]
    pub struct FixedPolicy {
        review: PolicyReview,
        joined: Arc<Mutex<Vec<(u64, QueueTypeId)>>>,
    }

    impl FixedPolicy {
        pub fn new(review: PolicyReview) -> Self {
            Self {
                review,
                joined: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn clear() -> Self {
            Self::new(PolicyReview::clear())
        }

        pub fn deny(code: RejectReason) -> Self {
            Self::new(PolicyReview::deny(code))
        }

        /// Objection without a failing code (treated as benign)
        pub fn objection_only() -> Self {
            Self::new(PolicyReview {
                objection: true,
                code: None,
            })
        }

        /// Failing code without an objection (deferred rejection)
        pub fn code_only(code: RejectReason) -> Self {
            Self::new(PolicyReview {
                objection: false,
                code: Some(code),
            })
        }

        /// Joins the observer hook has seen, in order
        pub fn joined(&self) -> Vec<(u64, QueueTypeId)> {
            self.joined.lock().unwrap().clone()
        }
    }

    impl JoinPolicy for FixedPolicy {
        fn review(&self, _actor: &Actor, _request: &JoinRequest) -> PolicyReview {
            self.review
        }

        fn on_joined(&self, actor: &Actor, queue_type: QueueTypeId) {
            self.joined.lock().unwrap().push((actor.id, queue_type));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::FixedPolicy;
    use super::*;
    use crate::domain::RoleTag;

    fn actor() -> Actor {
        Actor::new(1, "Asha", 25, RoleTag::new("MAGE"), 30)
    }

    #[test]
    fn empty_set_reviews_clear() {
        let set = PolicySet::new();
        let review = set.review_all(&actor(), &JoinRequest::solo(30));
        assert_eq!(review, PolicyReview::clear());
    }

    #[test]
    fn later_code_wins_and_objections_accumulate() {
        let mut set = PolicySet::new();
        set.register("first", Box::new(FixedPolicy::code_only(RejectReason::Restricted)));
        set.register(
            "second",
            Box::new(FixedPolicy::deny(RejectReason::PolicyVetoed)),
        );

        let review = set.review_all(&actor(), &JoinRequest::solo(30));
        assert!(review.objection);
        assert_eq!(review.code, Some(RejectReason::PolicyVetoed));
    }

    #[test]
    fn objection_does_not_erase_earlier_code() {
        let mut set = PolicySet::new();
        set.register("first", Box::new(FixedPolicy::code_only(RejectReason::Restricted)));
        set.register("second", Box::new(FixedPolicy::objection_only()));

        let review = set.review_all(&actor(), &JoinRequest::solo(30));
        assert!(review.objection);
        assert_eq!(review.code, Some(RejectReason::Restricted));
    }
}
