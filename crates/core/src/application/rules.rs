// Eligibility Evaluation - the ordered admission rule chain
//
// Pure with respect to shared state: reads the actor, the content
// tables, and the registry; writes nothing. Exactly one reason is
// reported per refusal, and an earlier rule always beats a later one.

use tracing::debug;

use crate::domain::{
    Actor, ActivityTemplate, Bracket, DomainError, JoinRequest, LfgState, QueueTypeId, RejectReason,
};
use crate::port::{ContentDirectory, PolicySet, RoleLock};
use super::config::GateConfig;
use super::registry::QueueRegistry;

/// Everything issuance needs once a request has passed
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    pub queue_type: QueueTypeId,
    pub template: ActivityTemplate,
    pub bracket: Bracket,
}

/// Outcome of one evaluation. Configuration faults (unknown activity,
/// missing bracket, rated variant on this path) travel as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Admit(Admission),
    Reject(RejectReason),
}

struct RuleCtx<'a> {
    actor: &'a Actor,
    queue_type: QueueTypeId,
    random_queue: QueueTypeId,
    config: &'a GateConfig,
    locks: &'a [RoleLock],
    registry: &'a QueueRegistry,
}

type Rule = fn(&RuleCtx<'_>) -> Option<RejectReason>;

/// The fixed tail of the chain, evaluated left to right
const RULE_CHAIN: &[(&str, Rule)] = &[
    ("already_active", already_active),
    ("lfg_conflict", lfg_conflict),
    ("restricted", restricted),
    ("already_in_random", already_in_random),
    ("already_in_non_random", already_in_non_random),
    ("queued_for_rated", queued_for_rated),
    ("role_restricted", role_restricted),
];

/// Evaluate one join request against the full rule sequence.
///
/// The policy slot sits between the capacity check and the rule chain.
/// Its legacy contract: an objection paired with a failing code rejects
/// on the spot; a failing code left behind by a non-objecting policy
/// still rejects after the chain if no rule fired first.
pub fn evaluate(
    config: &GateConfig,
    content: &dyn ContentDirectory,
    policies: &PolicySet,
    registry: &QueueRegistry,
    actor: &Actor,
    request: &JoinRequest,
) -> Result<Evaluation, DomainError> {
    if actor.level < config.min_level {
        return Ok(Evaluation::Reject(RejectReason::LevelTooLow));
    }
    if actor.level > config.max_level {
        return Ok(Evaluation::Reject(RejectReason::LevelTooHigh));
    }

    let template = content
        .template(request.activity)
        .ok_or(DomainError::UnknownActivity(request.activity))?;

    // Rated variants join through the session layer's own flow
    if request.team_size > 0 || template.is_rated() {
        return Err(DomainError::RatedJoinPath);
    }

    if content.is_disabled(template.id) {
        return Ok(Evaluation::Reject(RejectReason::ActivityDisabled));
    }

    if !actor.has_free_slot() {
        return Ok(Evaluation::Reject(RejectReason::TooManyQueues));
    }

    let review = policies.review_all(actor, request);
    let mut pending = review.code;
    if review.objection {
        if let Some(reason) = pending {
            debug!(actor = actor.id, reason = %reason, "join vetoed by policy");
            return Ok(Evaluation::Reject(reason));
        }
        // Objection without a failing code is benign
    }

    let bracket = content
        .bracket_for(template.map_id, actor.level)
        .ok_or(DomainError::BracketNotFound {
            map_id: template.map_id,
            level: actor.level,
        })?;

    let ctx = RuleCtx {
        actor,
        queue_type: QueueTypeId::unrated(template.id),
        random_queue: QueueTypeId::unrated(content.random_activity()),
        config,
        locks: content.role_locks(),
        registry,
    };

    for (name, rule) in RULE_CHAIN {
        if let Some(reason) = rule(&ctx) {
            debug!(actor = actor.id, rule = name, reason = %reason, "join rule failed");
            pending = Some(reason);
            break;
        }
    }

    match pending {
        Some(reason) => Ok(Evaluation::Reject(reason)),
        None => Ok(Evaluation::Admit(Admission {
            queue_type: ctx.queue_type,
            template,
            bracket,
        })),
    }
}

fn already_active(ctx: &RuleCtx<'_>) -> Option<RejectReason> {
    ctx.actor.in_instance().then_some(RejectReason::AlreadyActive)
}

fn lfg_conflict(ctx: &RuleCtx<'_>) -> Option<RejectReason> {
    let state = ctx.actor.lfg_state;
    let mixing_allowed = state == LfgState::Queued && ctx.config.allow_lfg_mixing;
    (state.in_use() && !mixing_allowed).then_some(RejectReason::LfgConflict)
}

fn restricted(ctx: &RuleCtx<'_>) -> Option<RejectReason> {
    ctx.actor.restricted.then_some(RejectReason::Restricted)
}

fn already_in_random(ctx: &RuleCtx<'_>) -> Option<RejectReason> {
    ctx.actor
        .holds(ctx.random_queue)
        .then_some(RejectReason::AlreadyInRandom)
}

fn already_in_non_random(ctx: &RuleCtx<'_>) -> Option<RejectReason> {
    // Random is all-or-nothing: holding anything blocks joining it
    if ctx.queue_type == ctx.random_queue && ctx.actor.holds_any() {
        return Some(RejectReason::AlreadyInNonRandom);
    }
    // One ticket per queue type
    if ctx.registry.ticket_for(ctx.actor.id, ctx.queue_type).is_some() {
        return Some(RejectReason::AlreadyInNonRandom);
    }
    None
}

fn queued_for_rated(ctx: &RuleCtx<'_>) -> Option<RejectReason> {
    ctx.actor.holds_rated().then_some(RejectReason::QueuedForRated)
}

fn role_restricted(ctx: &RuleCtx<'_>) -> Option<RejectReason> {
    if ctx.actor.privileged {
        return None;
    }
    ctx.locks
        .iter()
        .any(|lock| {
            lock.role == ctx.actor.role
                && lock.map_id == ctx.actor.map_id
                && !lock
                    .exempt_unlock
                    .map_or(false, |unlock| ctx.actor.unlocks.contains(&unlock))
        })
        .then_some(RejectReason::RoleRestricted)
}
