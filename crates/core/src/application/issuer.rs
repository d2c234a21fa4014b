// Ticket Issuance - the only writer of queue membership
//
// Runs under the gate lock, immediately after a positive evaluation of
// the same request. Slot claim and registry insertion are one unit: if
// the slot claim fails, the registry is untouched.

use tracing::debug;

use crate::domain::{Actor, Bracket, DomainError, QueueTicket, QueueTypeId, TicketId};
use super::registry::QueueRegistry;

/// Issue a ticket for `queue_type` to `actor`, binding it to the
/// resolved `bracket`.
pub fn issue(
    actor: &mut Actor,
    registry: &mut QueueRegistry,
    queue_type: QueueTypeId,
    bracket: &Bracket,
    ticket_id: TicketId,
    now_millis: i64,
) -> Result<QueueTicket, DomainError> {
    // Slot first: it is the only step that can fail
    let slot = actor
        .occupy_slot(queue_type)
        .ok_or(DomainError::SlotTableFull(actor.id))?;

    let ticket = QueueTicket::new(ticket_id, actor.id, queue_type, bracket.id, now_millis, slot);
    registry.insert_ticket(ticket.clone());

    debug!(
        actor = actor.id,
        queue = %queue_type,
        bracket = bracket.id,
        slot = slot,
        "ticket issued"
    );
    Ok(ticket)
}
