// Join requests - what a session hands the gate

use serde::{Deserialize, Serialize};

use super::activity::{ActivityId, QueueTypeId, TeamSize};
use super::actor::PartyId;

/// One request to enter a queue. `team_size` stays zero on the open
/// path; rated variants arrive only through the session layer's own
/// rated flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub activity: ActivityId,
    #[serde(default)]
    pub team_size: TeamSize,
    /// Pre-formed party, when joining as one
    #[serde(default)]
    pub party: Option<PartyId>,
}

impl JoinRequest {
    pub fn solo(activity: ActivityId) -> Self {
        Self {
            activity,
            team_size: 0,
            party: None,
        }
    }

    pub fn with_party(activity: ActivityId, party: PartyId) -> Self {
        Self {
            activity,
            team_size: 0,
            party: Some(party),
        }
    }

    pub fn queue_type(&self) -> QueueTypeId {
        QueueTypeId::new(self.activity, self.team_size)
    }
}
