// Activity reference types - what an actor can queue for

use serde::{Deserialize, Serialize};

/// Content-assigned identifier of an activity kind
pub type ActivityId = u32;

/// Identifier of the map an activity runs on
pub type MapId = u32;

/// Team size of a rated variant; zero for everything unrated
pub type TeamSize = u8;

/// Classification of an activity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityClass {
    /// Plain instanced activity
    Standard,
    /// The meta-queue whose membership excludes every other queue
    Random,
    /// Pre-formed competitive format; joins through its own path
    Rated,
}

/// Immutable description of one activity kind, loaded from content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTemplate {
    pub id: ActivityId,
    pub name: String,
    pub map_id: MapId,
    pub capacity_per_side: u32,
    pub class: ActivityClass,
}

impl ActivityTemplate {
    pub fn is_random(&self) -> bool {
        self.class == ActivityClass::Random
    }

    pub fn is_rated(&self) -> bool {
        self.class == ActivityClass::Rated
    }
}

/// Identity of one queue: an activity kind plus its team-size variant.
///
/// Actors reference these from their slot tables; the registry keys its
/// entries by them. Two ids are the same queue iff both fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueTypeId {
    pub activity: ActivityId,
    pub team_size: TeamSize,
}

impl QueueTypeId {
    pub fn new(activity: ActivityId, team_size: TeamSize) -> Self {
        Self {
            activity,
            team_size,
        }
    }

    /// Queue id of the unrated variant of an activity
    pub fn unrated(activity: ActivityId) -> Self {
        Self {
            activity,
            team_size: 0,
        }
    }

    /// Rated variants are the only ones carrying a team size
    pub fn is_rated(&self) -> bool {
        self.team_size > 0
    }
}

impl std::fmt::Display for QueueTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.team_size > 0 {
            write!(f, "{}v{}", self.activity, self.team_size)
        } else {
            write!(f, "{}", self.activity)
        }
    }
}
