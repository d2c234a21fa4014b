// Level brackets - who waits alongside whom

use serde::{Deserialize, Serialize};

use super::activity::MapId;

/// Bracket identifier within a map's ladder
pub type BracketId = u8;

/// One level range on one map. Resolved exactly once per join attempt
/// and recorded on the issued ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    pub map_id: MapId,
    pub min_level: u32,
    pub max_level: u32,
}

impl Bracket {
    pub fn covers(&self, level: u32) -> bool {
        level >= self.min_level && level <= self.max_level
    }
}

/// Static lookup table over all bracket ladders.
///
/// A failed lookup is a content fault (a level the tables forgot), not
/// a user-facing rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    pub fn new(mut brackets: Vec<Bracket>) -> Self {
        brackets.sort_by_key(|b| (b.map_id, b.min_level));
        Self { brackets }
    }

    /// Bracket covering `level` on `map_id`, if any
    pub fn resolve(&self, map_id: MapId, level: u32) -> Option<Bracket> {
        self.brackets
            .iter()
            .find(|b| b.map_id == map_id && b.covers(level))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}
