// Content Directory Port - activity templates, brackets, role locks
//
// Read-only reference data. Adapters load it (muster-infra-content);
// the core only looks things up.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{ActivityId, ActivityTemplate, Bracket, BracketTable, MapId, RoleTag, UnlockId};

/// One role lock: `role` cannot join from `map_id` unless the actor is
/// privileged or carries `exempt_unlock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleLock {
    pub role: RoleTag,
    pub map_id: MapId,
    #[serde(default)]
    pub exempt_unlock: Option<UnlockId>,
}

/// Read-only lookups over activity reference data
pub trait ContentDirectory: Send + Sync {
    /// Template for an activity kind, if registered
    fn template(&self, id: ActivityId) -> Option<ActivityTemplate>;

    /// Bracket covering `level` on `map_id`
    fn bracket_for(&self, map_id: MapId, level: u32) -> Option<Bracket>;

    /// Administratively switched off?
    fn is_disabled(&self, id: ActivityId) -> bool;

    /// The activity kind whose queue excludes every other queue
    fn random_activity(&self) -> ActivityId;

    /// Role locks currently in effect
    fn role_locks(&self) -> &[RoleLock];
}

/// In-memory content directory (production data is loaded into one of
/// these by the infra-content adapter; tests build them directly)
pub struct StaticContent {
    templates: HashMap<ActivityId, ActivityTemplate>,
    brackets: BracketTable,
    disabled: HashSet<ActivityId>,
    random_activity: ActivityId,
    role_locks: Vec<RoleLock>,
}

impl StaticContent {
    pub fn new(
        templates: Vec<ActivityTemplate>,
        brackets: BracketTable,
        random_activity: ActivityId,
    ) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.id, t)).collect(),
            brackets,
            disabled: HashSet::new(),
            random_activity,
            role_locks: Vec::new(),
        }
    }

    pub fn with_disabled(mut self, ids: impl IntoIterator<Item = ActivityId>) -> Self {
        self.disabled.extend(ids);
        self
    }

    pub fn with_role_locks(mut self, locks: Vec<RoleLock>) -> Self {
        self.role_locks = locks;
        self
    }

    /// Flip an activity off at runtime (admin surface)
    pub fn disable(&mut self, id: ActivityId) {
        self.disabled.insert(id);
    }

    pub fn enable(&mut self, id: ActivityId) {
        self.disabled.remove(&id);
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}

impl ContentDirectory for StaticContent {
    fn template(&self, id: ActivityId) -> Option<ActivityTemplate> {
        self.templates.get(&id).cloned()
    }

    fn bracket_for(&self, map_id: MapId, level: u32) -> Option<Bracket> {
        self.brackets.resolve(map_id, level)
    }

    fn is_disabled(&self, id: ActivityId) -> bool {
        self.disabled.contains(&id)
    }

    fn random_activity(&self) -> ActivityId {
        self.random_activity
    }

    fn role_locks(&self) -> &[RoleLock] {
        &self.role_locks
    }
}
