// Content File Loading
//
// One JSON document describes everything the gate looks up: activity
// templates, bracket ladders, the disabled list, role locks, and which
// activity is the random meta-queue.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use muster_core::domain::{ActivityClass, ActivityId, ActivityTemplate, Bracket, BracketTable};
use muster_core::port::{RoleLock, StaticContent};
use muster_core::{AppError, Result};

/// On-disk shape of a content file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentFile {
    pub random_activity: ActivityId,
    pub activities: Vec<ActivityTemplate>,
    pub brackets: Vec<Bracket>,
    #[serde(default)]
    pub disabled: Vec<ActivityId>,
    #[serde(default)]
    pub role_locks: Vec<RoleLock>,
}

impl ContentFile {
    /// Validate and convert into the directory the core consumes
    pub fn into_directory(self) -> Result<StaticContent> {
        let random = self
            .activities
            .iter()
            .find(|t| t.id == self.random_activity)
            .ok_or_else(|| {
                AppError::Content(format!(
                    "random activity {} is not in the activity list",
                    self.random_activity
                ))
            })?;
        if random.class != ActivityClass::Random {
            return Err(AppError::Content(format!(
                "activity {} is declared random but classified {:?}",
                self.random_activity, random.class
            )));
        }
        if self.brackets.is_empty() {
            warn!("content file declares no brackets; every join will fault");
        }

        for id in &self.disabled {
            if !self.activities.iter().any(|t| t.id == *id) {
                warn!(activity = id, "disabled list names an unknown activity");
            }
        }

        let directory = StaticContent::new(
            self.activities,
            BracketTable::new(self.brackets),
            self.random_activity,
        )
        .with_disabled(self.disabled)
        .with_role_locks(self.role_locks);
        Ok(directory)
    }
}

/// Load and validate a content file
pub fn load_content(path: &Path) -> Result<StaticContent> {
    let raw = std::fs::read_to_string(path)?;
    let file: ContentFile = serde_json::from_str(&raw)?;
    info!(
        path = %path.display(),
        activities = file.activities.len(),
        brackets = file.brackets.len(),
        "content loaded"
    );
    file.into_directory()
}
