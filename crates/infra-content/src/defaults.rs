// Built-in Content Defaults
//
// A serviceable starter set used when MUSTER_CONTENT_PATH is unset.
// Operators ship their own content file in production.

use muster_core::domain::{ActivityClass, ActivityTemplate, Bracket, BracketTable, MapId};
use muster_core::port::StaticContent;

use crate::content_file::ContentFile;

/// Activity id of the built-in random meta-queue
pub const RANDOM_SKIRMISH: u32 = 32;

/// The default tables as a content file (handy for `--dump-content`
/// style tooling and for tests)
pub fn default_content_file() -> ContentFile {
    let activities = vec![
        ActivityTemplate {
            id: 30,
            name: "Valley".into(),
            map_id: 30,
            capacity_per_side: 40,
            class: ActivityClass::Standard,
        },
        ActivityTemplate {
            id: 489,
            name: "Gulch".into(),
            map_id: 489,
            capacity_per_side: 10,
            class: ActivityClass::Standard,
        },
        ActivityTemplate {
            id: 529,
            name: "Basin".into(),
            map_id: 529,
            capacity_per_side: 15,
            class: ActivityClass::Standard,
        },
        ActivityTemplate {
            id: RANDOM_SKIRMISH,
            name: "Random Skirmish".into(),
            map_id: 0,
            capacity_per_side: 10,
            class: ActivityClass::Random,
        },
        ActivityTemplate {
            id: 6,
            name: "Ring of Trials".into(),
            map_id: 572,
            capacity_per_side: 5,
            class: ActivityClass::Rated,
        },
    ];

    let mut brackets = Vec::new();
    for map_id in [30u32, 489, 529, 0] {
        brackets.extend(ladder(map_id));
    }

    ContentFile {
        random_activity: RANDOM_SKIRMISH,
        activities,
        brackets,
        disabled: vec![],
        role_locks: vec![],
    }
}

/// Standard ladder: ten-level steps from 10, then a top bracket at 80
fn ladder(map_id: MapId) -> Vec<Bracket> {
    let mut out = Vec::new();
    for (id, floor) in (10..80).step_by(10).enumerate() {
        out.push(Bracket {
            id: id as u8,
            map_id,
            min_level: floor,
            max_level: floor + 9,
        });
    }
    out.push(Bracket {
        id: 7,
        map_id,
        min_level: 80,
        max_level: 80,
    });
    out
}

/// Built-in content directory
pub fn default_content() -> StaticContent {
    let file = default_content_file();
    StaticContent::new(
        file.activities,
        BracketTable::new(file.brackets),
        file.random_activity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use muster_core::port::ContentDirectory;

    #[test]
    fn defaults_cover_the_level_range() {
        let content = default_content();
        for level in [10, 19, 20, 45, 79, 80] {
            assert!(
                content.bracket_for(30, level).is_some(),
                "level {} uncovered",
                level
            );
        }
        assert!(content.bracket_for(30, 9).is_none());
    }

    #[test]
    fn random_activity_is_registered_and_random() {
        let content = default_content();
        let template = content.template(content.random_activity()).unwrap();
        assert_eq!(template.class, ActivityClass::Random);
    }

    #[test]
    fn brackets_do_not_overlap_within_a_map() {
        let file = default_content_file();
        let on_map: Vec<_> = file.brackets.iter().filter(|b| b.map_id == 30).collect();
        for a in &on_map {
            for b in &on_map {
                if a.id != b.id {
                    assert!(
                        a.max_level < b.min_level || b.max_level < a.min_level,
                        "brackets {} and {} overlap",
                        a.id,
                        b.id
                    );
                }
            }
        }
    }
}
