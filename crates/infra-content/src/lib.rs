// Muster Infrastructure - Content Directory Adapter
// Loads activity templates, bracket ladders, and role locks from JSON;
// ships built-in defaults for when no content file is configured.

mod content_file;
mod defaults;

pub use content_file::{load_content, ContentFile};
pub use defaults::{default_content, default_content_file, RANDOM_SKIRMISH};
