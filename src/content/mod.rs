//! Content module - projects, writings, slugs and body rendering

mod markdown;
mod model;
pub mod slug;
pub mod store;

pub use markdown::MarkdownRenderer;
pub use model::{sort_by_id_desc, Identified, Project, Slugged, Writing};
pub use slug::{find_by_slug, slugify};
pub use store::{ContentError, ContentKind, ContentStore};
