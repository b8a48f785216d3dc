//! Slug derivation and lookup
//!
//! Projects and writings share one derivation: trim, lowercase, turn each
//! whitespace run into a hyphen, then drop anything outside `[a-z0-9-]`.
//! The mapping is lossy, so two titles can collide; the first item wins.

use lazy_static::lazy_static;
use regex::Regex;

use super::model::Slugged;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref INVALID: Regex = Regex::new(r"[^a-z0-9-]").unwrap();
}

/// Derive a URL slug from a title
///
/// # Examples
/// ```ignore
/// slugify("My First Post") // -> "my-first-post"
/// slugify("C++ Tips!")     // -> "c-tips"
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lower, "-");
    INVALID.replace_all(&hyphenated, "").into_owned()
}

/// Find the first item whose slug equals `slug`, ignoring case
pub fn find_by_slug<'a, T: Slugged>(items: &'a [T], slug: &str) -> Option<&'a T> {
    let wanted = slug.to_lowercase();
    items.iter().find(|item| item.slug().to_lowercase() == wanted)
}
