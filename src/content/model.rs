//! Project and Writing models

use serde::{Deserialize, Serialize};

use super::slug::slugify;
use crate::helpers::full_date_str;

/// Content items carrying a unique numeric id
pub trait Identified {
    fn id(&self) -> i64;
}

/// Content items addressable by a URL slug
pub trait Slugged {
    fn slug(&self) -> String;
}

/// Sort items by id, highest first
pub fn sort_by_id_desc<T: Identified>(items: &mut [T]) {
    items.sort_by(|a, b| b.id().cmp(&a.id()));
}

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,

    pub title: String,

    pub desc: String,

    /// Repository URL
    pub github: String,

    /// Deployed site URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livelink: Option<String>,

    /// Downloadable artifact URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,

    /// Human-readable kind of the download ("APK", "PDF", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,

    /// Explicit slug, overriding the one derived from the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Identified for Project {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Slugged for Project {
    fn slug(&self) -> String {
        match self.slug.as_deref() {
            Some(slug) if !slug.trim().is_empty() => slug.to_string(),
            _ => slugify(&self.title),
        }
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Writing {
    pub id: i64,

    pub title: String,

    pub desc: String,

    /// ISO date string
    pub date: String,
}

impl Writing {
    /// Publication date as "January 5, 2024", or the raw string if it
    /// does not parse
    pub fn display_date(&self) -> String {
        full_date_str(&self.date).unwrap_or_else(|| self.date.clone())
    }
}

impl Identified for Writing {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Slugged for Writing {
    fn slug(&self) -> String {
        slugify(&self.title)
    }
}
