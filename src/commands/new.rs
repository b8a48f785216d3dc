//! Add a new project or writing to the content files

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::slugify;
use crate::Portfolio;

/// Which content file a new entry goes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewKind {
    Project,
    Writing,
}

impl std::str::FromStr for NewKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "project" | "projects" => Ok(NewKind::Project),
            "writing" | "writings" | "post" => Ok(NewKind::Writing),
            other => anyhow::bail!("Unknown layout: {}. Available: writing, project", other),
        }
    }
}

/// Fields of a new entry
#[derive(Debug, Clone, Default)]
pub struct NewEntry<'a> {
    pub title: &'a str,
    pub desc: &'a str,
    pub github: Option<&'a str>,
}

/// Append an entry to the content file and scaffold its body
///
/// Returns the path of the created body file.
pub fn create(portfolio: &Portfolio, kind: NewKind, entry: &NewEntry) -> Result<PathBuf> {
    let slug = slugify(entry.title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} has no usable slug", entry.title);
    }

    let store = portfolio.store();
    let (file, dir_name) = match kind {
        NewKind::Project => (store.projects_file().to_path_buf(), "projects"),
        NewKind::Writing => (store.writings_file().to_path_buf(), "writings"),
    };

    let mut doc = read_or_default(&file, kind)?;
    let items = items_mut(&mut doc, kind)
        .with_context(|| format!("Unexpected layout in {:?}", file))?;

    if items.iter().any(|item| item_slug(item).as_deref() == Some(slug.as_str())) {
        anyhow::bail!("An entry with slug {:?} already exists", slug);
    }

    let id = items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        + 1;

    let item = match kind {
        NewKind::Project => json!({
            "id": id,
            "title": entry.title,
            "desc": entry.desc,
            "github": entry.github.unwrap_or_default(),
        }),
        NewKind::Writing => json!({
            "id": id,
            "title": entry.title,
            "desc": entry.desc,
            "date": chrono::Local::now().format("%Y-%m-%d").to_string(),
        }),
    };
    items.push(item);

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file, serde_json::to_string_pretty(&doc)? + "\n")?;
    tracing::info!("Added #{} to {:?}", id, file);

    let body_dir = portfolio
        .base_dir
        .join(&portfolio.config.content.content_dir)
        .join(dir_name);
    fs::create_dir_all(&body_dir)?;
    let body_path = body_dir.join(format!("{}.mdx", slug));
    if !body_path.exists() {
        fs::write(&body_path, format!("{}\n", entry.desc))?;
    }

    println!("Created: {:?}", body_path);
    Ok(body_path)
}

fn read_or_default(file: &Path, kind: NewKind) -> Result<Value> {
    if !file.exists() {
        return Ok(match kind {
            NewKind::Project => json!([]),
            NewKind::Writing => json!({ "posts": [] }),
        });
    }
    let data = fs::read_to_string(file)?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse {:?}", file))
}

fn items_mut(doc: &mut Value, kind: NewKind) -> Option<&mut Vec<Value>> {
    match kind {
        NewKind::Project => doc.as_array_mut(),
        NewKind::Writing => {
            let posts = doc.as_object_mut()?.entry("posts").or_insert(Value::Null);
            if posts.is_null() {
                *posts = Value::Array(Vec::new());
            }
            posts.as_array_mut()
        }
    }
}

/// Slug an existing entry is routed under; a blank explicit slug falls
/// back to the title
fn item_slug(item: &Value) -> Option<String> {
    let explicit = item
        .get("slug")
        .and_then(Value::as_str)
        .filter(|slug| !slug.trim().is_empty());
    if let Some(slug) = explicit {
        return Some(slug.to_lowercase());
    }
    item.get("title").and_then(Value::as_str).map(slugify)
}
