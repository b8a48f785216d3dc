//! Content store - flat JSON files read on every request

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::model::{sort_by_id_desc, Project, Writing};
use crate::Portfolio;

/// Errors raised while reading the content files
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// `writings.json` wraps its list in a `posts` key
///
/// An absent or `null` key reads as no writings.
#[derive(Debug, Default, Deserialize)]
struct WritingsFile {
    #[serde(default)]
    posts: Option<Vec<Writing>>,
}

/// Which collection a detail body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Project,
    Writing,
}

impl ContentKind {
    fn dir_name(self) -> &'static str {
        match self {
            ContentKind::Project => "projects",
            ContentKind::Writing => "writings",
        }
    }
}

/// Read-only access to the content files
#[derive(Debug, Clone)]
pub struct ContentStore {
    projects_file: PathBuf,
    writings_file: PathBuf,
    content_dir: PathBuf,
}

impl ContentStore {
    /// Create a store from explicit paths
    pub fn new(projects_file: PathBuf, writings_file: PathBuf, content_dir: PathBuf) -> Self {
        Self {
            projects_file,
            writings_file,
            content_dir,
        }
    }

    /// Create a store from the site configuration
    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        let content = &portfolio.config.content;
        Self::new(
            resolve(&portfolio.base_dir, &content.projects_file),
            resolve(&portfolio.base_dir, &content.writings_file),
            resolve(&portfolio.base_dir, &content.content_dir),
        )
    }

    pub fn projects_file(&self) -> &Path {
        &self.projects_file
    }

    pub fn writings_file(&self) -> &Path {
        &self.writings_file
    }

    /// Load all projects, highest id first
    pub async fn load_projects(&self) -> Result<Vec<Project>, ContentError> {
        let data = read(&self.projects_file).await?;
        let mut projects: Vec<Project> =
            serde_json::from_str(&data).map_err(|source| ContentError::Parse {
                path: self.projects_file.clone(),
                source,
            })?;
        sort_by_id_desc(&mut projects);
        tracing::debug!("Loaded {} projects", projects.len());
        Ok(projects)
    }

    /// Load all writings, highest id first
    ///
    /// A file without a `posts` key yields an empty list.
    pub async fn load_writings(&self) -> Result<Vec<Writing>, ContentError> {
        let data = read(&self.writings_file).await?;
        let file: WritingsFile =
            serde_json::from_str(&data).map_err(|source| ContentError::Parse {
                path: self.writings_file.clone(),
                source,
            })?;
        let mut writings = file.posts.unwrap_or_default();
        sort_by_id_desc(&mut writings);
        tracing::debug!("Loaded {} writings", writings.len());
        Ok(writings)
    }

    /// Load the Markdown body for a detail page, if one exists
    ///
    /// Looks for `<content_dir>/<kind>/<slug>.mdx`, then `.md`.
    pub async fn load_body(&self, kind: ContentKind, slug: &str) -> Option<String> {
        let slug = slug.to_lowercase();
        if slug.is_empty() || slug.contains(['/', '\\', '.']) {
            return None;
        }

        let dir = self.content_dir.join(kind.dir_name());
        for ext in ["mdx", "md"] {
            let path = dir.join(format!("{}.{}", slug, ext));
            match tokio::fs::read_to_string(&path).await {
                Ok(body) => return Some(body),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    tracing::warn!("Failed to read {:?}: {}", path, e);
                    return None;
                }
            }
        }
        None
    }
}

/// Resolve a configured path against the base directory
fn resolve(base_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

async fn read(path: &Path) -> Result<String, ContentError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ContentStore {
        ContentStore::new(
            dir.path().join("projects.json"),
            dir.path().join("writings.json"),
            dir.path().join("content"),
        )
    }

    #[tokio::test]
    async fn test_projects_sorted_desc() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("projects.json"),
            r#"[
                {"id": 1, "title": "One", "desc": "", "github": "g1"},
                {"id": 3, "title": "Three", "desc": "", "github": "g3"},
                {"id": 2, "title": "Two", "desc": "", "github": "g2"}
            ]"#,
        )
        .unwrap();

        let projects = store_in(&dir).load_projects().await.unwrap();
        let ids: Vec<i64> = projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_writings_unwrap_posts() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("writings.json"),
            r#"{"posts": [
                {"id": 4, "title": "Older", "desc": "", "date": "2023-01-01"},
                {"id": 10, "title": "Newer", "desc": "", "date": "2024-01-01"}
            ]}"#,
        )
        .unwrap();

        let writings = store_in(&dir).load_writings().await.unwrap();
        assert_eq!(writings.len(), 2);
        assert_eq!(writings[0].id, 10);
    }

    #[tokio::test]
    async fn test_writings_without_posts_key() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("writings.json"), r#"{"drafts": []}"#).unwrap();

        let writings = store_in(&dir).load_writings().await.unwrap();
        assert!(writings.is_empty());
    }

    #[tokio::test]
    async fn test_writings_with_null_posts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("writings.json"), r#"{"posts": null}"#).unwrap();

        let writings = store_in(&dir).load_writings().await.unwrap();
        assert!(writings.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = store_in(&dir).load_projects().await.unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("projects.json"), "{ not json").unwrap();
        let err = store_in(&dir).load_projects().await.unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_load_body_prefers_mdx() {
        let dir = TempDir::new().unwrap();
        let writings = dir.path().join("content/writings");
        fs::create_dir_all(&writings).unwrap();
        fs::write(writings.join("hello.md"), "plain").unwrap();
        fs::write(writings.join("hello.mdx"), "mdx").unwrap();

        let store = store_in(&dir);
        assert_eq!(
            store.load_body(ContentKind::Writing, "Hello").await.as_deref(),
            Some("mdx")
        );
        assert_eq!(store.load_body(ContentKind::Project, "hello").await, None);
        assert_eq!(store.load_body(ContentKind::Writing, "../hello").await, None);
    }

    #[test]
    fn test_resolve() {
        let base = Path::new("/site");
        assert_eq!(resolve(base, "public/p.json"), PathBuf::from("/site/public/p.json"));
        assert_eq!(resolve(base, "/abs/p.json"), PathBuf::from("/abs/p.json"));
    }
}
