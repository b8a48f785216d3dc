//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    /// Base URL the page renderers use to reach the content API.
    /// Empty means "the address this server is bound to".
    pub base_url: String,

    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),
            base_url: String::new(),
            server: ServerConfig::default(),
            content: ContentConfig::default(),
            smtp: SmtpConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = lookup("BASE_URL") {
            self.base_url = url;
        }
        if let Some(path) = lookup("PROJECTS_FILE") {
            self.content.projects_file = path;
        }
        if let Some(host) = lookup("SMTP_HOST") {
            self.smtp.host = host;
        }
        if let Some(port) = lookup("SMTP_PORT") {
            match port.parse() {
                Ok(port) => self.smtp.port = port,
                Err(_) => tracing::warn!("Ignoring invalid SMTP_PORT: {}", port),
            }
        }
        if let Some(user) = lookup("SMTP_USER") {
            self.smtp.user = user;
        }
        if let Some(pass) = lookup("SMTP_PASS") {
            self.smtp.pass = pass;
        }
    }
}

/// Listen address configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// Content store and fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Projects JSON file, relative to the base directory unless absolute
    pub projects_file: String,
    /// Writings JSON file (`{ "posts": [...] }`)
    pub writings_file: String,
    /// Directory holding `projects/<slug>.mdx` and `writings/<slug>.mdx` bodies
    pub content_dir: String,
    /// Revalidation window for fetched listings, in seconds
    pub revalidate_secs: u64,
    pub recent_projects: usize,
    pub recent_writings: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            projects_file: "public/projects.json".to_string(),
            writings_file: "public/writings.json".to_string(),
            content_dir: "content".to_string(),
            revalidate_secs: 3600,
            recent_projects: 5,
            recent_writings: 3,
        }
    }
}

/// Mail transport configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            user: String::new(),
            pass: String::new(),
        }
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &"***")
            .finish()
    }
}
