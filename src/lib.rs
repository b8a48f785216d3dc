//! portfolio-rs: a personal portfolio and blog server
//!
//! Projects and writings live in flat JSON files, are served through a small
//! JSON API, and are rendered into pages by fetching that API back. A contact
//! form forwards messages to the site owner over SMTP.

pub mod api;
pub mod cache;
pub mod client;
pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod helpers;
pub mod mail;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A portfolio site rooted at a directory
#[derive(Debug, Clone)]
pub struct Portfolio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Static assets directory
    pub public_dir: PathBuf,
}

impl Portfolio {
    /// Open a site directory, reading `_config.yml` and environment overrides
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Use an already-built configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join("public");
        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Content store for this site
    pub fn store(&self) -> content::ContentStore {
        content::ContentStore::from_portfolio(self)
    }
}
