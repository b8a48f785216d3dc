//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded in the binary.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Project, Slugged, Writing};
use crate::helpers::{project_path, writing_path};

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("project.html", include_str!("site/project.html")),
            ("writings.html", include_str!("site/writings.html")),
            ("writing.html", include_str!("site/writing.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/project_list.html",
                include_str!("site/partials/project_list.html"),
            ),
            (
                "partials/writing_list.html",
                include_str!("site/partials/writing_list.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
}

impl From<&SiteConfig> for ConfigData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectData {
    pub id: i64,
    pub title: String,
    pub desc: String,
    pub path: String,
    pub github: String,
    pub livelink: Option<String>,
    pub download: Option<String>,
    pub filetype: Option<String>,
}

impl From<&Project> for ProjectData {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            desc: p.desc.clone(),
            path: project_path(&p.slug()),
            github: p.github.clone(),
            livelink: p.livelink.clone(),
            download: p.download.clone(),
            filetype: p.filetype.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WritingData {
    pub id: i64,
    pub title: String,
    pub desc: String,
    pub path: String,
    /// Raw ISO date, for the `datetime` attribute
    pub date: String,
    pub display_date: String,
}

impl From<&Writing> for WritingData {
    fn from(w: &Writing) -> Self {
        Self {
            id: w.id,
            title: w.title.clone(),
            desc: w.desc.clone(),
            path: writing_path(&w.slug()),
            date: w.date.clone(),
            display_date: w.display_date(),
        }
    }
}
