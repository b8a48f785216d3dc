//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join("_config.yml").exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("public/css"))?;
    fs::create_dir_all(target_dir.join("content/projects"))?;
    fs::create_dir_all(target_dir.join("content/writings"))?;

    let config_content = r#"# Portfolio configuration

# Site
title: My Portfolio
description: ''
author: John Doe
language: en

# Where the pages reach the content API; empty means this server
base_url: ''

server:
  ip: localhost
  port: 3000

content:
  projects_file: public/projects.json
  writings_file: public/writings.json
  content_dir: content
  revalidate_secs: 3600
  recent_projects: 5
  recent_writings: 3

# Credentials are usually supplied through SMTP_HOST, SMTP_PORT,
# SMTP_USER and SMTP_PASS instead
smtp:
  host: ''
  port: 587
  user: ''
  pass: ''
"#;
    fs::write(target_dir.join("_config.yml"), config_content)?;

    let projects = r#"[
  {
    "id": 1,
    "title": "Hello Project",
    "desc": "A first project to show off.",
    "github": "https://github.com/example/hello-project"
  }
]
"#;
    fs::write(target_dir.join("public/projects.json"), projects)?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let writings = format!(
        r#"{{
  "posts": [
    {{
      "id": 1,
      "title": "Hello World",
      "desc": "Welcome to your new site.",
      "date": "{}"
    }}
  ]
}}
"#,
        today
    );
    fs::write(target_dir.join("public/writings.json"), writings)?;

    let sample_post = r#"Welcome! This is your very first writing.

## Quick Start

Edit `public/writings.json` to list a new writing, then put its body in
`content/writings/<slug>.mdx`, where the slug is the lowercased title with
spaces turned into hyphens.

```bash
$ portfolio-rs new "My New Post"
$ portfolio-rs server
```
"#;
    fs::write(
        target_dir.join("content/writings/hello-world.mdx"),
        sample_post,
    )?;

    let css = r#"body { font-family: system-ui, sans-serif; margin: 0; color: #111; background: #fff; }
html.dark body { color: #e4e4e7; background: #09090b; }
.container { max-width: 60ch; margin: 0 auto; padding: 2rem; }
.site-header nav { display: flex; gap: 1rem; align-items: center; max-width: 60ch; margin: 0 auto; padding: 1rem 2rem; }
.site-header a { color: inherit; text-decoration: none; }
.site-header a.active { font-weight: 600; }
.theme-toggle { margin-left: auto; background: none; border: none; color: inherit; cursor: pointer; }
.list-item { display: block; padding: .75rem 0; color: inherit; text-decoration: none; }
.list-item p { margin: .25rem 0; color: #666; }
.detail-header { border-bottom: 1px solid #ddd; padding-bottom: 2rem; margin-bottom: 2rem; }
.contact-form { display: grid; gap: .5rem; }
.field-error { color: #c62828; margin: 0; min-height: 1em; }
.toast { position: fixed; bottom: 1rem; right: 1rem; padding: 1rem; border-radius: .5rem; background: #222; color: #fff; }
.toast-error { background: #c62828; }
.site-footer { text-align: center; padding: 2rem; color: #888; }
"#;
    fs::write(target_dir.join("public/css/site.css"), css)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Portfolio;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_loadable_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let portfolio = Portfolio::new(dir.path()).unwrap();
        assert_eq!(portfolio.config.title, "My Portfolio");

        let store = portfolio.store();
        assert_eq!(store.load_projects().await.unwrap().len(), 1);
        let writings = store.load_writings().await.unwrap();
        assert_eq!(writings[0].title, "Hello World");
        assert!(store
            .load_body(crate::content::ContentKind::Writing, "hello-world")
            .await
            .is_some());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
