//! List site content

use anyhow::Result;

use crate::content::Slugged;
use crate::Portfolio;

/// List site content by type
pub async fn run(portfolio: &Portfolio, content_type: &str) -> Result<()> {
    let store = portfolio.store();

    match content_type {
        "project" | "projects" => {
            let projects = store.load_projects().await?;
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!("  #{} {} [{}]", project.id, project.title, project.slug());
            }
        }
        "writing" | "writings" | "post" | "posts" => {
            let writings = store.load_writings().await?;
            println!("Writings ({}):", writings.len());
            for writing in writings {
                println!(
                    "  #{} {} - {} [{}]",
                    writing.id,
                    writing.date,
                    writing.title,
                    writing.slug()
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: projects, writings",
                content_type
            );
        }
    }

    Ok(())
}
