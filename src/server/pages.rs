//! Server-rendered pages
//!
//! Listings and detail headers are built from the content API through the
//! fetchers, so a failed fetch renders exactly like an empty site.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tera::Context;
use tower_http::services::ServeDir;

use super::ServerState;
use crate::client::FetchOptions;
use crate::content::{find_by_slug, ContentKind};
use crate::templates::{ConfigData, ProjectData, WritingData};

/// Page routes
pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/", get(home_handler))
        .route("/projects", get(projects_handler))
        .route("/projects/:slug", get(project_handler))
        .route("/writings", get(writings_handler))
        .route("/writings/:slug", get(writing_handler))
        .route("/contact", get(contact_handler))
}

/// Template rendering failed
pub struct PageError(anyhow::Error);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("Failed to render page: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
    }
}

impl From<anyhow::Error> for PageError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

type PageResult = Result<Html<String>, PageError>;

/// Context every template needs
fn base_context(state: &ServerState, page_title: &str, current: &str) -> Context {
    let mut context = Context::new();
    context.insert("config", &ConfigData::from(&state.config));
    context.insert("page_title", page_title);
    context.insert("current", current);
    context
}

fn render(state: &ServerState, template: &str, context: &Context) -> PageResult {
    Ok(Html(state.templates.render(template, context)?))
}

/// Render the Markdown body of a detail page, if it has one
async fn render_body(state: &ServerState, kind: ContentKind, slug: &str) -> Option<String> {
    let raw = state.store.load_body(kind, slug).await?;
    match state.markdown.render(&raw) {
        Ok(html) => Some(html),
        Err(e) => {
            tracing::warn!("Failed to render body for {}: {}", slug, e);
            None
        }
    }
}

/// GET /
async fn home_handler(State(state): State<Arc<ServerState>>) -> PageResult {
    let content = &state.config.content;
    let (projects, writings) = tokio::join!(
        state.content.fetch_projects(FetchOptions::recent(
            state.revalidate(),
            content.recent_projects
        )),
        state.content.fetch_writings(FetchOptions::recent(
            state.revalidate(),
            content.recent_writings
        )),
    );

    let mut context = base_context(&state, "", "home");
    context.insert(
        "projects",
        &projects.iter().map(ProjectData::from).collect::<Vec<_>>(),
    );
    context.insert(
        "writings",
        &writings.iter().map(WritingData::from).collect::<Vec<_>>(),
    );
    render(&state, "home.html", &context)
}

/// GET /projects
async fn projects_handler(State(state): State<Arc<ServerState>>) -> PageResult {
    let projects = state
        .content
        .fetch_projects(FetchOptions::all(state.revalidate()))
        .await;

    let mut context = base_context(&state, "Projects", "projects");
    context.insert(
        "projects",
        &projects.iter().map(ProjectData::from).collect::<Vec<_>>(),
    );
    render(&state, "projects.html", &context)
}

/// GET /projects/:slug
async fn project_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> PageResult {
    let projects = state
        .content
        .fetch_projects(FetchOptions::all(state.revalidate()))
        .await;
    let project = find_by_slug(&projects, &slug).map(ProjectData::from);
    let body = render_body(&state, ContentKind::Project, &slug).await;

    let title = project.as_ref().map(|p| p.title.as_str()).unwrap_or("Projects");
    let mut context = base_context(&state, title, "projects");
    context.insert("project", &project);
    context.insert("body", &body);
    render(&state, "project.html", &context)
}

/// GET /writings
async fn writings_handler(State(state): State<Arc<ServerState>>) -> PageResult {
    let writings = state
        .content
        .fetch_writings(FetchOptions::all(state.revalidate()))
        .await;

    let mut context = base_context(&state, "Writings", "writings");
    context.insert(
        "writings",
        &writings.iter().map(WritingData::from).collect::<Vec<_>>(),
    );
    render(&state, "writings.html", &context)
}

/// GET /writings/:slug
async fn writing_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> PageResult {
    let writings = state
        .content
        .fetch_writings(FetchOptions::all(state.revalidate()))
        .await;
    let writing = find_by_slug(&writings, &slug).map(WritingData::from);
    let body = render_body(&state, ContentKind::Writing, &slug).await;

    let title = writing.as_ref().map(|w| w.title.as_str()).unwrap_or("Writings");
    let mut context = base_context(&state, title, "writings");
    context.insert("writing", &writing);
    context.insert("body", &body);
    render(&state, "writing.html", &context)
}

/// GET /contact
async fn contact_handler(State(state): State<Arc<ServerState>>) -> PageResult {
    let context = base_context(&state, "Contact", "contact");
    render(&state, "contact.html", &context)
}

/// Serve static files from the public directory, or the not-found page
pub async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.public_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => not_found(&state),
        Err(e) => {
            tracing::error!("Failed to serve static file: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn not_found(state: &ServerState) -> Response {
    let context = base_context(state, "Not found", "");
    match state.templates.render("not_found.html", &context) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => PageError(e).into_response(),
    }
}
