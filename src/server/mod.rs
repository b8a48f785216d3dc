//! HTTP server: pages, JSON API and static files

mod pages;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::client::ContentClient;
use crate::config::SiteConfig;
use crate::content::{ContentStore, MarkdownRenderer};
use crate::helpers::local_base_url;
use crate::mail::{Mailer, SmtpMailer};
use crate::templates::TemplateRenderer;
use crate::{api, Portfolio};

/// Shared, read-only state of a running site
pub struct ServerState {
    pub config: SiteConfig,
    /// Static assets served for any path no route claims
    pub public_dir: PathBuf,
    pub store: ContentStore,
    pub content: ContentClient,
    pub mailer: Arc<dyn Mailer>,
    pub templates: TemplateRenderer,
    pub markdown: MarkdownRenderer,
}

impl ServerState {
    /// Build state for a site whose API is reachable at `base_url`
    pub fn new(portfolio: &Portfolio, base_url: &str, mailer: Arc<dyn Mailer>) -> Result<Self> {
        Ok(Self {
            config: portfolio.config.clone(),
            public_dir: portfolio.public_dir.clone(),
            store: ContentStore::from_portfolio(portfolio),
            content: ContentClient::new(base_url),
            mailer,
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new(),
        })
    }

    /// Revalidation window for listing fetches
    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.config.content.revalidate_secs)
    }
}

/// Assemble the full application router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .merge(pages::router())
        .nest("/api", api::router())
        .fallback(pages::fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the site server
pub async fn start(portfolio: &Portfolio, ip: &str, port: u16) -> Result<()> {
    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let base_url = if portfolio.config.base_url.is_empty() {
        local_base_url(ip, port)
    } else {
        portfolio.config.base_url.clone()
    };
    tracing::debug!("Content API base URL: {}", base_url);

    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(portfolio.config.smtp.clone()));
    if portfolio.config.smtp.host.is_empty() {
        tracing::warn!("SMTP_HOST is not set; contact messages will fail to send");
    }

    let state = Arc::new(ServerState::new(portfolio, &base_url, mailer)?);
    let app = router(state);

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::mail::{MailError, OutgoingMail};
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;

    /// Mailer that records what it was asked to send
    pub struct RecordingMailer {
        sent: Mutex<Vec<OutgoingMail>>,
        fail: bool,
    }

    impl RecordingMailer {
        pub fn accepting() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        pub fn sent(&self) -> Vec<OutgoingMail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::NotConfigured("refused by test mailer"));
            }
            self.sent.lock().unwrap().push(mail);
            Ok(())
        }
    }

    /// State for a site rooted at `base_dir` with the default layout
    pub fn state_with(
        base_dir: &Path,
        mailer: Arc<RecordingMailer>,
    ) -> (Arc<ServerState>, Arc<RecordingMailer>) {
        state_with_base_url(base_dir, "http://127.0.0.1:9", mailer)
    }

    pub fn state_with_base_url(
        base_dir: &Path,
        base_url: &str,
        mailer: Arc<RecordingMailer>,
    ) -> (Arc<ServerState>, Arc<RecordingMailer>) {
        let portfolio = Portfolio::with_config(base_dir, SiteConfig::default());
        let state = ServerState::new(&portfolio, base_url, mailer.clone()).unwrap();
        (Arc::new(state), mailer)
    }
}
