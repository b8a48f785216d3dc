//! Contact form submission
//!
//! `Idle -> Submitting -> (Success | Failure)`; [`ContactPipeline::dismiss`]
//! clears the toast and returns to `Idle`. Invalid forms never leave
//! `Idle` and never touch the network.

use crate::contact::{ContactMessage, SendEmailResponse, ValidationErrors};
use crate::helpers::join_url;

/// Where a submission currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// User-facing notification of a submission result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

impl Toast {
    fn success() -> Self {
        Self {
            kind: ToastKind::Success,
            title: "Message sent successfully".to_string(),
            description: "Thanks for reaching out! I'll get back to you soon.".to_string(),
        }
    }

    fn rejected(error: Option<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: "Failed to send message".to_string(),
            description: error.unwrap_or_else(|| "Please try again later.".to_string()),
        }
    }

    fn request_failed() -> Self {
        Self {
            kind: ToastKind::Error,
            title: "Error".to_string(),
            description: "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// A contact form bound to a site's send-email endpoint
pub struct ContactPipeline {
    http: reqwest::Client,
    endpoint: String,
    pub form: ContactMessage,
    state: SubmitState,
}

impl ContactPipeline {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: join_url(base_url, "/api/send-email"),
            form: ContactMessage::default(),
            state: SubmitState::Idle,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Return to `Idle` after the toast was shown
    pub fn dismiss(&mut self) {
        if self.state != SubmitState::Submitting {
            self.state = SubmitState::Idle;
        }
    }

    /// Validate and send the current form
    ///
    /// Validation errors come back as `Err` without a request being made.
    /// Otherwise the toast describes what happened; the form is cleared only
    /// on success.
    pub async fn submit(&mut self) -> Result<Toast, ValidationErrors> {
        self.form.validate()?;

        self.state = SubmitState::Submitting;
        let toast = match self.post().await {
            Ok(reply) if reply.success => {
                self.form = ContactMessage::default();
                Toast::success()
            }
            Ok(reply) => Toast::rejected(reply.error),
            Err(e) => {
                tracing::warn!("Contact request failed: {}", e);
                Toast::request_failed()
            }
        };

        self.state = match toast.kind {
            ToastKind::Success => SubmitState::Success,
            ToastKind::Error => SubmitState::Failure,
        };
        Ok(toast)
    }

    async fn post(&self) -> Result<SendEmailResponse, reqwest::Error> {
        self.http
            .post(&self.endpoint)
            .json(&self.form)
            .send()
            .await?
            .json::<SendEmailResponse>()
            .await
    }
}
