//! HTTP clients for the site's own API
//!
//! [`ContentClient`] feeds the page renderers; [`ContactPipeline`] drives a
//! contact form submission against the send-email endpoint.

pub mod contact;
pub mod content;

pub use contact::{ContactPipeline, SubmitState, Toast, ToastKind};
pub use content::{ContentClient, FetchError, FetchOptions};
