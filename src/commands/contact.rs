//! Send a contact message through a running site

use anyhow::Result;

use crate::client::{ContactPipeline, ToastKind};
use crate::contact::ContactMessage;

/// Submit one message to the site at `base_url`
pub async fn run(
    base_url: &str,
    name: Option<String>,
    email: Option<String>,
    message: String,
) -> Result<()> {
    let mut pipeline = ContactPipeline::new(base_url);
    pipeline.form = ContactMessage::new(name, email, message);

    let toast = match pipeline.submit().await {
        Ok(toast) => toast,
        Err(errors) => {
            for error in &errors.0 {
                eprintln!("  {}: {}", error.field, error.message);
            }
            anyhow::bail!("Invalid contact form");
        }
    };

    println!("{}", toast.title);
    println!("{}", toast.description);

    match toast.kind {
        ToastKind::Success => Ok(()),
        ToastKind::Error => anyhow::bail!("Message was not delivered"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_form_never_sends() {
        // Nothing listens on the discard port; validation must fail first
        let result = run(
            "http://127.0.0.1:9",
            None,
            Some("not-an-email".to_string()),
            "hi".to_string(),
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Invalid contact form");
    }

    #[tokio::test]
    async fn test_unreachable_site_fails() {
        let result = run("http://127.0.0.1:9", None, None, "hello".to_string()).await;
        assert_eq!(result.unwrap_err().to_string(), "Message was not delivered");
    }
}
