//! Contact messages: validation, the mail they turn into, and the reply
//! envelope of the send-email endpoint

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::mail::OutgoingMail;

/// Subject line of every contact mail
pub const CONTACT_SUBJECT: &str = "New Contact Message";

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// A contact form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Required; an absent key or `null` deserializes as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// All rejected fields of a submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Error for a given field, if it was rejected
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ContactMessage {
    pub fn new(name: Option<String>, email: Option<String>, message: impl Into<String>) -> Self {
        Self {
            name,
            email,
            message: message.into(),
        }
    }

    /// Whether the required message is missing
    pub fn is_missing_message(&self) -> bool {
        self.message.is_empty()
    }

    /// Check the form before anything leaves the browser
    ///
    /// The message is required; name is free; email is optional but must
    /// look like an address when filled in.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if let Some(email) = self.email.as_deref() {
            if !email.is_empty() && !is_valid_email(email) {
                errors.push(FieldError {
                    field: "email",
                    message: "Please enter a valid email",
                });
            }
        }

        if self.is_missing_message() {
            errors.push(FieldError {
                field: "message",
                message: "Message is required",
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// The plain-text mail summarizing this submission
    pub fn to_mail(&self) -> OutgoingMail {
        let name = non_empty(self.name.as_deref()).unwrap_or("Anonymous");
        let email = non_empty(self.email.as_deref()).unwrap_or("Not provided");

        OutgoingMail {
            subject: CONTACT_SUBJECT.to_string(),
            body: format!(
                "From: {} \nEmail: {} \n\nMessage: {}",
                name, email, self.message
            ),
        }
    }
}

/// Permissive `local@domain.tld` check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Reply of the send-email endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendEmailResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
