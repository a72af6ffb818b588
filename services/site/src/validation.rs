//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use common::NewContactMessage;

use crate::models::{ContactSubmission, LoginCredentials};

/// Maximum accepted length of a contact name
pub const MAX_NAME_LEN: usize = 100;
/// Maximum accepted length of an email address
pub const MAX_EMAIL_LEN: usize = 254;
/// Maximum accepted length of a contact message body
pub const MAX_MESSAGE_LEN: usize = 5000;

/// A field counts as present only if it was sent and is not empty
fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Validate login credentials, returning the email and password
pub fn validate_login(credentials: LoginCredentials) -> Result<(String, String), String> {
    match (present(credentials.email), present(credentials.password)) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err("Email and password are required".to_string()),
    }
}

/// Validate a contact form submission
pub fn validate_contact(submission: ContactSubmission) -> Result<NewContactMessage, String> {
    let (Some(name), Some(email), Some(message)) = (
        present(submission.name),
        present(submission.email),
        present(submission.message),
    ) else {
        return Err("All fields are required".to_string());
    };

    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!("Name must be at most {MAX_NAME_LEN} characters long"));
    }

    validate_email(&email)?;

    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(format!(
            "Message must be at most {MAX_MESSAGE_LEN} characters long"
        ));
    }

    Ok(NewContactMessage {
        name,
        email,
        message,
    })
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(format!("Email must be at most {MAX_EMAIL_LEN} characters long"));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}
