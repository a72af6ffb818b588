//! Request and response payloads for the JSON API

use common::ContactMessage;
use serde::{Deserialize, Serialize};

/// Contact form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Public view of an authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub email: String,
}

/// Response for user login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserSummary,
}

/// Response for session verification
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub user: UserSummary,
}

/// Response carrying only a human-readable message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for a stored contact submission
#[derive(Debug, Serialize)]
pub struct ContactSubmittedResponse {
    pub message: String,
    pub data: ContactMessage,
}

/// Response listing stored contact messages
#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub messages: Vec<ContactMessage>,
}
