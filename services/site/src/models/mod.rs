//! Site service models

pub mod payloads;
pub mod user;

// Re-export for convenience
pub use payloads::{
    ContactListResponse, ContactSubmission, ContactSubmittedResponse, LoginResponse, MessageResponse,
    UserSummary, VerifyResponse,
};
pub use user::{LoginCredentials, User};
