//! Common library for the site
//!
//! This crate provides the pieces shared by the site service that are not
//! tied to HTTP: the contact message model, the store abstraction that
//! holds those messages, and the store error types.

pub mod contact;
pub mod error;

pub use contact::{ContactMessage, ContactStore, InMemoryContactStore, NewContactMessage};
pub use error::{StoreError, StoreResult};

/// Example usage of the contact store
///
/// ```rust,no_run
/// use common::{ContactStore, InMemoryContactStore, NewContactMessage};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryContactStore::new(100);
///     store
///         .append(NewContactMessage {
///             name: "Ada".to_string(),
///             email: "ada@example.com".to_string(),
///             message: "Hello".to_string(),
///         })
///         .await?;
///     println!("Stored messages: {}", store.list().await?.len());
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
