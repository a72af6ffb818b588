//! Contact message model and storage
//!
//! Messages submitted through the public contact form are kept in an
//! append-only, insertion-ordered sequence. The [`ContactStore`] trait is the
//! seam the service depends on; [`InMemoryContactStore`] is the process-lifetime
//! implementation (nothing survives a restart).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Contact message entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
    pub read: bool,
}

/// New contact message payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Append/list storage for contact messages
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Append a message, assigning its id and submission time
    async fn append(&self, new_message: NewContactMessage) -> StoreResult<ContactMessage>;

    /// All stored messages in the order they were appended
    async fn list(&self) -> StoreResult<Vec<ContactMessage>>;
}

/// Contact store held in process memory
#[derive(Debug)]
pub struct InMemoryContactStore {
    /// Maximum number of messages kept
    limit: usize,
    messages: RwLock<Vec<ContactMessage>>,
}

impl InMemoryContactStore {
    /// Default number of messages kept before appends are refused
    pub const DEFAULT_LIMIT: usize = 10_000;

    /// Create an empty store that holds at most `limit` messages
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            messages: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryContactStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn append(&self, new_message: NewContactMessage) -> StoreResult<ContactMessage> {
        // Id and timestamp are assigned under the write lock, in append order.
        let mut messages = self.messages.write().await;

        if messages.len() >= self.limit {
            warn!("Contact store is full ({} messages)", self.limit);
            return Err(StoreError::CapacityExceeded { limit: self.limit });
        }

        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: new_message.name,
            email: new_message.email,
            message: new_message.message,
            submitted_at: Utc::now(),
            read: false,
        };
        messages.push(message.clone());

        info!("Stored contact message {} ({} total)", message.id, messages.len());
        Ok(message)
    }

    async fn list(&self) -> StoreResult<Vec<ContactMessage>> {
        Ok(self.messages.read().await.clone())
    }
}
