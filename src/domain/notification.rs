//! Outbound client notifications.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A notification recorded in the outbox, waiting to be relayed.
///
/// `id` travels with the message as its idempotency key so receivers can
/// discard duplicates produced by at-least-once delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub relayed_at: Option<DateTime<Utc>>,
}

/// A notification as its recipient sees it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    #[schema(example = "Your contact request was accepted")]
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<OutboxMessage> for NotificationResponse {
    fn from(message: OutboxMessage) -> Self {
        Self {
            id: message.id,
            message: message.message,
            created_at: message.created_at,
        }
    }
}
