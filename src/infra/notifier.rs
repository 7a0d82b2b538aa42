//! Outbound client notifications.
//!
//! Dispatchers own transport only. Retries and bookkeeping belong to the job
//! queue that calls them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{Config, NOTIFY_WEBHOOK_TIMEOUT_SECONDS};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Delivery failure. Never surfaces to API callers.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("notification transport failed: {0}")]
    Transport(String),

    #[error("notification endpoint answered {status}")]
    Rejected { status: u16 },

    #[error("invalid notification endpoint: {0}")]
    InvalidEndpoint(String),
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Deliver `message` to `user_id`. `idempotency_key` is stable across
    /// redeliveries of the same notification.
    async fn notify(
        &self,
        user_id: Uuid,
        message: &str,
        idempotency_key: Uuid,
    ) -> Result<(), DispatchError>;
}

/// Writes notifications to the log. Used when no endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn notify(
        &self,
        user_id: Uuid,
        message: &str,
        idempotency_key: Uuid,
    ) -> Result<(), DispatchError> {
        tracing::info!(%user_id, %idempotency_key, message, "Notification dispatched");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    user_id: Uuid,
    message: &'a str,
    idempotency_key: Uuid,
}

/// POSTs notifications as JSON to a fixed endpoint.
pub struct WebhookDispatcher {
    client: Client,
    endpoint: Url,
}

impl WebhookDispatcher {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, DispatchError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| DispatchError::InvalidEndpoint(e.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookDispatcher {
    async fn notify(
        &self,
        user_id: Uuid,
        message: &str,
        idempotency_key: Uuid,
    ) -> Result<(), DispatchError> {
        let payload = WebhookPayload {
            user_id,
            message,
            idempotency_key,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Idempotency-Key", idempotency_key.to_string())
            .json(&payload)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(%user_id, %idempotency_key, "Notification delivered to webhook");
        Ok(())
    }
}

/// Webhook dispatcher when `NOTIFY_WEBHOOK_URL` is set, log dispatcher otherwise.
pub fn dispatcher_from_config(
    config: &Config,
) -> Result<std::sync::Arc<dyn NotificationDispatcher>, DispatchError> {
    match config.notify_webhook_url.as_deref() {
        Some(url) => {
            let dispatcher = WebhookDispatcher::new(
                url,
                Duration::from_secs(NOTIFY_WEBHOOK_TIMEOUT_SECONDS),
            )?;
            Ok(std::sync::Arc::new(dispatcher))
        }
        None => Ok(std::sync::Arc::new(LogDispatcher)),
    }
}
