//! Client notification job.

use std::sync::Arc;

use apalis::prelude::Data;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::OutboxMessage;
use crate::infra::{DispatchError, NotificationDispatcher};

/// Queue payload for one outbox message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationJob {
    /// Outbox row id, reused as the delivery idempotency key
    pub outbox_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
}

impl From<OutboxMessage> for NotificationJob {
    fn from(message: OutboxMessage) -> Self {
        Self {
            outbox_id: message.id,
            user_id: message.user_id,
            message: message.message,
        }
    }
}

/// Hand one job to the dispatcher, logging the outcome.
pub async fn deliver(
    job: &NotificationJob,
    dispatcher: &dyn NotificationDispatcher,
) -> Result<(), DispatchError> {
    tracing::debug!(outbox_id = %job.outbox_id, user_id = %job.user_id, "Delivering notification");

    match dispatcher
        .notify(job.user_id, &job.message, job.outbox_id)
        .await
    {
        Ok(()) => {
            tracing::info!(outbox_id = %job.outbox_id, "Notification delivered");
            Ok(())
        }
        Err(e) => {
            // Returned so apalis records the failure and retries.
            tracing::warn!(outbox_id = %job.outbox_id, error = %e, "Notification delivery failed");
            Err(e)
        }
    }
}

/// apalis entry point
pub async fn notification_job_handler(
    job: NotificationJob,
    dispatcher: Data<Arc<dyn NotificationDispatcher>>,
) -> Result<(), DispatchError> {
    deliver(&job, &**dispatcher).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockNotificationDispatcher;
    use mockall::predicate::eq;

    fn job() -> NotificationJob {
        NotificationJob {
            outbox_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            message: "Your contact request was accepted".to_string(),
        }
    }

    #[tokio::test]
    async fn outbox_id_is_the_idempotency_key() {
        let job = job();
        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher
            .expect_notify()
            .with(eq(job.user_id), eq(job.message.clone()), eq(job.outbox_id))
            .times(1)
            .returning(|_, _, _| Ok(()));

        assert!(deliver(&job, &dispatcher).await.is_ok());
    }

    #[tokio::test]
    async fn dispatcher_failure_is_returned() {
        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher
            .expect_notify()
            .returning(|_, _, _| Err(DispatchError::Rejected { status: 503 }));

        let result = deliver(&job(), &dispatcher).await;

        assert!(matches!(result, Err(DispatchError::Rejected { status: 503 })));
    }
}
