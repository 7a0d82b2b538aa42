//! Outbox relay.
//!
//! Pushes un-relayed outbox rows onto the job queue and marks them relayed.
//! A crash between the push and the mark re-sends that row on the next pass,
//! so delivery is at-least-once and receivers de-duplicate by outbox id.

use std::time::Duration;

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use async_trait::async_trait;

use super::NotificationJob;
use crate::errors::{AppError, AppResult};
use crate::infra::OutboxRepository;

/// Where relayed notifications go.
#[async_trait]
pub trait NotificationQueue: Send {
    async fn enqueue(&mut self, job: NotificationJob) -> AppResult<()>;
}

#[async_trait]
impl NotificationQueue for PostgresStorage<NotificationJob> {
    async fn enqueue(&mut self, job: NotificationJob) -> AppResult<()> {
        self.push(job)
            .await
            .map(|_| ())
            .map_err(|e| AppError::internal(format!("Failed to queue notification: {}", e)))
    }
}

/// Relay one batch, oldest first. Returns how many rows were relayed.
///
/// Stops at the first failure; the failed row stays un-relayed.
pub async fn relay_batch<Q: NotificationQueue + ?Sized>(
    outbox: &dyn OutboxRepository,
    queue: &mut Q,
    batch_size: u64,
) -> AppResult<usize> {
    let messages = outbox.fetch_unrelayed(batch_size).await?;
    let mut relayed = 0;

    for message in messages {
        let id = message.id;
        queue.enqueue(NotificationJob::from(message)).await?;
        outbox.mark_relayed(id).await?;
        relayed += 1;
    }

    if relayed > 0 {
        tracing::debug!(relayed, "Outbox batch relayed");
    }
    Ok(relayed)
}

/// Relay forever. Full batches are followed immediately by the next one;
/// otherwise the loop sleeps for `poll_interval`.
pub async fn run_relay<Q: NotificationQueue>(
    outbox: &dyn OutboxRepository,
    mut queue: Q,
    batch_size: u64,
    poll_interval: Duration,
) {
    tracing::info!(batch_size, ?poll_interval, "Outbox relay started");

    loop {
        match relay_batch(outbox, &mut queue, batch_size).await {
            Ok(relayed) if relayed as u64 >= batch_size => continue,
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Outbox relay pass failed"),
        }
        tokio::time::sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OutboxMessage;
    use crate::infra::repositories::MockOutboxRepository;
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingQueue {
        jobs: Vec<NotificationJob>,
        fail_after: Option<usize>,
    }

    #[async_trait]
    impl NotificationQueue for RecordingQueue {
        async fn enqueue(&mut self, job: NotificationJob) -> AppResult<()> {
            if self.fail_after == Some(self.jobs.len()) {
                return Err(AppError::internal("queue unavailable"));
            }
            self.jobs.push(job);
            Ok(())
        }
    }

    fn message() -> OutboxMessage {
        OutboxMessage {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            message: "Your contact request was accepted".to_string(),
            created_at: Utc::now(),
            relayed_at: None,
        }
    }

    #[tokio::test]
    async fn relays_and_marks_each_message() {
        let (first, second) = (message(), message());
        let rows = vec![first.clone(), second.clone()];

        let mut outbox = MockOutboxRepository::new();
        outbox
            .expect_fetch_unrelayed()
            .with(eq(10))
            .returning(move |_| Ok(rows.clone()));
        outbox
            .expect_mark_relayed()
            .with(eq(first.id))
            .times(1)
            .returning(|_| Ok(()));
        outbox
            .expect_mark_relayed()
            .with(eq(second.id))
            .times(1)
            .returning(|_| Ok(()));

        let mut queue = RecordingQueue::default();
        let relayed = relay_batch(&outbox, &mut queue, 10).await.unwrap();

        assert_eq!(relayed, 2);
        assert_eq!(queue.jobs[0].outbox_id, first.id);
        assert_eq!(queue.jobs[1].user_id, second.user_id);
    }

    #[tokio::test]
    async fn failed_push_leaves_row_unrelayed() {
        let rows = vec![message(), message()];
        let first_id = rows[0].id;

        let mut outbox = MockOutboxRepository::new();
        outbox
            .expect_fetch_unrelayed()
            .returning(move |_| Ok(rows.clone()));
        outbox
            .expect_mark_relayed()
            .with(eq(first_id))
            .times(1)
            .returning(|_| Ok(()));

        let mut queue = RecordingQueue {
            fail_after: Some(1),
            ..Default::default()
        };
        let result = relay_batch(&outbox, &mut queue, 10).await;

        assert!(result.is_err());
        assert_eq!(queue.jobs.len(), 1);
    }
}
