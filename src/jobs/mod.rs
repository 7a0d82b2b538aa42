//! Background jobs.
//!
//! Acceptance writes notifications to the outbox table in its own
//! transaction. The relay moves outbox rows onto the apalis queue and the
//! notification worker delivers them.

mod notification_job;
mod outbox_relay;

pub use notification_job::{deliver, notification_job_handler, NotificationJob};
pub use outbox_relay::{relay_batch, run_relay, NotificationQueue};
