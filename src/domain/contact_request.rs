//! Contact requests: a client's standing ask to be served by a seller.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{STATUS_ACCEPTED, STATUS_CANCELLED, STATUS_PENDING};

/// Lifecycle state of a contact request.
///
/// The only transitions are `Pending -> Accepted` and `Pending -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => STATUS_PENDING,
            RequestStatus::Accepted => STATUS_ACCEPTED,
            RequestStatus::Cancelled => STATUS_CANCELLED,
        }
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(RequestStatus::Pending),
            STATUS_ACCEPTED => Ok(RequestStatus::Accepted),
            STATUS_CANCELLED => Ok(RequestStatus::Cancelled),
            other => Err(format!("unknown contact request status '{}'", other)),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to a request row once it leaves the pending state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Remove the row as soon as the request is accepted or cancelled.
    #[default]
    Delete,
    /// Keep accepted and cancelled requests as queryable history.
    Keep,
}

impl FromStr for RetentionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delete" => Ok(RetentionPolicy::Delete),
            "keep" => Ok(RetentionPolicy::Keep),
            other => Err(format!("expected 'delete' or 'keep', got '{}'", other)),
        }
    }
}

/// Contact request domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub id: i32,
    /// Owning user
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub status: RequestStatus,
    /// Seller profile that took the request, set on acceptance
    pub accepting_seller_id: Option<i32>,
}

/// Body returned when a request is opened
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedRequestResponse {
    #[schema(example = 17)]
    pub id: i32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<ContactRequest> for CreatedRequestResponse {
    fn from(request: ContactRequest) -> Self {
        Self {
            id: request.id,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

/// Request summary used in listings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactRequestSummary {
    #[schema(example = 17)]
    pub id: i32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    /// Requesting user
    pub user_id: Uuid,
    pub accepting_seller_id: Option<i32>,
}

impl From<ContactRequest> for ContactRequestSummary {
    fn from(request: ContactRequest) -> Self {
        Self {
            id: request.id,
            status: request.status,
            created_at: request.created_at,
            user_id: request.user_id,
            accepting_seller_id: request.accepting_seller_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_storage_form() {
        assert_eq!("accepted".parse(), Ok(RequestStatus::Accepted));
        assert!("aceptada".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn retention_parses_config_values() {
        assert_eq!("KEEP".parse(), Ok(RetentionPolicy::Keep));
        assert_eq!("delete".parse(), Ok(RetentionPolicy::Delete));
        assert!("archive".parse::<RetentionPolicy>().is_err());
        assert_eq!(RetentionPolicy::default(), RetentionPolicy::Delete);
    }
}
