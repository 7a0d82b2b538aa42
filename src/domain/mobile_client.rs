//! Mobile/local client snapshots.
//!
//! A snapshot copies a client's profile at the moment a seller accepts their
//! request. It has no reference back to the profile, so later profile edits
//! never rewrite history, and the same national id may appear many times.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::ClientProfile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MobileLocalClient {
    #[schema(example = 12)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Not unique
    pub national_id: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMobileLocalClient {
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub national_id: String,
}

impl NewMobileLocalClient {
    /// Snapshot the profile as it is right now.
    pub fn snapshot_of(profile: &ClientProfile) -> Self {
        Self {
            name: profile.name.clone(),
            surname: profile.surname.clone(),
            phone: profile.phone.clone(),
            email: profile.email.clone(),
            address: profile.address.clone(),
            national_id: profile.national_id.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_copies_contact_fields() {
        let profile = ClientProfile {
            id: 4,
            user_id: None,
            name: "Ana".to_string(),
            surname: "Gómez".to_string(),
            phone: Some("+54 11 5555 0101".to_string()),
            email: Some("ana@example.com".to_string()),
            address: Some("Av. Siempre Viva 742".to_string()),
            national_id: Some("30111222".to_string()),
        };

        let snapshot = NewMobileLocalClient::snapshot_of(&profile);

        assert_eq!(snapshot.name, "Ana");
        assert_eq!(snapshot.surname, "Gómez");
        assert_eq!(snapshot.phone, profile.phone);
        assert_eq!(snapshot.email, profile.email);
        assert_eq!(snapshot.address, profile.address);
        assert_eq!(snapshot.national_id, "30111222");
    }

    #[test]
    fn missing_national_id_becomes_empty() {
        let profile = ClientProfile {
            id: 1,
            user_id: None,
            name: "Luis".to_string(),
            surname: "Paz".to_string(),
            phone: None,
            email: None,
            address: None,
            national_id: None,
        };

        assert_eq!(NewMobileLocalClient::snapshot_of(&profile).national_id, "");
    }
}
