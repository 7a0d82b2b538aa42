//! Client and seller profiles attached to user accounts.

use serde::Serialize;
use uuid::Uuid;

/// Contact details of a user with the client role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientProfile {
    pub id: i32,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub national_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewClientProfile {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub national_id: Option<String>,
}

/// Contact details and sales zone of a user with the seller role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerProfile {
    pub id: i32,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub email: String,
    pub zone: String,
    pub national_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSellerProfile {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub email: String,
    pub zone: String,
    pub national_id: Option<String>,
}
