//! Account registration, bootstrap and login against an in-memory database.

mod common;

use sea_orm::ConnectionTrait;

use storefront_api::domain::{RetentionPolicy, UserRole};
use storefront_api::errors::AppError;
use storefront_api::infra::repositories::{ProfileStore, UserStore};
use storefront_api::infra::{ProfileRepository, UserRepository};
use storefront_api::services::{Registration, ServiceContainer};

use common::{
    client_registration, register_client, register_seller, seller_registration, services,
    PASSWORD,
};

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_client_creates_profile() {
    let (db, services) = services(RetentionPolicy::Delete).await;

    let user = services
        .auth()
        .register(client_registration("  Ana@Example.com ", "30111222"))
        .await
        .unwrap();

    assert_eq!(user.email, "ana@example.com");
    assert_eq!(user.role, UserRole::Client);
    assert!(user.is_active);
    assert!(!user.is_staff);

    let profile = ProfileStore::new(db)
        .find_client_by_user(user.id)
        .await
        .unwrap()
        .expect("client profile");
    assert_eq!(profile.name, "Ana");
    assert_eq!(profile.email.as_deref(), Some("ana@example.com"));
    assert_eq!(profile.national_id.as_deref(), Some("30111222"));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let (_db, services) = services(RetentionPolicy::Delete).await;
    register_client(&services, "ana@example.com", "30111222").await;

    let result = services
        .auth()
        .register(client_registration("ANA@example.com", "30111223"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_register_duplicate_national_id_rolls_back_user() {
    let (db, services) = services(RetentionPolicy::Delete).await;
    register_client(&services, "ana@example.com", "30111222").await;

    let result = services
        .auth()
        .register(client_registration("bob@example.com", "30111222"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    let bob = UserStore::new(db)
        .find_by_email("bob@example.com")
        .await
        .unwrap();
    assert!(bob.is_none());

    // The address is free again for a registration that succeeds.
    assert!(services
        .auth()
        .register(client_registration("bob@example.com", "30111223"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_register_seller_zone_falls_back_to_address() {
    let (db, services) = services(RetentionPolicy::Delete).await;

    let user = services
        .auth()
        .register(Registration {
            zone: None,
            address: Some("Palermo".to_string()),
            ..seller_registration("raul@example.com")
        })
        .await
        .unwrap();

    let profile = ProfileStore::new(db)
        .find_seller_by_user(user.id)
        .await
        .unwrap()
        .expect("seller profile");
    assert_eq!(profile.zone, "Palermo");
    assert_eq!(profile.email, "raul@example.com");
}

#[tokio::test]
async fn test_register_seller_without_zone_or_address_fails() {
    let (_db, services) = services(RetentionPolicy::Delete).await;

    let result = services
        .auth()
        .register(Registration {
            zone: Some("   ".to_string()),
            address: None,
            ..seller_registration("raul@example.com")
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_register_client_requires_name() {
    let (_db, services) = services(RetentionPolicy::Delete).await;

    let result = services
        .auth()
        .register(Registration {
            name: " ".to_string(),
            ..client_registration("ana@example.com", "30111222")
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_register_requires_role() {
    let (_db, services) = services(RetentionPolicy::Delete).await;

    let result = services
        .auth()
        .register(Registration {
            role: None,
            ..client_registration("ana@example.com", "30111222")
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

// =============================================================================
// Administrator bootstrap
// =============================================================================

#[tokio::test]
async fn test_bootstrap_admin_on_empty_database() {
    let (_db, services) = services(RetentionPolicy::Delete).await;

    let admin = services
        .auth()
        .bootstrap_admin("root@example.com".to_string(), PASSWORD.to_string())
        .await
        .unwrap();

    assert_eq!(admin.role, UserRole::Administrator);
    assert!(admin.is_staff);
}

#[tokio::test]
async fn test_bootstrap_admin_refused_once_any_user_exists() {
    let (_db, services) = services(RetentionPolicy::Delete).await;
    register_seller(&services, "raul@example.com").await;

    let result = services
        .auth()
        .bootstrap_admin("root@example.com".to_string(), PASSWORD.to_string())
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let (_db, services) = services(RetentionPolicy::Delete).await;
    let user = register_client(&services, "ana@example.com", "30111222").await;
    let auth = services.auth();

    let token = auth
        .login("ANA@example.com".to_string(), PASSWORD.to_string())
        .await
        .unwrap();
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 24 * 3600);

    let claims = auth.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.role, "client");
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_the_same() {
    let (_db, services) = services(RetentionPolicy::Delete).await;
    register_client(&services, "ana@example.com", "30111222").await;
    let auth = services.auth();

    let wrong_password = auth
        .login("ana@example.com".to_string(), "not the password".to_string())
        .await;
    let unknown_email = auth
        .login("nobody@example.com".to_string(), PASSWORD.to_string())
        .await;

    assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
    assert!(matches!(unknown_email, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_inactive_user_cannot_login() {
    let (db, services) = services(RetentionPolicy::Delete).await;
    register_client(&services, "ana@example.com", "30111222").await;

    db.execute_unprepared("UPDATE users SET is_active = 0 WHERE email = 'ana@example.com'")
        .await
        .unwrap();

    let result = services
        .auth()
        .login("ana@example.com".to_string(), PASSWORD.to_string())
        .await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_tampered_token_is_rejected() {
    let (_db, services) = services(RetentionPolicy::Delete).await;

    let result = services.auth().verify_token("not.a.jwt");

    assert!(result.is_err());
}

// =============================================================================
// Current user
// =============================================================================

#[tokio::test]
async fn test_current_user_merges_profile() {
    let (_db, services) = services(RetentionPolicy::Delete).await;
    let user = register_client(&services, "ana@example.com", "30111222").await;

    let me = services.users().current_user(user.id).await.unwrap();

    assert_eq!(me.id, user.id);
    assert_eq!(me.email, "ana@example.com");
    assert_eq!(me.name, "Ana");
    assert_eq!(me.surname, "Gómez");
    assert_eq!(me.national_id, "30111222");
}
