//! Shared fixtures for integration tests: an in-memory SQLite database with
//! every migration applied, plus helpers that seed accounts the same way the
//! API does.

#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use storefront_api::config::Config;
use storefront_api::domain::{RetentionPolicy, User, UserRole};
use storefront_api::infra::Migrator;
use storefront_api::services::{Registration, ServiceContainer, Services};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const PASSWORD: &str = "correct horse battery";

/// One pooled connection, so every handle sees the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("in-memory sqlite should open");
    Migrator::up(&db, None)
        .await
        .expect("migrations should apply");
    db
}

pub fn test_config(retention: RetentionPolicy) -> Config {
    let mut config = Config::default().with_jwt_secret(TEST_JWT_SECRET);
    config.retention = retention;
    config
}

pub async fn services(retention: RetentionPolicy) -> (DatabaseConnection, Services) {
    let db = setup_db().await;
    let services = Services::from_connection(db.clone(), test_config(retention));
    (db, services)
}

pub fn client_registration(email: &str, national_id: &str) -> Registration {
    Registration {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        role: Some(UserRole::Client),
        name: "Ana".to_string(),
        surname: "Gómez".to_string(),
        phone: Some("+54 11 5555 0101".to_string()),
        address: Some("Av. Siempre Viva 742".to_string()),
        national_id: Some(national_id.to_string()),
        zone: None,
    }
}

pub fn seller_registration(email: &str) -> Registration {
    Registration {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        role: Some(UserRole::Seller),
        name: "Raúl".to_string(),
        surname: "Díaz".to_string(),
        zone: Some("Norte".to_string()),
        ..Default::default()
    }
}

pub async fn register_client(services: &Services, email: &str, national_id: &str) -> User {
    services
        .auth()
        .register(client_registration(email, national_id))
        .await
        .expect("client registration should succeed")
}

pub async fn register_seller(services: &Services, email: &str) -> User {
    services
        .auth()
        .register(seller_registration(email))
        .await
        .expect("seller registration should succeed")
}
