//! Database migrations.
//!
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_profile_tables;
mod m20240102_000001_create_contact_requests;
mod m20240102_000002_create_mobile_local_clients;
mod m20240103_000001_create_notification_outbox;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_profile_tables::Migration),
            Box::new(m20240102_000001_create_contact_requests::Migration),
            Box::new(m20240102_000002_create_mobile_local_clients::Migration),
            Box::new(m20240103_000001_create_notification_outbox::Migration),
        ]
    }
}
