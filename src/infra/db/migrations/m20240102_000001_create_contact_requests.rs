//! Migration: contact requests.
//!
//! A client may hold at most one pending request. The partial unique index
//! enforces that at the storage level, so two concurrent creates cannot both
//! succeed.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const ONE_PENDING_INDEX: &str = "idx_contact_requests_one_pending";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactRequests::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ContactRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(ContactRequests::AcceptingSellerId)
                            .integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_requests_user")
                            .from(ContactRequests::Table, ContactRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_requests_seller")
                            .from(ContactRequests::Table, ContactRequests::AcceptingSellerId)
                            .to(SellerProfiles::Table, SellerProfiles::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contact_requests_status_created")
                    .table(ContactRequests::Table)
                    .col(ContactRequests::Status)
                    .col(ContactRequests::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Partial indexes are not expressible through the index builder on
        // every backend; Postgres and SQLite share this syntax.
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {ONE_PENDING_INDEX} \
                 ON contact_requests (user_id) WHERE status = 'pending'"
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!("DROP INDEX IF EXISTS {ONE_PENDING_INDEX}"))
            .await?;
        manager
            .drop_table(Table::drop().table(ContactRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum SellerProfiles {
    Table,
    Id,
}

#[derive(Iden)]
enum ContactRequests {
    Table,
    Id,
    UserId,
    CreatedAt,
    Status,
    AcceptingSellerId,
}
