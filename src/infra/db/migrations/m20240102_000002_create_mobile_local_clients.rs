//! Migration: mobile/local client snapshots.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MobileLocalClients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MobileLocalClients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MobileLocalClients::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(MobileLocalClients::Surname)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MobileLocalClients::Phone).string_len(20).null())
                    .col(ColumnDef::new(MobileLocalClients::Email).string_len(254).null())
                    .col(ColumnDef::new(MobileLocalClients::Address).string_len(150).null())
                    .col(
                        ColumnDef::new(MobileLocalClients::NationalId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MobileLocalClients::Notes).text().null())
                    .col(
                        ColumnDef::new(MobileLocalClients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup only; snapshots of the same client repeat the national id.
        manager
            .create_index(
                Index::create()
                    .name("idx_mobile_local_clients_national_id")
                    .table(MobileLocalClients::Table)
                    .col(MobileLocalClients::NationalId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MobileLocalClients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MobileLocalClients {
    Table,
    Id,
    Name,
    Surname,
    Phone,
    Email,
    Address,
    NationalId,
    Notes,
    CreatedAt,
}
