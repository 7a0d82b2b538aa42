//! Migration: client and seller profiles.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClientProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClientProfiles::UserId).uuid().null())
                    .col(ColumnDef::new(ClientProfiles::Name).string_len(150).not_null())
                    .col(ColumnDef::new(ClientProfiles::Surname).string_len(150).not_null())
                    .col(ColumnDef::new(ClientProfiles::Phone).string_len(20).null())
                    .col(
                        ColumnDef::new(ClientProfiles::Email)
                            .string_len(254)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ClientProfiles::Address).string_len(150).null())
                    .col(
                        ColumnDef::new(ClientProfiles::NationalId)
                            .string_len(20)
                            .null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_profiles_user")
                            .from(ClientProfiles::Table, ClientProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_client_profiles_user_id")
                    .table(ClientProfiles::Table)
                    .col(ClientProfiles::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SellerProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SellerProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SellerProfiles::UserId).uuid().null())
                    .col(ColumnDef::new(SellerProfiles::Name).string_len(100).not_null())
                    .col(ColumnDef::new(SellerProfiles::Surname).string_len(100).not_null())
                    .col(ColumnDef::new(SellerProfiles::Phone).string_len(20).null())
                    .col(
                        ColumnDef::new(SellerProfiles::Email)
                            .string_len(254)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SellerProfiles::Zone).string_len(150).not_null())
                    .col(
                        ColumnDef::new(SellerProfiles::NationalId)
                            .string_len(20)
                            .null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seller_profiles_user")
                            .from(SellerProfiles::Table, SellerProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seller_profiles_user_id")
                    .table(SellerProfiles::Table)
                    .col(SellerProfiles::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SellerProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClientProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum ClientProfiles {
    Table,
    Id,
    UserId,
    Name,
    Surname,
    Phone,
    Email,
    Address,
    NationalId,
}

#[derive(Iden)]
enum SellerProfiles {
    Table,
    Id,
    UserId,
    Name,
    Surname,
    Phone,
    Email,
    Zone,
    NationalId,
}
