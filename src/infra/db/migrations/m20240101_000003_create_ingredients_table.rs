//! Migration: Create ingredients table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ingredients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ingredients::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Ingredients::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Ingredients::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Ingredients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ingredients_owner")
                            .from(Ingredients::Table, Ingredients::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Every query filters by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_ingredients_owner_id")
                    .table(Ingredients::Table)
                    .col(Ingredients::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ingredients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Ingredients {
    Table,
    Id,
    OwnerId,
    Name,
    CreatedAt,
}
