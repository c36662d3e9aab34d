use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invites::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Invites::InviteType).integer().not_null())
                    .col(ColumnDef::new(Invites::FromUserId).string().not_null())
                    .col(ColumnDef::new(Invites::ToUserId).string().not_null())
                    .col(ColumnDef::new(Invites::TeamId).string().not_null())
                    .col(ColumnDef::new(Invites::Status).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Invites::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Invites::ChangedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invites_from_user")
                    .table(Invites::Table)
                    .col(Invites::FromUserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invites_to_user")
                    .table(Invites::Table)
                    .col(Invites::ToUserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invites::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Invites {
    Table,
    Id,
    InviteType,
    FromUserId,
    ToUserId,
    TeamId,
    Status,
    CreatedAt,
    ChangedAt,
}
