use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserTeam {
    Table,
    Id,
    UserId,
    TeamId,
    Role,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Users::Table)
                .if_not_exists()
                .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                .col(ColumnDef::new(Users::Name).string().not_null())
                .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                .col(ColumnDef::new(Users::Password).string().not_null())
                .col(
                    ColumnDef::new(Users::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(Teams::Table)
                .if_not_exists()
                .col(ColumnDef::new(Teams::Id).string().not_null().primary_key())
                .col(ColumnDef::new(Teams::Name).string().not_null().unique_key())
                .col(
                    ColumnDef::new(Teams::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(UserTeam::Table)
                .if_not_exists()
                .col(ColumnDef::new(UserTeam::Id).string().not_null().primary_key())
                .col(ColumnDef::new(UserTeam::UserId).string().not_null())
                .col(ColumnDef::new(UserTeam::TeamId).string().not_null())
                .col(ColumnDef::new(UserTeam::Role).integer().not_null().default(1))
                .col(
                    ColumnDef::new(UserTeam::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

        // One roster row per (user, team). Concurrent invite approvals race on this.
        m.create_index(
            Index::create()
                .name("uk_user_team_user_team")
                .table(UserTeam::Table)
                .col(UserTeam::UserId)
                .col(UserTeam::TeamId)
                .unique()
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_user_team_team")
                .table(UserTeam::Table)
                .col(UserTeam::TeamId)
                .to_owned(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(UserTeam::Table).if_exists().to_owned())
            .await?;
        m.drop_table(Table::drop().table(Teams::Table).if_exists().to_owned())
            .await?;
        m.drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
