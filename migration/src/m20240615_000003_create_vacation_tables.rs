use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum VacationRequests {
    Table,
    Id,
    RequestedFrom,
    ToUserId,
    TeamId,
    Info,
    Status,
    FromDate,
    ToDate,
    CreatedAt,
    ChangedAt,
}

#[derive(DeriveIden)]
enum VacationApprovals {
    Table,
    RequestId,
    ApproverId,
    Status,
    ChangedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(VacationRequests::Table)
                .if_not_exists()
                .col(ColumnDef::new(VacationRequests::Id).string().not_null().primary_key())
                .col(ColumnDef::new(VacationRequests::RequestedFrom).string().not_null())
                .col(ColumnDef::new(VacationRequests::ToUserId).string().not_null())
                .col(ColumnDef::new(VacationRequests::TeamId).string().not_null())
                .col(ColumnDef::new(VacationRequests::Info).text().not_null())
                .col(ColumnDef::new(VacationRequests::Status).integer().not_null().default(0))
                .col(ColumnDef::new(VacationRequests::FromDate).date().not_null())
                .col(ColumnDef::new(VacationRequests::ToDate).date().not_null())
                .col(
                    ColumnDef::new(VacationRequests::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(VacationRequests::ChangedAt)
                        .timestamp_with_time_zone()
                        .null(),
                )
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(VacationApprovals::Table)
                .if_not_exists()
                .col(ColumnDef::new(VacationApprovals::RequestId).string().not_null())
                .col(ColumnDef::new(VacationApprovals::ApproverId).string().not_null())
                .col(ColumnDef::new(VacationApprovals::Status).integer().not_null().default(0))
                .col(
                    ColumnDef::new(VacationApprovals::ChangedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .primary_key(
                    Index::create()
                        .name("pk_vacation_approvals")
                        .col(VacationApprovals::RequestId)
                        .col(VacationApprovals::ApproverId),
                )
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_vacation_requests_to_user")
                .table(VacationRequests::Table)
                .col(VacationRequests::ToUserId)
                .to_owned(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(VacationApprovals::Table).if_exists().to_owned())
            .await?;
        m.drop_table(Table::drop().table(VacationRequests::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
