use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        // Association table; PK(user_id, pull_request_id) keeps assignments unique
        m.create_table(
            Table::create()
                .table(PrReviewer::Table)
                .col(ColumnDef::new(PrReviewer::UserId).string().not_null())
                .col(
                    ColumnDef::new(PrReviewer::PullRequestId)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(PrReviewer::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .primary_key(
                    Index::create()
                        .name("pk_pr_reviewer")
                        .col(PrReviewer::UserId)
                        .col(PrReviewer::PullRequestId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pr_reviewer_user")
                        .from(PrReviewer::Table, PrReviewer::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pr_reviewer_pull_request")
                        .from(PrReviewer::Table, PrReviewer::PullRequestId)
                        .to(PullRequest::Table, PullRequest::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_pr_reviewer_user")
                .table(PrReviewer::Table)
                .col(PrReviewer::UserId)
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_pr_reviewer_pull_request")
                .table(PrReviewer::Table)
                .col(PrReviewer::PullRequestId)
                .to_owned(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(PrReviewer::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum PrReviewer {
    Table,
    UserId,
    PullRequestId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum PullRequest {
    Table,
    Id,
}
