//! Initial schema: repositories and their tags.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_repositories(manager).await?;
        self.create_tags(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Repositories::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_repositories(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Repositories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repositories::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Repositories::Name).string().not_null())
                    .col(ColumnDef::new(Repositories::Description).text().null())
                    .col(ColumnDef::new(Repositories::Url).string().not_null())
                    .col(ColumnDef::new(Repositories::Language).string().null())
                    .to_owned(),
            )
            .await
    }

    async fn create_tags(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Name).string().not_null())
                    .col(ColumnDef::new(Tags::RepositoryId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tags_repository_id")
                            .from(Tags::Table, Tags::RepositoryId)
                            .to(Repositories::Table, Repositories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tags_repository_id")
                    .table(Tags::Table)
                    .col(Tags::RepositoryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Prefix search scans tag names
        manager
            .create_index(
                Index::create()
                    .name("idx_tags_name")
                    .table(Tags::Table)
                    .col(Tags::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Repositories {
    Table,
    Id,
    Name,
    Description,
    Url,
    Language,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    RepositoryId,
}
