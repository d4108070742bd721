use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ToDo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ToDo::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ToDo::Task)
                            .string_len(32)
                            .not_null()
                            .check(Expr::cust("length(task) BETWEEN 1 AND 32")),
                    )
                    .col(
                        ColumnDef::new(ToDo::Description)
                            .string_len(256)
                            .null()
                            .check(Expr::cust(
                                "description IS NULL OR length(description) <= 256",
                            )),
                    )
                    .to_owned(),
            )
            .await?;

        // Not unique: two todos may share a task name
        manager
            .create_index(
                Index::create()
                    .name("ix_to_do_task")
                    .table(ToDo::Table)
                    .col(ToDo::Task)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ToDo::Table).to_owned())
            .await
    }
}

/// Table and column identifiers for to_do
#[derive(DeriveIden)]
enum ToDo {
    #[sea_orm(iden = "to_do")]
    Table,
    Id,
    Task,
    Description,
}
