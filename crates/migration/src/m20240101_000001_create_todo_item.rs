//! Create `todo_item` table.
//! A single flat table; ids are generated by the application, not the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TodoItem::Table)
                    .if_not_exists()
                    .col(uuid(TodoItem::Id).primary_key())
                    .col(text(TodoItem::Description).not_null())
                    .col(boolean(TodoItem::IsCompleted).not_null().default(false))
                    .to_owned(),
            )
            .await?;

        // The list and uniqueness views only ever look at active rows
        manager
            .create_index(
                Index::create()
                    .name("idx_todo_item_is_completed")
                    .table(TodoItem::Table)
                    .col(TodoItem::IsCompleted)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TodoItem::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TodoItem {
    Table,
    Id,
    Description,
    IsCompleted,
}
