//! Create blog table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Blog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Blog::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Blog::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Blog::Description).text().not_null())
                    .col(ColumnDef::new(Blog::Body).text().not_null())
                    .col(
                        ColumnDef::new(Blog::Published)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Blog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Blog::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Blog::CategoryId).string_len(32).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_user")
                            .from(Blog::Table, Blog::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_category")
                            .from(Blog::Table, Blog::CategoryId)
                            .to(Category::Table, Category::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's blogs)
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_user_id")
                    .table(Blog::Table)
                    .col(Blog::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: category_id (for listing blogs in a category)
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_category_id")
                    .table(Blog::Table)
                    .col(Blog::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (listings order by recency)
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_created_at")
                    .table(Blog::Table)
                    .col(Blog::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Blog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Blog {
    #[iden = "blogs"]
    Table,
    Id,
    Title,
    Description,
    Body,
    Published,
    CreatedAt,
    UserId,
    CategoryId,
}

#[derive(Iden)]
enum User {
    #[iden = "users"]
    Table,
    Id,
}

#[derive(Iden)]
enum Category {
    #[iden = "categories"]
    Table,
    Id,
}
