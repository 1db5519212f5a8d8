//! Create blog interaction table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogInteraction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogInteraction::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BlogInteraction::UserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogInteraction::BlogId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogInteraction::Kind)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogInteraction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_interaction_user")
                            .from(BlogInteraction::Table, BlogInteraction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_interaction_blog")
                            .from(BlogInteraction::Table, BlogInteraction::BlogId)
                            .to(Blog::Table, Blog::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, blog_id) - one interaction per user per blog.
        // Correctness backstop for the toggle engine's check-then-act sequence.
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_interaction_user_blog")
                    .table(BlogInteraction::Table)
                    .col(BlogInteraction::UserId)
                    .col(BlogInteraction::BlogId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: blog_id (for counting reactions on a blog)
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_interaction_blog_id")
                    .table(BlogInteraction::Table)
                    .col(BlogInteraction::BlogId)
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's liked blogs)
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_interaction_user_id")
                    .table(BlogInteraction::Table)
                    .col(BlogInteraction::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogInteraction::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BlogInteraction {
    #[iden = "blog_interactions"]
    Table,
    Id,
    UserId,
    BlogId,
    Kind,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    #[iden = "users"]
    Table,
    Id,
}

#[derive(Iden)]
enum Blog {
    #[iden = "blogs"]
    Table,
    Id,
}
