use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000003_create_albums_table::Albums;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AlbumFollowers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AlbumFollowers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AlbumFollowers::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AlbumFollowers::AlbumId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AlbumFollowers::FollowedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_album_followers_user_id")
                            .from(AlbumFollowers::Table, AlbumFollowers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_album_followers_album_id")
                            .from(AlbumFollowers::Table, AlbumFollowers::AlbumId)
                            .to(Albums::Table, Albums::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_album_followers_user_album")
                    .table(AlbumFollowers::Table)
                    .col(AlbumFollowers::UserId)
                    .col(AlbumFollowers::AlbumId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AlbumFollowers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AlbumFollowers {
    Table,
    Id,
    UserId,
    AlbumId,
    FollowedAt,
}
