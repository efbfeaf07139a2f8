use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000002_create_artists_table::Artists;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArtistFollowers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArtistFollowers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ArtistFollowers::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ArtistFollowers::ArtistId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ArtistFollowers::FollowedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_followers_user_id")
                            .from(ArtistFollowers::Table, ArtistFollowers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_followers_artist_id")
                            .from(ArtistFollowers::Table, ArtistFollowers::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_artist_followers_user_artist")
                    .table(ArtistFollowers::Table)
                    .col(ArtistFollowers::UserId)
                    .col(ArtistFollowers::ArtistId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArtistFollowers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ArtistFollowers {
    Table,
    Id,
    UserId,
    ArtistId,
    FollowedAt,
}
