use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000004_create_tracks_table::Tracks;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrackLikes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrackLikes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TrackLikes::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackLikes::TrackId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackLikes::LikedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_track_likes_user_id")
                            .from(TrackLikes::Table, TrackLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_track_likes_track_id")
                            .from(TrackLikes::Table, TrackLikes::TrackId)
                            .to(Tracks::Table, Tracks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_track_likes_user_track")
                    .table(TrackLikes::Table)
                    .col(TrackLikes::UserId)
                    .col(TrackLikes::TrackId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrackLikes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TrackLikes {
    Table,
    Id,
    UserId,
    TrackId,
    LikedAt,
}
