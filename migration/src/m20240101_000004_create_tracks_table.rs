use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_artists_table::Artists;
use super::m20240101_000003_create_albums_table::Albums;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tracks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tracks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Tracks::Title)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tracks::ArtistId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tracks::AlbumId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tracks::DurationSecs)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tracks::TrackNumber).integer())
                    .col(ColumnDef::new(Tracks::Genre).string_len(100))
                    .col(ColumnDef::new(Tracks::AudioUrl).string_len(1000))
                    .col(ColumnDef::new(Tracks::FilePath).string_len(1000))
                    .col(ColumnDef::new(Tracks::FileHash).string_len(100))
                    .col(
                        ColumnDef::new(Tracks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tracks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tracks_artist_id")
                            .from(Tracks::Table, Tracks::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tracks_album_id")
                            .from(Tracks::Table, Tracks::AlbumId)
                            .to(Albums::Table, Albums::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tracks_album_id")
                    .table(Tracks::Table)
                    .col(Tracks::AlbumId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tracks_file_hash")
                    .table(Tracks::Table)
                    .col(Tracks::FileHash)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tracks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tracks {
    Table,
    Id,
    Title,
    ArtistId,
    AlbumId,
    DurationSecs,
    TrackNumber,
    Genre,
    AudioUrl,
    FilePath,
    FileHash,
    CreatedAt,
    UpdatedAt,
}
