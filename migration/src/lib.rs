pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_artists_table;
mod m20240101_000003_create_albums_table;
mod m20240101_000004_create_tracks_table;
mod m20240101_000005_create_playlists_table;
mod m20240101_000006_create_playlist_tracks_table;
mod m20240101_000007_create_track_likes_table;
mod m20240101_000008_create_artist_followers_table;
mod m20240101_000009_create_album_followers_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_artists_table::Migration),
            Box::new(m20240101_000003_create_albums_table::Migration),
            Box::new(m20240101_000004_create_tracks_table::Migration),
            Box::new(m20240101_000005_create_playlists_table::Migration),
            Box::new(m20240101_000006_create_playlist_tracks_table::Migration),
            Box::new(m20240101_000007_create_track_likes_table::Migration),
            Box::new(m20240101_000008_create_artist_followers_table::Migration),
            Box::new(m20240101_000009_create_album_followers_table::Migration),
        ]
    }
}
