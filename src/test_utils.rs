//! Test utilities for Tune Seeder
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - Test data factories
//! - On-disk MP3 fixtures with controlled ID3 tags

use std::fs;
use std::path::Path;

use chrono::Utc;
use id3::TagLike;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use uuid::Uuid;

use crate::db::entities::{album, artist, track, user};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run all migrations
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test user in the database
pub async fn create_test_user(db: &DatabaseConnection, username: &str, email: &str) -> user::Model {
    let now = Utc::now().into();
    let new_user = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        display_name: Set(username.to_string()),
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("hash".to_string()),
        is_artist: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_user.insert(db).await.expect("Failed to insert test user")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    let now = Utc::now().into();
    let new_artist = artist::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        user_id: Set(None),
        genre: Set(None),
        bio: Set(None),
        social_links: Set(None),
        picture_url: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test album in the database
pub async fn create_test_album(
    db: &DatabaseConnection,
    artist_id: Uuid,
    title: &str,
) -> album::Model {
    let now = Utc::now().into();
    let new_album = album::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        artist_id: Set(artist_id),
        release_year: Set(None),
        release_date: Set(None),
        cover_art_url: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_album.insert(db).await.expect("Failed to insert test album")
}

/// Create a test track in the database
pub async fn create_test_track(
    db: &DatabaseConnection,
    artist_id: Uuid,
    album_id: Uuid,
    title: &str,
    file_hash: Option<&str>,
) -> track::Model {
    let now = Utc::now().into();
    let new_track = track::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        artist_id: Set(artist_id),
        album_id: Set(album_id),
        duration_secs: Set(200),
        track_number: Set(None),
        genre: Set(None),
        audio_url: Set(None),
        file_path: Set(None),
        file_hash: Set(file_hash.map(|h| h.to_string())),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_track.insert(db).await.expect("Failed to insert test track")
}

// ============================================================================
// On-disk MP3 fixtures
// ============================================================================

/// ID3 fields to stamp onto a generated test file. `year_text` and
/// `track_text` are written as raw text frames so sloppy values like
/// `"2019 "` or `"unknown"` can be exercised.
#[derive(Debug, Default, Clone)]
pub struct TestTag {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year_text: Option<String>,
    pub track_text: Option<String>,
    pub duration_ms: Option<u32>,
}

/// Write `payload` to `path` and stamp it with the given ID3v2.3 tag.
pub fn write_test_mp3(path: &Path, payload: &[u8], tag: &TestTag) {
    fs::write(path, payload).expect("Failed to write test file");

    let mut id3_tag = id3::Tag::new();
    if let Some(title) = &tag.title {
        id3_tag.set_title(title);
    }
    if let Some(artist) = &tag.artist {
        id3_tag.set_artist(artist);
    }
    if let Some(album) = &tag.album {
        id3_tag.set_album(album);
    }
    if let Some(genre) = &tag.genre {
        id3_tag.set_genre(genre);
    }
    if let Some(year) = &tag.year_text {
        id3_tag.add_frame(id3::Frame::text("TYER", year));
    }
    if let Some(track) = &tag.track_text {
        id3_tag.add_frame(id3::Frame::text("TRCK", track));
    }
    if let Some(ms) = tag.duration_ms {
        id3_tag.set_duration(ms);
    }

    id3_tag
        .write_to_path(path, id3::Version::Id3v23)
        .expect("Failed to write test tag");
}

/// Write a file that declares an ID3 tag with an unsupported version so tag
/// reading fails for it.
pub fn write_corrupt_mp3(path: &Path) {
    fs::write(path, b"ID3\xff\xff\x00\x00\x00\x10\x00garbage")
        .expect("Failed to write corrupt test file");
}
