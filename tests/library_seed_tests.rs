//! End-to-end library seeding tests
//!
//! Runs the full pipeline (scan, tag read, resolve, upsert) against real
//! files in a temp directory and an in-memory database.

use std::fs;

use sea_orm::EntityTrait;

use tune_seeder::db::entities::{album, artist, track};
use tune_seeder::error::SeedError;
use tune_seeder::tasks::run_library_seed;
use tune_seeder::test_utils::*;

fn tag(title: &str, artist: &str, album: &str) -> TestTag {
    TestTag {
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        album: Some(album.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn seeds_tagged_files_and_dedups_artists() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    write_test_mp3(&dir.path().join("a.mp3"), b"payload-a", &tag("One", "Nova Sky", "Skyline"));
    write_test_mp3(&dir.path().join("b.mp3"), b"payload-b", &tag("Two", "Nova Sky", "Skyline"));
    write_test_mp3(&dir.path().join("c.mp3"), b"payload-c", &tag("Three", "Aria Stone", "Gems"));

    let summary = run_library_seed(&db, dir.path()).await.unwrap();

    assert_eq!(summary.files_found, 3);
    assert_eq!(summary.tracks_added, 3);
    assert_eq!(summary.tracks_skipped, 0);
    assert_eq!(artist::Entity::find().all(&db).await.unwrap().len(), 2);
    assert_eq!(album::Entity::find().all(&db).await.unwrap().len(), 2);

    // Same artist name twice resolved to one identity
    let tracks = track::Entity::find().all(&db).await.unwrap();
    let nova: Vec<_> = tracks.iter().filter(|t| t.title == "One" || t.title == "Two").collect();
    assert_eq!(nova[0].artist_id, nova[1].artist_id);
}

#[tokio::test]
async fn rerunning_the_batch_adds_nothing() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    write_test_mp3(&dir.path().join("a.mp3"), b"payload-a", &tag("One", "Nova Sky", "Skyline"));
    write_test_mp3(&dir.path().join("b.mp3"), b"payload-b", &tag("Two", "Nova Sky", "Skyline"));

    let first = run_library_seed(&db, dir.path()).await.unwrap();
    let second = run_library_seed(&db, dir.path()).await.unwrap();

    assert_eq!(first.tracks_added, 2);
    assert_eq!(second.tracks_added, 0);
    assert_eq!(second.tracks_skipped, 2);
    assert_eq!(artist::Entity::find().all(&db).await.unwrap().len(), 1);
    assert_eq!(album::Entity::find().all(&db).await.unwrap().len(), 1);
    assert_eq!(track::Entity::find().all(&db).await.unwrap().len(), 2);
}

#[tokio::test]
async fn byte_identical_files_persist_once() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("original.mp3");
    write_test_mp3(&original, b"same-bytes", &tag("One", "Nova Sky", "Skyline"));
    fs::copy(&original, dir.path().join("copy elsewhere.mp3")).unwrap();

    let summary = run_library_seed(&db, dir.path()).await.unwrap();

    assert_eq!(summary.tracks_added, 1);
    assert_eq!(summary.tracks_skipped, 1);
    assert_eq!(track::Entity::find().all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn corrupt_file_is_skipped_without_halting() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    // Sorted order puts the corrupt file first
    write_corrupt_mp3(&dir.path().join("0-bad.mp3"));
    write_test_mp3(&dir.path().join("good.mp3"), b"payload", &tag("One", "Nova Sky", "Skyline"));

    let summary = run_library_seed(&db, dir.path()).await.unwrap();

    assert_eq!(summary.tracks_added, 1);
    assert_eq!(summary.tracks_skipped, 1);
}

#[tokio::test]
async fn untagged_file_derives_title_from_filename() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Max Thunder - Midnight Drive_SPOTISAVER.mp3"),
        b"no tag at all",
    )
    .unwrap();

    let summary = run_library_seed(&db, dir.path()).await.unwrap();

    assert_eq!(summary.tracks_added, 1);
    let tracks = track::Entity::find().all(&db).await.unwrap();
    assert_eq!(tracks[0].title, "Midnight Drive");
    assert_eq!(tracks[0].duration_secs, 180);
}

#[tokio::test]
async fn unknown_title_fails_completeness_gate() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Unknown.mp3"), b"untitled").unwrap();

    let summary = run_library_seed(&db, dir.path()).await.unwrap();

    assert_eq!(summary.tracks_added, 0);
    assert_eq!(summary.tracks_skipped, 1);
    assert!(track::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn sloppy_year_text_resolves_to_release_year() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    write_test_mp3(
        &dir.path().join("a.mp3"),
        b"payload-a",
        &TestTag {
            year_text: Some("2019 ".to_string()),
            ..tag("One", "Nova Sky", "Skyline")
        },
    );
    write_test_mp3(
        &dir.path().join("b.mp3"),
        b"payload-b",
        &TestTag {
            year_text: Some("unknown".to_string()),
            ..tag("Two", "Aria Stone", "Gems")
        },
    );

    run_library_seed(&db, dir.path()).await.unwrap();

    let albums = album::Entity::find().all(&db).await.unwrap();
    let skyline = albums.iter().find(|a| a.title == "Skyline").unwrap();
    let gems = albums.iter().find(|a| a.title == "Gems").unwrap();
    assert_eq!(skyline.release_year, Some(2019));
    assert_eq!(gems.release_year, None);
}

#[tokio::test]
async fn missing_music_dir_is_fatal() {
    let db = setup_test_db().await;
    let result = run_library_seed(&db, std::path::Path::new("/no/such/dir")).await;
    assert!(matches!(result, Err(SeedError::MusicDirMissing(_))));
}
