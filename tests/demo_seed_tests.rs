//! End-to-end demo seeding tests
//!
//! Builds an album-folder layout on disk, runs the demo pipeline against an
//! in-memory database, and checks fixture creation, URL construction, and
//! reseed convergence.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use sea_orm::EntityTrait;

use tune_seeder::db::entities::{album, artist, playlist, playlist_track, track, user};
use tune_seeder::error::SeedError;
use tune_seeder::fixtures::FixtureSet;
use tune_seeder::tasks::run_demo_seed;
use tune_seeder::test_utils::*;

const BASE_URL: &str = "http://localhost:5000/Music";

fn make_album_folder(root: &Path, name: &str, files: &[&str]) {
    let folder = root.join(name);
    fs::create_dir(&folder).unwrap();
    for file in files {
        // Untagged payloads; titles come from the filenames
        fs::write(folder.join(file), format!("{name}/{file}").as_bytes()).unwrap();
    }
}

#[tokio::test]
async fn seeds_fixtures_albums_and_tracks() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    make_album_folder(dir.path(), "Night Tapes", &["01 First Light.mp3", "02 Afterglow.mp3"]);
    make_album_folder(dir.path(), "City Lines", &["Opening.mp3"]);

    let fixtures = FixtureSet::default();
    let summary = run_demo_seed(&db, dir.path(), BASE_URL, &fixtures).await.unwrap();

    assert_eq!(summary.users_created, fixtures.users.len());
    assert_eq!(summary.artists_created, fixtures.artists.len());
    assert_eq!(summary.albums_created, 2);
    assert_eq!(summary.tracks_added, 3);
    assert_eq!(summary.playlists_created, fixtures.playlists.len());

    // Artist accounts exist alongside listener accounts
    let users = user::Entity::find().all(&db).await.unwrap();
    assert_eq!(users.len(), fixtures.users.len() + fixtures.artists.len());
    assert!(users.iter().any(|u| u.is_artist));
}

#[tokio::test]
async fn artists_carry_generated_social_links() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    make_album_folder(dir.path(), "Night Tapes", &["a.mp3"]);

    run_demo_seed(&db, dir.path(), BASE_URL, &FixtureSet::default())
        .await
        .unwrap();

    let artists = artist::Entity::find().all(&db).await.unwrap();
    let luna = artists.iter().find(|a| a.name == "Luna Rivers").unwrap();
    let links: Vec<String> =
        serde_json::from_str(luna.social_links.as_deref().unwrap()).unwrap();
    assert_eq!(
        links,
        vec![
            "https://instagram.com/lunarivers".to_string(),
            "https://twitter.com/lunarivers".to_string(),
        ]
    );
}

#[tokio::test]
async fn invalid_fixture_set_is_fatal_before_any_write() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    make_album_folder(dir.path(), "Real Album", &["a.mp3"]);
    let leftover = create_test_user(&db, "leftover", "leftover@example.com").await;

    // "maxthunder" is the username the Max Thunder artist account needs
    let mut fixtures = FixtureSet::default();
    fixtures.users[0].username = "maxthunder".to_string();

    let result = run_demo_seed(&db, dir.path(), BASE_URL, &fixtures).await;

    assert!(matches!(result, Err(SeedError::InvalidFixtures(_))));
    // The clear step never ran, so the old demo account is still there
    let users = user::Entity::find().all(&db).await.unwrap();
    assert!(users.iter().any(|u| u.id == leftover.id));
}

#[tokio::test]
async fn audio_urls_are_percent_encoded_paths() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    make_album_folder(dir.path(), "Night Tapes", &["01 First Light.mp3"]);

    run_demo_seed(&db, dir.path(), BASE_URL, &FixtureSet::default())
        .await
        .unwrap();

    let tracks = track::Entity::find().all(&db).await.unwrap();
    assert_eq!(
        tracks[0].audio_url.as_deref(),
        Some("http://localhost:5000/Music/Night%20Tapes/01%20First%20Light.mp3")
    );
}

#[tokio::test]
async fn every_generated_reference_points_at_a_real_row() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    make_album_folder(
        dir.path(),
        "Big Album",
        &["a.mp3", "b.mp3", "c.mp3", "d.mp3", "e.mp3", "f.mp3"],
    );

    run_demo_seed(&db, dir.path(), BASE_URL, &FixtureSet::default())
        .await
        .unwrap();

    let track_ids: HashSet<_> = track::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    let playlist_ids: HashSet<_> = playlist::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    let memberships = playlist_track::Entity::find().all(&db).await.unwrap();
    assert!(!memberships.is_empty());
    for membership in memberships {
        assert!(track_ids.contains(&membership.track_id));
        assert!(playlist_ids.contains(&membership.playlist_id));
    }
}

#[tokio::test]
async fn reseeding_converges_instead_of_accumulating() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    make_album_folder(dir.path(), "Night Tapes", &["01 First Light.mp3", "02 Afterglow.mp3"]);

    let fixtures = FixtureSet::default();
    run_demo_seed(&db, dir.path(), BASE_URL, &fixtures).await.unwrap();
    run_demo_seed(&db, dir.path(), BASE_URL, &fixtures).await.unwrap();

    assert_eq!(
        artist::Entity::find().all(&db).await.unwrap().len(),
        fixtures.artists.len()
    );
    assert_eq!(album::Entity::find().all(&db).await.unwrap().len(), 1);
    assert_eq!(track::Entity::find().all(&db).await.unwrap().len(), 2);
    assert_eq!(
        user::Entity::find().all(&db).await.unwrap().len(),
        fixtures.users.len() + fixtures.artists.len()
    );
}

#[tokio::test]
async fn empty_album_folders_are_skipped() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    make_album_folder(dir.path(), "Real Album", &["a.mp3"]);
    fs::create_dir(dir.path().join("Empty Folder")).unwrap();

    let summary = run_demo_seed(&db, dir.path(), BASE_URL, &FixtureSet::default())
        .await
        .unwrap();

    assert_eq!(summary.albums_created, 1);
}

#[tokio::test]
async fn no_usable_album_folders_is_fatal_before_any_write() {
    let db = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("Empty Folder")).unwrap();

    let result = run_demo_seed(&db, dir.path(), BASE_URL, &FixtureSet::default()).await;

    assert!(matches!(result, Err(SeedError::NoAlbumFolders(_))));
    assert!(user::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_music_dir_is_fatal() {
    let db = setup_test_db().await;
    let result = run_demo_seed(
        &db,
        Path::new("/no/such/dir"),
        BASE_URL,
        &FixtureSet::default(),
    )
    .await;
    assert!(matches!(result, Err(SeedError::MusicDirMissing(_))));
}
